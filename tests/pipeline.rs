// file: tests/pipeline.rs
// description: end-to-end digest runs over temporary note trees
// reference: https://docs.rs/tempfile

use notes_digest::{Config, FailureCause, PipelineError, PipelineOrchestrator, RunReport};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn quiet_config() -> Config {
    let mut config = Config::default_config();
    config.pipeline.show_progress = false;
    config.site.base_url = "https://github.com/u/til/blob/main".to_string();
    config
}

fn write_note(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

async fn run(root: &Path) -> RunReport {
    PipelineOrchestrator::new(quiet_config())
        .unwrap()
        .run(root)
        .await
        .unwrap()
}

fn read_index(report: &RunReport) -> Value {
    serde_json::from_str(&fs::read_to_string(&report.index_path).unwrap()).unwrap()
}

fn titles(posts: &Value) -> Vec<String> {
    posts
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap().to_string())
        .collect()
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_note(
        root,
        "Rust/ownership.md",
        "---\ntitle: Ownership\ndate: 2024-03-01\ntags: [rust, memory]\n---\n\nEach value has one owner.\n",
    );
    write_note(
        root,
        "Rust/lifetimes.md",
        "---\ntitle: Lifetimes\ndate: 2024-03-05 14:30\ntags: rust\n---\n\nBorrows must not outlive owners.\n",
    );
    write_note(
        root,
        "devops/docker-volumes.md",
        "---\ntitle: Docker Volumes\ndate: 2024-02-10 08:15:42\ntags: [docker, storage]\n---\n\nBind mounts versus named volumes.\n",
    );
    write_note(
        root,
        "Go/channels.md",
        "---\ndate: 2024-03-05\n---\n\n# Buffered **Channels**\n\nSends block when full.\n",
    );
    dir
}

#[tokio::test]
async fn test_records_sorted_newest_first() {
    let dir = sample_tree();
    let report = run(dir.path()).await;
    let index = read_index(&report);

    assert_eq!(
        titles(&index["posts"]),
        vec!["Lifetimes", "Buffered Channels", "Ownership", "Docker Volumes"]
    );
    assert_eq!(index["posts"][0]["date"], "2024-03-05 14:30");
    assert_eq!(index["posts"][1]["date"], "2024-03-05");
    assert_eq!(index["posts"][3]["date"], "2024-02-10 08:15:42");
}

#[tokio::test]
async fn test_categories_partition_posts() {
    let dir = sample_tree();
    let report = run(dir.path()).await;
    let index = read_index(&report);

    let categories = index["categories"].as_object().unwrap();
    let keys: Vec<&str> = categories.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["Devops", "Go", "Rust"]);

    let grouped: usize = categories.values().map(|v| v.as_array().unwrap().len()).sum();
    assert_eq!(grouped, index["posts"].as_array().unwrap().len());
    assert_eq!(index["stats"]["total_posts"], 4);
    assert_eq!(index["stats"]["total_categories"], 3);
    assert_eq!(index["stats"]["category_counts"]["Rust"], 2);
    assert_eq!(titles(&categories["Rust"]), vec!["Lifetimes", "Ownership"]);
    assert_eq!(index["stats"]["popular_tags"]["rust"], 2);
    assert_eq!(index["stats"]["popular_tags"]["docker"], 1);
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let dir = sample_tree();

    let first = read_index(&run(dir.path()).await);
    let second_report = run(dir.path()).await;
    let second = read_index(&second_report);

    assert_eq!(first["posts"], second["posts"]);
    assert_eq!(first["categories"], second["categories"]);
    assert_eq!(first["stats"]["category_counts"], second["stats"]["category_counts"]);
    assert_eq!(first["stats"]["popular_tags"], second["stats"]["popular_tags"]);
    assert_eq!(second_report.documents_discovered, 4);
}

#[tokio::test]
async fn test_every_candidate_is_accounted_for() {
    let dir = sample_tree();
    fs::write(dir.path().join("Rust/broken.md"), [0xc3, 0x28, 0xa0, 0xa1]).unwrap();
    write_note(dir.path(), "Go/blank-title.md", "---\ntitle: \"\"\n---\n");

    let report = run(dir.path()).await;

    assert_eq!(report.documents_discovered, 6);
    assert_eq!(
        report.records_extracted + report.failures.len(),
        report.documents_discovered
    );
    let broken = report
        .failures
        .iter()
        .find(|f| f.path == "Rust/broken.md")
        .unwrap();
    assert_eq!(broken.cause, FailureCause::NotUtf8);
    assert_eq!(read_index(&report)["stats"]["total_posts"], report.records_extracted);
}

#[tokio::test]
async fn test_filename_fallbacks_for_bare_note() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "Linux/my-first-post.md", "Plain text without any heading.\n");

    let report = run(dir.path()).await;
    let index = read_index(&report);
    let post = &index["posts"][0];

    assert_eq!(post["title"], "My First Post");
    assert_eq!(post["category"], "Linux");
    assert_eq!(post["slug"], "my-first-post");
    assert_eq!(
        post["url"],
        "https://github.com/u/til/blob/main/Linux/my-first-post.md"
    );
    assert_eq!(post["date"].as_str().unwrap().len(), "2024-01-01".len());
    assert_eq!(post["preview"], "Plain text without any heading.");
}

#[tokio::test]
async fn test_unparseable_date_is_reported() {
    let dir = TempDir::new().unwrap();
    write_note(
        dir.path(),
        "Go/maps.md",
        "---\ntitle: Maps\ndate: not-a-date\n---\n\nKeys must be comparable.\n",
    );

    let report = run(dir.path()).await;
    let index = read_index(&report);

    assert_eq!(report.records_extracted, 1);
    assert_eq!(report.date_warnings.len(), 1);
    assert_eq!(report.date_warnings[0].path, "Go/maps.md");
    assert_eq!(report.date_warnings[0].value, "not-a-date");
    assert_eq!(
        index["posts"][0]["date"].as_str().unwrap().len(),
        "2025-01-01 12:00:00".len()
    );
}

#[tokio::test]
async fn test_previews_are_bounded_plain_text() {
    let dir = TempDir::new().unwrap();
    let long_line = "word ".repeat(120);
    write_note(
        dir.path(),
        "Misc/long.md",
        &format!(
            "# Long\n\n```rust\nfn hidden() {{}}\n```\n\nSee [the docs](https://example.com) and **bold** text.\n{}\n",
            long_line
        ),
    );

    let report = run(dir.path()).await;
    let index = read_index(&report);
    let preview = index["posts"][0]["preview"].as_str().unwrap();

    assert!(preview.chars().count() <= 200);
    assert!(preview.starts_with("See the docs and bold text."));
    assert!(preview.ends_with("..."));
    assert!(!preview.contains("hidden"));
    assert!(!preview.contains("**"));
}

#[tokio::test]
async fn test_summary_and_excluded_locations_are_skipped() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_note(root, "README.md", "# Old listing\n");
    write_note(root, "scratch.md", "# Root note\n");
    write_note(root, "Rust/Readme.md", "# Category readme\n");
    write_note(root, ".git/notes/hidden.md", "# Hidden\n");
    write_note(root, "web/node_modules/pkg/doc.md", "# Vendored\n");
    write_note(root, "Rust/notes.txt", "# Wrong extension\n");
    write_note(root, "Rust/traits.md", "# Traits\n\nShared behavior.\n");

    let report = run(root).await;
    let index = read_index(&report);

    assert_eq!(report.documents_discovered, 1);
    assert_eq!(titles(&index["posts"]), vec!["Traits"]);

    let page = fs::read_to_string(&report.page_path).unwrap();
    assert!(!page.contains("Old listing"));
    assert!(page.contains("### Rust (1)"));
}

#[tokio::test]
async fn test_empty_tree_still_writes_artifacts() {
    let dir = TempDir::new().unwrap();

    let report = run(dir.path()).await;
    let index = read_index(&report);

    assert_eq!(report.documents_discovered, 0);
    assert_eq!(index["posts"], Value::Array(vec![]));
    assert_eq!(index["categories"], Value::Object(Default::default()));
    assert_eq!(index["stats"]["total_posts"], 0);
    assert_eq!(index["stats"]["total_categories"], 0);

    let page = fs::read_to_string(&report.page_path).unwrap();
    assert!(page.contains("0 notes found"));
}

#[tokio::test]
async fn test_unwritable_output_is_an_error() {
    let dir = sample_tree();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();

    let mut config = quiet_config();
    config.output.dir = Some(blocker);
    let err = PipelineOrchestrator::new(config)
        .unwrap()
        .run(dir.path())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Persistence { .. }));
}

#[cfg(unix)]
#[tokio::test]
async fn test_unreadable_directory_is_reported_and_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = sample_tree();
    write_note(dir.path(), "Rust/locked/hidden.md", "# Hidden\n");
    let locked = dir.path().join("Rust/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let report = run(dir.path()).await;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert_eq!(report.discovery_warnings.len(), 1);
    assert_eq!(report.discovery_warnings[0].path, locked);
    assert_eq!(report.documents_discovered, 4);
    assert_eq!(report.records_extracted, 4);
}
