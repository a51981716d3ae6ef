// file: src/pipeline/progress.rs
// description: progress tracking for note extraction
// reference: uses indicatif for progress bars and tracks processing counts

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub struct ProgressTracker {
    main_bar: ProgressBar,
    detail_bar: ProgressBar,
    records_extracted: Arc<AtomicUsize>,
    documents_failed: Arc<AtomicUsize>,
}

impl ProgressTracker {
    pub fn new(total_documents: usize) -> Self {
        Self::with_color(total_documents, true)
    }

    /// A tracker that counts but never draws.
    pub fn hidden(total_documents: usize) -> Self {
        let main_bar = ProgressBar::hidden();
        main_bar.set_length(total_documents as u64);
        Self::from_bars(main_bar, ProgressBar::hidden())
    }

    pub fn with_color(total_documents: usize, colored: bool) -> Self {
        let multi_progress = MultiProgress::new();

        let main_bar = create_progress_bar(&multi_progress, total_documents as u64, colored);
        let detail_bar = create_detail_bar(&multi_progress);

        Self::from_bars(main_bar, detail_bar)
    }

    fn from_bars(main_bar: ProgressBar, detail_bar: ProgressBar) -> Self {
        Self {
            main_bar,
            detail_bar,
            records_extracted: Arc::new(AtomicUsize::new(0)),
            documents_failed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn inc_extracted(&self) {
        self.records_extracted.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn inc_failed(&self) {
        self.documents_failed.fetch_add(1, Ordering::SeqCst);
        self.main_bar.inc(1);
        self.update_detail_bar();
    }

    pub fn set_message(&self, message: String) {
        self.detail_bar.set_message(message);
    }

    pub fn finish(&self) {
        self.main_bar.finish_with_message("Extraction complete");
        self.detail_bar.finish_and_clear();
    }

    pub fn extracted(&self) -> usize {
        self.records_extracted.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.documents_failed.load(Ordering::SeqCst)
    }

    fn update_detail_bar(&self) {
        let message = format!("Records: {} | Failed: {}", self.extracted(), self.failed());
        self.detail_bar.set_message(message);
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(multi_progress: &MultiProgress, total: u64, colored: bool) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(total));
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}"
    };
    let chars = if colored { "█▓▒░" } else { "=>-" };

    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        bar.set_style(style.progress_chars(chars));
    }
    bar
}

fn create_detail_bar(multi_progress: &MultiProgress) -> ProgressBar {
    let bar = multi_progress.add(ProgressBar::new(0));
    if let Ok(style) = ProgressStyle::default_bar().template("{msg}") {
        bar.set_style(style);
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_tracker_increment() {
        let tracker = ProgressTracker::hidden(10);

        tracker.inc_extracted();
        tracker.inc_extracted();
        tracker.inc_failed();

        assert_eq!(tracker.extracted(), 2);
        assert_eq!(tracker.failed(), 1);
    }

    #[test]
    fn test_shared_across_threads() {
        let tracker = Arc::new(ProgressTracker::hidden(100));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        tracker.inc_extracted();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(tracker.extracted(), 100);
    }
}
