// file: src/repository/mod.rs
// description: Repository operations module exports
// reference: Internal module structure

pub mod classifier;
pub mod scanner;

pub use classifier::FileClassifier;
pub use scanner::{Discovery, DocumentWalk, FileScanner};
