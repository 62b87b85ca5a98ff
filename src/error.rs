use std::path::PathBuf;

use thiserror::Error;

/// Conditions that abort a run before `index.html` is rewritten.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error("unknown video service {0:?} (expected vk, vimeo or youtube)")]
    UnknownService(String),
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),
    #[error("no index.html in {}", .0.display())]
    MissingIndex(PathBuf),
}
