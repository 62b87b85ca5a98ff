use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

pub const VIDEO_DIR: &str = "video";
pub const POSTER_DIR: &str = "poster";

/// Create `video/` and `poster/` under `base` if missing.
pub fn ensure_dirs(base: &Path) -> Result<()> {
    for dir in [VIDEO_DIR, POSTER_DIR] {
        let path = base.join(dir);
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// First entry of `dir` (in lexicographic order) whose name contains `id`.
pub fn find_by_id(dir: &Path, id: &str) -> Result<Option<String>> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?
        .filter_map(|entry| entry.ok()?.file_name().into_string().ok())
        .collect();
    names.sort();
    Ok(names.into_iter().find(|name| name.contains(id)))
}

/// Make a file name safe to use as a relative URL: `#` would start a fragment.
pub fn escape_fragment(name: &str) -> String {
    name.replace('#', "%23")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn ensure_dirs_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        ensure_dirs(tmp.path()).unwrap();
        ensure_dirs(tmp.path()).unwrap();
        assert!(tmp.path().join(VIDEO_DIR).is_dir());
        assert!(tmp.path().join(POSTER_DIR).is_dir());
    }

    #[test]
    fn first_match_is_lexicographic() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "b [abc].mp4");
        touch(tmp.path(), "a [abc].webm");
        touch(tmp.path(), "other [xyz].mp4");
        let found = find_by_id(tmp.path(), "abc").unwrap();
        assert_eq!(found.as_deref(), Some("a [abc].webm"));
    }

    #[test]
    fn no_match() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "other [xyz].mp4");
        assert_eq!(find_by_id(tmp.path(), "abc").unwrap(), None);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(find_by_id(&tmp.path().join("nope"), "abc").is_err());
    }

    #[test]
    fn escape_only_hash() {
        assert_eq!(escape_fragment("Ep #1 & 2 [abc].mp4"), "Ep %231 & 2 [abc].mp4");
        assert_eq!(escape_fragment("##"), "%23%23");
        assert_eq!(escape_fragment("plain 100%.mp4"), "plain 100%.mp4");
    }
}
