use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::document::Document;
use crate::error::CleanError;
use crate::prune;
use crate::settings::Settings;
use crate::video::downloader::Downloader;
use crate::video::{self, VideoStats};

const INDEX_FILE: &str = "index.html";
const EDITORIAL_HREF: &str = "/editorial";

/// Classes stripped after videos are embedded, in order.
pub const PRUNED_CLASSES: [&str; 4] = [
    prune::DEFAULT_CLASS,
    "propaganda",
    "icon--entry_quote",
    "content-header__item--listen",
];

/// What a run changed.
#[derive(Debug, Default)]
pub struct CleanReport {
    pub videos: VideoStats,
    pub pruned: usize,
    pub links: usize,
}

impl CleanReport {
    pub fn print(&self) {
        println!(
            "Embedded {}/{} videos ({} without id, {} not downloaded).",
            self.videos.replaced, self.videos.markers, self.videos.missing_id, self.videos.missing_file,
        );
        println!("Removed {} elements and {} editorial links.", self.pruned, self.links);
    }
}

/// Rewrite `dir/index.html` in place: embed local videos, then prune.
///
/// Nothing is written if any stage fails.
pub async fn clean_article<D: Downloader>(
    dir: &Path,
    settings: &Settings,
    downloader: &D,
) -> Result<CleanReport> {
    if !dir.is_dir() {
        return Err(CleanError::NotADirectory(dir.to_path_buf()).into());
    }
    let index = dir.join(INDEX_FILE);
    if !index.is_file() {
        return Err(CleanError::MissingIndex(dir.to_path_buf()).into());
    }

    let source = fs::read_to_string(&index)
        .with_context(|| format!("Failed to read {}", index.display()))?;
    let mut doc = Document::parse(&source);

    let mut report = CleanReport {
        videos: video::embed_videos(&mut doc, dir, downloader, settings).await?,
        ..Default::default()
    };

    for class in PRUNED_CLASSES {
        report.pruned += prune::remove_class(&mut doc, class);
    }
    report.links = prune::remove_links_to(&mut doc, EDITORIAL_HREF);

    fs::write(&index, doc.to_html())
        .with_context(|| format!("Failed to write {}", index.display()))?;
    info!("Rewrote {}", index.display());

    Ok(report)
}
