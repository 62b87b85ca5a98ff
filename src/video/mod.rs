pub mod assets;
pub mod downloader;
pub mod service;

use std::path::Path;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::document::{Document, NewElement};
use crate::settings::Settings;
use assets::{escape_fragment, POSTER_DIR, VIDEO_DIR};
use downloader::{DownloadRequest, Downloader};
use service::Service;

/// Class carried by embedded third-party video widgets.
pub const MARKER_CLASS: &str = "andropov_video";
const SERVICE_ATTR: &str = "data-video-service";
const ID_ATTR: &str = "data-video-service-id";
const EMBED_STYLE: &str = "height: 100%; width: 100%; object-fit: contain";

/// Per-run counters for the video stage.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VideoStats {
    pub markers: usize,
    pub replaced: usize,
    pub missing_id: usize,
    pub missing_file: usize,
}

/// Download every marker's video and swap the marker for a local `<video>`.
///
/// Markers are visited in document order. A marker without an id, or whose
/// download left nothing in `video/`, stays as it is. An unknown service name
/// aborts the whole stage.
pub async fn embed_videos<D: Downloader>(
    doc: &mut Document,
    base: &Path,
    downloader: &D,
    settings: &Settings,
) -> Result<VideoStats> {
    assets::ensure_dirs(base)?;

    let markers = doc.elements_with_class(MARKER_CLASS);
    let mut stats = VideoStats {
        markers: markers.len(),
        ..Default::default()
    };
    info!("Found {} video markers", markers.len());

    let request = DownloadRequest {
        base,
        concurrent_fragments: settings.concurrent_fragments,
    };
    let video_dir = base.join(VIDEO_DIR);
    let poster_dir = base.join(POSTER_DIR);

    let pb = ProgressBar::new(markers.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} videos")?
            .progress_chars("=> "),
    );

    for node in markers {
        pb.inc(1);

        if !doc.is_attached(node) {
            debug!("Marker went away with an enclosing replacement, skipping");
            continue;
        }
        let Some(video_id) = doc.attr(node, ID_ATTR).map(str::to_string) else {
            debug!(marker = ?doc.outer_html(node), "Marker without {}, skipping", ID_ATTR);
            stats.missing_id += 1;
            continue;
        };
        let service: Service = doc.attr(node, SERVICE_ATTR).unwrap_or_default().parse()?;
        let url = service.source_url(&video_id);

        pb.suspend(|| info!(%service, id = %video_id, "Downloading {}", url));
        if let Err(e) = downloader.download(&url, &request).await {
            pb.suspend(|| warn!("Download failed for {}: {:#}", url, e));
        }

        let poster = assets::find_by_id(&poster_dir, &video_id)?.unwrap_or_default();
        let Some(video) = assets::find_by_id(&video_dir, &video_id)? else {
            pb.suspend(|| {
                warn!("No file in {}/ for {}, leaving marker in place", VIDEO_DIR, video_id)
            });
            stats.missing_file += 1;
            continue;
        };

        doc.replace(node, &embed_node(&video, &poster));
        stats.replaced += 1;
    }

    pb.finish_and_clear();
    Ok(stats)
}

/// `<video poster=.. style=.. controls><source src=..></video>` for local files.
fn embed_node(video_file: &str, poster_file: &str) -> NewElement {
    NewElement::new("video")
        .attr("poster", format!("{}/{}", POSTER_DIR, escape_fragment(poster_file)))
        .attr("style", EMBED_STYLE)
        .attr("controls", "")
        .child(
            NewElement::new("source")
                .attr("src", format!("{}/{}", VIDEO_DIR, escape_fragment(video_file))),
        )
}
