use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::debug;

use super::assets::{POSTER_DIR, VIDEO_DIR};

const NAME_TEMPLATE: &str = "%(title)s [%(id)s].%(ext)s";

/// What to fetch for one marker and where to put it.
pub struct DownloadRequest<'a> {
    /// Article directory; output folders are resolved against it.
    pub base: &'a Path,
    pub concurrent_fragments: u32,
}

impl DownloadRequest<'_> {
    pub fn video_template(&self) -> String {
        format!("{}/{}", VIDEO_DIR, NAME_TEMPLATE)
    }

    pub fn poster_template(&self) -> String {
        format!("{}/{}", POSTER_DIR, NAME_TEMPLATE)
    }
}

/// Fetches a video and its thumbnail into the request's output folders.
///
/// An `Err` means this one download failed; callers log it and move on.
#[allow(async_fn_in_trait)]
pub trait Downloader {
    async fn download(&self, url: &str, request: &DownloadRequest<'_>) -> Result<()>;
}

/// Runs the `yt-dlp` executable.
pub struct YtDlp {
    bin: String,
}

impl YtDlp {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    fn args(url: &str, request: &DownloadRequest<'_>) -> Vec<OsString> {
        vec![
            "--ignore-errors".into(),
            "--write-thumbnail".into(),
            "--concurrent-fragments".into(),
            request.concurrent_fragments.to_string().into(),
            "--paths".into(),
            request.base.as_os_str().to_owned(),
            "-o".into(),
            request.video_template().into(),
            "-o".into(),
            format!("thumbnail:{}", request.poster_template()).into(),
            url.into(),
        ]
    }
}

impl Downloader for YtDlp {
    async fn download(&self, url: &str, request: &DownloadRequest<'_>) -> Result<()> {
        let args = Self::args(url, request);
        debug!(bin = %self.bin, ?args, "spawning downloader");

        let status = Command::new(&self.bin)
            .args(&args)
            .stdin(Stdio::null())
            .status()
            .await
            .with_context(|| format!("Failed to run {}", self.bin))?;

        if !status.success() {
            bail!("{} exited with {} for {}", self.bin, status, url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_the_download_options() {
        let base = Path::new("/tmp/article");
        let req = DownloadRequest {
            base,
            concurrent_fragments: 8,
        };
        let args: Vec<String> = YtDlp::args("https://youtu.be/abc123", &req)
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect();

        assert!(args.contains(&"--ignore-errors".to_string()));
        assert!(args.contains(&"--write-thumbnail".to_string()));
        let pos = args.iter().position(|a| a == "--concurrent-fragments").unwrap();
        assert_eq!(args[pos + 1], "8");
        let pos = args.iter().position(|a| a == "--paths").unwrap();
        assert_eq!(args[pos + 1], "/tmp/article");
        assert!(args.contains(&"video/%(title)s [%(id)s].%(ext)s".to_string()));
        assert!(args.contains(&"thumbnail:poster/%(title)s [%(id)s].%(ext)s".to_string()));
        assert_eq!(args.last().unwrap(), "https://youtu.be/abc123");
    }

    #[tokio::test]
    async fn missing_binary_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let req = DownloadRequest {
            base: tmp.path(),
            concurrent_fragments: 8,
        };
        let dl = YtDlp::new("definitely-not-a-real-yt-dlp-binary");
        assert!(dl.download("https://youtu.be/abc123", &req).await.is_err());
    }
}
