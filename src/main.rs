mod document;
mod error;
mod pipeline;
mod prune;
mod settings;
mod video;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing::info;

use settings::Settings;
use video::downloader::YtDlp;

#[derive(Parser)]
#[command(
    name = "article_cleaner",
    version,
    about = "Embed local copies of article videos and strip page clutter"
)]
struct Cli {
    /// Directory holding the saved index.html (rewritten in place)
    dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    info!(?settings, dir = %cli.dir.display(), "Starting");

    let downloader = YtDlp::new(settings.ytdlp_bin.clone());
    let report = pipeline::clean_article(&cli.dir, &settings, &downloader).await?;
    report.print();

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

/// Human-readable run time: `4.2s`, `2m 5s`, `1h 2m 5s`.
fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let (h, m, s) = (secs / 3600, secs / 60 % 60, secs % 60);
    match (h, m) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{}m {}s", m, s),
        _ => format!("{}h {}m {}s", h, m, s),
    }
}
