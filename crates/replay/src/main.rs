//! Ocular Session Replay - Main Entry Point

use pipeline::OcularPipeline;
use replay::{init_logging, ReplayRunner, ReplaySettings};
use reporting::{InMemorySink, JsonLinesSink, Narrator, ReportDispatcher};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut settings = ReplaySettings::load()?;
    init_logging(settings.level()?);

    info!("=== Ocular Replay v{} ===", env!("CARGO_PKG_VERSION"));

    if let Some(path) = std::env::args().nth(1) {
        settings.input = Some(path.into());
    }

    let mut dispatcher = ReportDispatcher::new(Narrator::algorithmic(), settings.dispatcher.clone())
        .with_sink(Arc::new(InMemorySink::new(settings.report_retention)));
    if let Some(path) = &settings.report_path {
        dispatcher = dispatcher.with_sink(Arc::new(JsonLinesSink::new(path.clone())));
    }

    let runner = ReplayRunner::new(
        OcularPipeline::new(settings.pipeline.clone()),
        dispatcher,
        settings.report_every,
    );

    let reader: Box<dyn AsyncBufRead + Unpin> = match &settings.input {
        Some(path) => {
            info!(path = %path.display(), "Replaying session file");
            Box::new(BufReader::new(tokio::fs::File::open(path).await?))
        }
        None => {
            info!("Replaying session from stdin");
            Box::new(BufReader::new(tokio::io::stdin()))
        }
    };

    let summary = runner.run(reader, tokio::io::stdout()).await?;
    info!(frames = summary.frames, reports = summary.reports, "Done");

    Ok(())
}
