mod cli;
mod summary;

use std::path::Path;
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context as _};
use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use tracing::{debug, info};

use mandelzoom_core::{resolve_round_count, Complex, SearchParams, Viewport, ZoomSearch};
use mandelzoom_render::{
    export_tiff, rasterize, ExportMetadata, RenderParams, RenderProgress, RgbBuffer,
};

use crate::cli::Cli;
use crate::summary::RunSummary;

/// How often rasterization progress is logged.
const PROGRESS_INTERVAL: Duration = Duration::from_millis(500);

/// Seed used when none is given: the clock's nanoseconds.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

/// Rasterize on a scoped worker thread while this thread reports progress.
fn rasterize_with_progress(viewport: &Viewport, params: &RenderParams) -> anyhow::Result<RgbBuffer> {
    let progress = RenderProgress::new();
    thread::scope(|s| {
        let worker = s.spawn(|| rasterize(viewport, params, &progress));
        while !worker.is_finished() {
            thread::sleep(PROGRESS_INTERVAL);
            info!("Building image: {:.2}%", progress.percent());
        }
        worker
            .join()
            .map_err(|_| anyhow!("rasterizer thread panicked"))
    })
}

fn write_summary_json(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write run summary to {}", path.display()))?;
    debug!("Wrote run summary to {}", path.display());
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Validate everything before the first random draw.
    let start = Viewport::new(Complex::new(cli.center_re, cli.center_im), cli.radius)
        .context("invalid starting view")?;
    let render_params = cli.render_params().context("invalid render settings")?;
    let output = cli.output_path();

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let mut rng = Pcg32::seed_from_u64(seed);
    let rounds = resolve_round_count(&mut rng, cli.depth);
    let search_params =
        SearchParams::new(cli.search_iterations, rounds).context("invalid search settings")?;

    info!(seed, rounds, start = %start.center(), radius = start.radius(), "Starting zoom search");
    let viewport = ZoomSearch::new(start, search_params, rng)?
        .run()
        .context("zoom search failed")?;

    let buffer = rasterize_with_progress(&viewport, &render_params)?;

    let metadata = ExportMetadata {
        center: viewport.center(),
        radius: viewport.radius(),
        rounds,
        seed,
        search_iterations: cli.search_iterations,
        render_iterations: cli.render_iterations,
    };
    export_tiff(&buffer, &output, &metadata)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());

    let summary = RunSummary {
        seed,
        rounds,
        center: viewport.center(),
        radius: viewport.radius(),
        zoom: RunSummary::zoom_of(&viewport),
        search_iterations: cli.search_iterations,
        render_iterations: cli.render_iterations,
        width: render_params.width,
        height: render_params.height,
        output,
    };
    if let Some(path) = &cli.summary_json {
        write_summary_json(path, &summary)?;
    }
    println!("{summary}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(Cli::parse())
}
