// mandelheat: compute (or load) the Mandelbulb density volume.

mod args;

use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::LevelFilter;
use mandelheat_compute::{generate_heatmap_image, FileCache, VolumeCache, VolumeSource};

use crate::args::Cli;

fn init_logging(level: Option<LevelFilter>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.init();
}

fn progress_bar(total_samples: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_samples);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {percent}% samples ({eta} left)")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let config = cli.heatmap_config();
    match serde_json::to_string(&config) {
        Ok(json) => log::debug!("Heatmap config: {}", json),
        Err(e) => log::warn!("Could not serialize config: {}", e),
    }

    let cache = cli.cache_path().map(FileCache::new);
    let cache_ref = cache.as_ref().map(|c| c as &dyn VolumeCache);
    if cache_ref.is_none() {
        log::info!("Caching disabled");
    }

    let bar = progress_bar(config.total_samples);
    let result = generate_heatmap_image(&config, cache_ref, cli.force_compute, &bar);
    bar.finish_and_clear();

    match result {
        Ok(generated) => {
            let stats = generated.volume.stats();
            let source = match generated.source {
                VolumeSource::Cache => "cache",
                VolumeSource::Computed => "computation",
            };
            log::info!(
                "Volume from {}: {} of {} voxels lit ({:.1}%), peak {}, mean {:.2}",
                source,
                stats.nonzero_voxels,
                stats.voxels,
                stats.occupancy() * 100.0,
                stats.peak_intensity,
                stats.mean_intensity
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
