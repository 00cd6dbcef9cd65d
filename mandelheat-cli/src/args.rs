//! Command-line arguments.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use log::LevelFilter;
use mandelheat_core::{HeatmapConfig, DEFAULT_CACHE_PATH, MANDELBULB_CONFIG};

#[derive(Debug, Parser)]
#[command(
    name = "mandelheat",
    version,
    about = "Monte Carlo density volume of the Mandelbulb"
)]
pub struct Cli {
    /// Cache file for the finished volume
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        require_equals = true,
        default_value = DEFAULT_CACHE_PATH,
        default_missing_value = DEFAULT_CACHE_PATH,
        value_parser = parse_cache_path
    )]
    pub cache_result: PathBuf,

    /// Neither read nor write the cache file
    #[arg(long)]
    pub no_cache: bool,

    /// Recompute even when a cached volume exists
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_value_t = false,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    pub force_compute: bool,

    /// Worker threads [default: available parallelism]
    #[arg(long, value_name = "N")]
    pub threads: Option<NonZeroUsize>,

    /// Total sample points across all workers
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub samples: Option<u64>,

    /// RNG seed keys
    #[arg(long, value_name = "K1,K2", value_parser = parse_seed)]
    pub seed: Option<(u64, u64)>,

    /// Log level, overriding RUST_LOG (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LevelFilter>,
}

impl Cli {
    /// Production configuration with the command-line overrides applied.
    pub fn heatmap_config(&self) -> HeatmapConfig {
        let mut config = MANDELBULB_CONFIG;
        if let Some(threads) = self.threads {
            config.workers = Some(threads.get());
        }
        if let Some(samples) = self.samples {
            config.total_samples = samples;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config
    }

    /// Cache file to use, or `None` when caching is off.
    pub fn cache_path(&self) -> Option<&Path> {
        if self.no_cache {
            None
        } else {
            Some(&self.cache_result)
        }
    }
}

fn parse_cache_path(s: &str) -> Result<PathBuf, String> {
    if s.is_empty() {
        return Err("cache path must not be empty".to_string());
    }
    Ok(PathBuf::from(s))
}

fn parse_seed(s: &str) -> Result<(u64, u64), String> {
    let (k1, k2) = s
        .split_once(',')
        .ok_or_else(|| format!("expected K1,K2, got '{}'", s))?;
    let k1 = k1
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid K1 '{}': {}", k1, e))?;
    let k2 = k2
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("invalid K2 '{}': {}", k2, e))?;
    // xorshift never leaves the all-zero state
    if k1 == 0 && k2 == 0 {
        return Err("seed keys must not both be zero".to_string());
    }
    Ok((k1, k2))
}
