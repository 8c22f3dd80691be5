//! Command-line configuration.
//!
//! [`Args`] is what clap parses; [`SuiteConfig`] is the validated form the
//! library runs with. Running with no arguments reproduces the classic suite
//! over 64, 128, 256 and 512.

use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::bench::mb_to_bytes;
use crate::error::{validation_error, Result};

/// Sizes benchmarked when none are given.
pub const DEFAULT_SIZES: [usize; 4] = [64, 128, 256, 512];

/// Default blocking interval of each CPU sample, in milliseconds.
pub const DEFAULT_CPU_INTERVAL_MS: u64 = 100;

/// Settings for one benchmark session.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteConfig {
    /// Matrix sizes, run in this order.
    pub sizes: Vec<usize>,
    /// Size of an untimed run before the suite starts.
    pub warmup: Option<usize>,
    /// How long each CPU sample blocks.
    pub cpu_interval: Duration,
    /// Projected per-run footprint, in bytes, above which a size is refused.
    pub memory_limit: Option<usize>,
}

impl SuiteConfig {
    pub fn with_sizes(sizes: Vec<usize>) -> Self {
        Self {
            sizes,
            ..Self::default()
        }
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            warmup: None,
            cpu_interval: Duration::from_millis(DEFAULT_CPU_INTERVAL_MS),
            memory_limit: None,
        }
    }
}

/// Benchmark a naive O(n³) matrix multiplication.
#[derive(Debug, Parser)]
#[command(name = "matbench", version, about)]
pub struct Args {
    /// Matrix sizes to benchmark, in order, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SIZES)]
    pub sizes: Vec<usize>,

    /// Run one untimed multiply of this size before the suite
    #[arg(long)]
    pub warmup: Option<usize>,

    /// Blocking interval of each CPU sample, in milliseconds
    #[arg(long, default_value_t = DEFAULT_CPU_INTERVAL_MS)]
    pub cpu_interval_ms: u64,

    /// Refuse sizes whose operands and product would exceed this many MB
    #[arg(long)]
    pub memory_limit_mb: Option<f64>,

    /// Default log level on stderr; RUST_LOG takes precedence
    #[arg(long, default_value_t = Level::WARN)]
    pub log_level: Level,
}

impl Args {
    /// Validates the parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for an empty size list or a memory limit
    /// that is not a positive number.
    pub fn into_config(self) -> Result<SuiteConfig> {
        if self.sizes.is_empty() {
            return Err(validation_error("at least one size is required"));
        }

        let memory_limit = match self.memory_limit_mb {
            Some(mb) if !(mb.is_finite() && mb > 0.0) => {
                return Err(validation_error(format!(
                    "memory limit must be a positive number of MB, got {mb}"
                )));
            }
            Some(mb) => Some(mb_to_bytes(mb)),
            None => None,
        };

        Ok(SuiteConfig {
            sizes: self.sizes,
            warmup: self.warmup,
            cpu_interval: Duration::from_millis(self.cpu_interval_ms),
            memory_limit,
        })
    }
}
