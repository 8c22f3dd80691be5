//! Suite runner: drives a [`Bench`] over a list of sizes and prints the report.

use std::io::{self, Write};

use tracing::{info, warn};

use crate::bench::{Bench, BenchResult};
use crate::config::SuiteConfig;
use crate::report::{
    write_error, write_header, write_memory_error, write_row, write_summary, Summary,
};

/// Runs `bench` for every size in order, printing one table row per run.
///
/// The first failure ends the suite: sizes are expected to grow, so once a
/// size runs out of memory every later one would too. Memory exhaustion is
/// reported with its own message; any other error is printed verbatim.
///
/// # Returns
///
/// The successful results, in input order. The failing size is not included.
///
/// # Errors
///
/// Only I/O errors from `out` are returned; benchmark failures are printed.
pub fn run_benchmarks<B, W>(
    sizes: &[usize],
    bench: &mut B,
    out: &mut W,
) -> io::Result<Vec<BenchResult>>
where
    B: Bench + ?Sized,
    W: Write,
{
    if sizes.windows(2).any(|pair| pair[1] < pair[0]) {
        warn!(
            ?sizes,
            "sizes are not increasing; a failure stops all later sizes regardless"
        );
    }

    write_header(out)?;

    let mut results = Vec::with_capacity(sizes.len());

    for &size in sizes {
        match bench.run(size) {
            Ok(measurement) => {
                let result = BenchResult::new(size, measurement);
                write_row(out, &result)?;
                info!(
                    size,
                    execution_time = result.execution_time,
                    memory_mb = result.memory_mb,
                    cpu_percent = result.cpu_percent,
                    "benchmark completed"
                );
                results.push(result);
            }
            Err(e) if e.is_memory_exhaustion() => {
                warn!(size, error = %e, "out of memory, stopping suite");
                write_memory_error(out, size)?;
                break;
            }
            Err(e) => {
                warn!(size, error = %e, "benchmark failed, stopping suite");
                write_error(out, size, &e)?;
                break;
            }
        }
    }

    Ok(results)
}

/// Entry point of a full benchmark session.
///
/// Runs the optional warm-up (logged, never printed), the suite over
/// `config.sizes`, and prints the summary when at least one size succeeded.
pub fn run_suite<B, W>(
    config: &SuiteConfig,
    bench: &mut B,
    out: &mut W,
) -> io::Result<Vec<BenchResult>>
where
    B: Bench + ?Sized,
    W: Write,
{
    if let Some(size) = config.warmup {
        match bench.run(size) {
            Ok(m) => info!(size, execution_time = m.execution_time, "warm-up done"),
            Err(e) => warn!(size, error = %e, "warm-up failed"),
        }
    }

    let results = run_benchmarks(&config.sizes, bench, out)?;

    match Summary::from_results(&results) {
        Some(summary) => write_summary(out, &summary)?,
        None => info!("no benchmark succeeded, skipping summary"),
    }

    Ok(results)
}
