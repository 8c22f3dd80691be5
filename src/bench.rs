//! The benchmark driver: one timed, traced and CPU-sampled multiply per size.

use std::hint::black_box;
use std::time::Instant;

use tracing::{debug, instrument};

use crate::error::{allocation_error, Result};
use crate::matrix::{multiply, Matrix};
use crate::probe::{Probe, TraceScope};
use crate::utils::{byte_size, element_count};

/// Fill value of the left operand.
pub const LEFT_FILL: f64 = 1.5;
/// Fill value of the right operand.
pub const RIGHT_FILL: f64 = 2.5;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// What one benchmark run measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    /// Wall-clock seconds spent in the multiply call.
    pub execution_time: f64,
    /// Peak memory allocated during the multiply, in MB.
    pub memory_mb: f64,
    /// Mean of the CPU samples taken before and after the multiply.
    pub cpu_percent: f64,
}

/// A successful run, tagged with its matrix size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchResult {
    pub size: usize,
    pub execution_time: f64,
    pub memory_mb: f64,
    pub cpu_percent: f64,
}

impl BenchResult {
    pub fn new(size: usize, measurement: Measurement) -> Self {
        Self {
            size,
            execution_time: measurement.execution_time,
            memory_mb: measurement.memory_mb,
            cpu_percent: measurement.cpu_percent,
        }
    }
}

/// Anything that can benchmark an `n x n` workload.
pub trait Bench {
    fn run(&mut self, size: usize) -> Result<Measurement>;
}

impl<F> Bench for F
where
    F: FnMut(usize) -> Result<Measurement>,
{
    fn run(&mut self, size: usize) -> Result<Measurement> {
        self(size)
    }
}

/// Benchmarks [`multiply`] on two constant-filled square `f64` matrices.
#[derive(Debug)]
pub struct MatmulBench<P> {
    probe: P,
    memory_limit: Option<usize>,
}

impl<P: Probe> MatmulBench<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            memory_limit: None,
        }
    }

    /// Refuses sizes whose two operands plus product would exceed `bytes`.
    pub fn with_memory_limit(mut self, bytes: Option<usize>) -> Self {
        self.memory_limit = bytes;
        self
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn into_probe(self) -> P {
        self.probe
    }

    fn check_memory_limit(&self, size: usize) -> Result<()> {
        let Some(limit) = self.memory_limit else {
            return Ok(());
        };

        let footprint = projected_footprint(size)?;
        if footprint > limit {
            return Err(allocation_error(
                footprint,
                format!("{size}x{size} operands and product exceed the {limit} byte limit"),
            ));
        }
        Ok(())
    }
}

impl<P: Probe> Bench for MatmulBench<P> {
    #[instrument(level = "debug", skip(self))]
    fn run(&mut self, size: usize) -> Result<Measurement> {
        self.check_memory_limit(size)?;

        let a = Matrix::try_filled(size, size, LEFT_FILL)?;
        let b = Matrix::try_filled(size, size, RIGHT_FILL)?;

        let cpu_before = self.probe.sample_cpu();

        let trace = TraceScope::start(&mut self.probe);
        let start = Instant::now();
        let c = multiply(&a, &b)?;
        let elapsed = start.elapsed();
        let peak_bytes = trace.finish();

        let cpu_after = self.probe.sample_cpu();
        black_box(c);

        debug!(
            elapsed_secs = elapsed.as_secs_f64(),
            peak_bytes, cpu_before, cpu_after, "multiply finished"
        );

        Ok(Measurement {
            execution_time: elapsed.as_secs_f64(),
            memory_mb: peak_bytes as f64 / BYTES_PER_MB,
            cpu_percent: (cpu_before + cpu_after) / 2.0,
        })
    }
}

/// Bytes held by the two `size x size` operands and their product.
pub fn projected_footprint(size: usize) -> Result<usize> {
    let per_matrix = byte_size::<f64>(element_count(size, size)?)?;
    per_matrix.checked_mul(3).ok_or_else(|| {
        allocation_error(
            usize::MAX,
            format!("footprint of {size}x{size} matrices overflows usize"),
        )
    })
}

/// Converts a size in MB (1024² bytes) to bytes, truncating.
pub fn mb_to_bytes(mb: f64) -> usize {
    (mb * BYTES_PER_MB) as usize
}
