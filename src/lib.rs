//! Benchmark a naive O(n³) dense matrix multiplication.
//!
//! Each run multiplies two square `f64` matrices filled with 1.5 and 2.5 and
//! measures the wall-clock time of the multiply, the peak memory allocated
//! while it runs and the process CPU rate around it. The suite walks a list
//! of increasing sizes, prints one row per size and a summary at the end.
//!
//! ```
//! use matbench::{create_matrix, multiply};
//!
//! let a = create_matrix(2, 2, 1.5f64);
//! let b = create_matrix(2, 2, 2.5f64);
//! let c = multiply(&a, &b).unwrap();
//!
//! assert!(c.iter().all(|&v| v == 7.5));
//! ```
//!
//! Running a small suite with a deterministic probe:
//!
//! ```
//! use matbench::{run_suite, MatmulBench, StaticProbe, SuiteConfig};
//!
//! let config = SuiteConfig::with_sizes(vec![2, 4]);
//! let mut bench = MatmulBench::new(StaticProbe::new(0, 0.0));
//! let mut out = Vec::new();
//!
//! let results = run_suite(&config, &mut bench, &mut out).unwrap();
//! assert_eq!(results.len(), 2);
//! ```

pub mod alloc;
pub mod bench;
pub mod config;
pub mod error;
pub mod logging;
pub mod matrix;
pub mod probe;
pub mod report;
pub mod runner;
pub mod utils;

pub use bench::{Bench, BenchResult, MatmulBench, Measurement};
pub use config::{Args, SuiteConfig, DEFAULT_SIZES};
pub use error::{MatbenchError, Result};
pub use matrix::{create_matrix, multiply, Matrix};
pub use probe::{Probe, StaticProbe, SystemProbe, TraceScope};
pub use report::Summary;
pub use runner::{run_benchmarks, run_suite};
