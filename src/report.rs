//! Console output: the fixed-width results table and the summary block.
//!
//! Everything here writes to a caller-supplied [`Write`] so the exact text
//! can be asserted in tests; the binary passes a locked stdout.

use std::io::{self, Write};

use crate::bench::BenchResult;
use crate::error::MatbenchError;

/// Width of the `-` and `=` separator lines.
pub const TABLE_WIDTH: usize = 70;

pub fn write_header<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "{:<10} {:<15} {:<15} {:<10}",
        "Size", "Time (s)", "Memory (MB)", "CPU %"
    )?;
    writeln!(out, "{}", "-".repeat(TABLE_WIDTH))
}

pub fn write_row<W: Write>(out: &mut W, result: &BenchResult) -> io::Result<()> {
    writeln!(
        out,
        "{:<10} {:<15.4} {:<15.2} {:<10.2}",
        result.size, result.execution_time, result.memory_mb, result.cpu_percent
    )
}

/// Row printed in place of results when a size ran out of memory.
pub fn write_memory_error<W: Write>(out: &mut W, size: usize) -> io::Result<()> {
    writeln!(out, "{size:<10} MEMORY ERROR - Size too large")
}

/// Row printed in place of results for any other failure.
pub fn write_error<W: Write>(out: &mut W, size: usize, error: &MatbenchError) -> io::Result<()> {
    writeln!(out, "{size:<10} ERROR: {error}")
}

/// Aggregate figures over the successful runs of a suite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Sum of execution times, in seconds.
    pub total_time: f64,
    /// Mean peak memory, in MB.
    pub average_memory: f64,
    /// Size of the last successful run.
    pub largest_size: usize,
}

impl Summary {
    /// Returns `None` for an empty result list.
    ///
    /// The largest size is taken from the last result, which relies on the
    /// runner keeping results in input order.
    pub fn from_results(results: &[BenchResult]) -> Option<Self> {
        let last = results.last()?;

        let total_time: f64 = results.iter().map(|r| r.execution_time).sum();
        let total_memory: f64 = results.iter().map(|r| r.memory_mb).sum();

        Some(Self {
            total_time,
            average_memory: total_memory / results.len() as f64,
            largest_size: last.size,
        })
    }
}

pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    writeln!(out, "\n")?;
    writeln!(out, "SUMMARY")?;
    writeln!(out, "{}", "=".repeat(TABLE_WIDTH))?;
    writeln!(
        out,
        "Total execution time: {:.2} seconds",
        summary.total_time
    )?;
    writeln!(out, "Average memory usage: {:.2} MB", summary.average_memory)?;
    writeln!(
        out,
        "Largest matrix tested: {}x{}",
        summary.largest_size, summary.largest_size
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::validation_error;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn result(size: usize, execution_time: f64, memory_mb: f64) -> BenchResult {
        BenchResult {
            size,
            execution_time,
            memory_mb,
            cpu_percent: 12.5,
        }
    }

    #[test]
    fn test_header() {
        let text = render(|out| write_header(out));
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Size       Time (s)        Memory (MB)     CPU %     "
        );
        assert_eq!(lines.next().unwrap(), "-".repeat(70));
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_row_formatting() {
        let text = render(|out| write_row(out, &result(64, 0.012345, 0.0712)));
        assert_eq!(
            text,
            "64         0.0123          0.07            12.50     \n"
        );
    }

    #[test]
    fn test_error_rows() {
        let text = render(|out| write_memory_error(out, 512));
        assert_eq!(text, "512        MEMORY ERROR - Size too large\n");

        let text = render(|out| write_error(out, 8, &validation_error("bad input")));
        assert_eq!(text, "8          ERROR: Validation error: bad input\n");
    }

    #[test]
    fn test_summary_empty() {
        assert!(Summary::from_results(&[]).is_none());
    }

    #[test]
    fn test_summary_values() {
        let results = [result(2, 0.5, 1.0), result(4, 1.25, 3.0)];
        let summary = Summary::from_results(&results).unwrap();

        assert!((summary.total_time - 1.75).abs() < 1e-12);
        assert!((summary.average_memory - 2.0).abs() < 1e-12);
        assert_eq!(summary.largest_size, 4);
    }

    #[test]
    fn test_summary_uses_last_result_size() {
        let results = [result(256, 0.1, 0.0), result(128, 0.1, 0.0)];
        let summary = Summary::from_results(&results).unwrap();
        assert_eq!(summary.largest_size, 128);
    }

    #[test]
    fn test_summary_block() {
        let summary = Summary {
            total_time: 1.756,
            average_memory: 2.0,
            largest_size: 512,
        };
        let text = render(|out| write_summary(out, &summary));

        let expected = format!(
            "\n\nSUMMARY\n{}\n\
             Total execution time: 1.76 seconds\n\
             Average memory usage: 2.00 MB\n\
             Largest matrix tested: 512x512\n",
            "=".repeat(70)
        );
        assert_eq!(text, expected);
    }
}
