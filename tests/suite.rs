//! End-to-end tests of the benchmark suite with the real multiply.
//!
//! Probe readings come from `StaticProbe` wherever exact values are asserted;
//! `SystemProbe` is only checked for sane, non-negative output.

use std::time::Duration;

use matbench::bench::projected_footprint;
use matbench::{
    run_benchmarks, run_suite, Bench, MatmulBench, StaticProbe, SuiteConfig, SystemProbe,
    DEFAULT_SIZES,
};

fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).unwrap()
}

#[test]
fn test_suite_over_small_sizes() {
    let config = SuiteConfig::with_sizes(vec![2, 4]);
    let mut bench = MatmulBench::new(StaticProbe::new(1024 * 1024, 25.0));
    let mut out = Vec::new();

    let results = run_suite(&config, &mut bench, &mut out).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].size, 2);
    assert_eq!(results[1].size, 4);
    for result in &results {
        assert!(result.execution_time >= 0.0);
        assert_eq!(result.memory_mb, 1.0);
        assert_eq!(result.cpu_percent, 25.0);
    }

    let text = output(out);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[0].starts_with("Size       Time (s)"));
    assert_eq!(lines[1], "-".repeat(70));
    assert!(lines[2].starts_with("2          "));
    assert!(lines[3].starts_with("4          "));
    assert!(lines[3].ends_with("1.00            25.00     "));
    assert_eq!(lines[4], "");
    assert_eq!(lines[5], "");
    assert_eq!(lines[6], "SUMMARY");
    assert_eq!(lines[7], "=".repeat(70));
    assert!(lines[8].starts_with("Total execution time: "));
    assert_eq!(lines[9], "Average memory usage: 1.00 MB");
    assert_eq!(lines[10], "Largest matrix tested: 4x4");
    assert_eq!(lines.len(), 11);

    assert!(bench.probe().is_balanced());
}

#[test]
fn test_memory_limit_halts_suite() {
    let limit = projected_footprint(8).unwrap();
    let mut bench = MatmulBench::new(StaticProbe::default()).with_memory_limit(Some(limit));
    let mut out = Vec::new();

    let results = run_benchmarks(&[4, 8, 16, 32], &mut bench, &mut out).unwrap();

    assert_eq!(
        results.iter().map(|r| r.size).collect::<Vec<_>>(),
        vec![4, 8]
    );

    let text = output(out);
    assert_eq!(text.matches("MEMORY ERROR").count(), 1);
    assert!(text.contains("16         MEMORY ERROR - Size too large"));
    assert!(!text.lines().any(|line| line.starts_with("32 ")));

    let probe = bench.into_probe();
    assert_eq!(probe.traces_started, 2);
    assert!(probe.is_balanced());
}

#[test]
fn test_nothing_succeeds_skips_summary() {
    let config = SuiteConfig {
        memory_limit: Some(1),
        ..SuiteConfig::with_sizes(vec![64, 128])
    };
    let mut bench = MatmulBench::new(StaticProbe::default()).with_memory_limit(config.memory_limit);
    let mut out = Vec::new();

    let results = run_suite(&config, &mut bench, &mut out).unwrap();

    assert!(results.is_empty());
    let text = output(out);
    assert!(text.contains("64         MEMORY ERROR - Size too large"));
    assert!(!text.contains("128"));
    assert!(!text.contains("SUMMARY"));
}

#[test]
fn test_system_probe_readings_are_non_negative() {
    let mut bench = MatmulBench::new(SystemProbe::new(Duration::from_millis(2)));

    for size in [1, 2, 8, 32] {
        let m = bench.run(size).unwrap();
        assert!(m.execution_time >= 0.0, "size {}: negative time", size);
        assert!(m.memory_mb >= 0.0, "size {}: negative memory", size);
        assert!(m.cpu_percent >= 0.0, "size {}: negative cpu", size);
    }
}

#[test]
fn test_default_configuration() {
    let config = SuiteConfig::default();
    assert_eq!(config.sizes, DEFAULT_SIZES.to_vec());
    assert_eq!(config.warmup, None);
    assert_eq!(config.memory_limit, None);
}
