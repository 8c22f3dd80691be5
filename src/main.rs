use std::io::{self, Write};

use clap::Parser;
use eyre::WrapErr;

use matbench::alloc::TracingAllocator;
use matbench::logging::enable_logs;
use matbench::{run_suite, Args, MatmulBench, SystemProbe};

#[global_allocator]
static GLOBAL: TracingAllocator = TracingAllocator;

fn main() -> eyre::Result<()> {
    let args = Args::parse();
    enable_logs(args.log_level);

    let config = args.into_config().wrap_err("invalid configuration")?;
    tracing::info!(?config, "starting benchmark suite");

    let probe = SystemProbe::new(config.cpu_interval);
    let mut bench = MatmulBench::new(probe).with_memory_limit(config.memory_limit);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_suite(&config, &mut bench, &mut out).wrap_err("failed to write benchmark report")?;
    out.flush().wrap_err("failed to flush stdout")?;

    Ok(())
}
