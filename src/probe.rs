//! Resource sampling behind a narrow interface.
//!
//! The benchmark driver only needs three things from the outside world:
//! start a memory trace, stop it and read the peak, and sample the process
//! CPU rate. [`Probe`] captures exactly that so tests can swap the OS-backed
//! [`SystemProbe`] for the deterministic [`StaticProbe`].

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::alloc::{AllocationCounters, COUNTERS};

/// Default blocking interval of one CPU sample.
pub const DEFAULT_CPU_INTERVAL: Duration = Duration::from_millis(100);

/// Source of memory and CPU measurements.
pub trait Probe {
    /// Begins tracking allocations.
    fn start_trace(&mut self);

    /// Ends tracking and returns the peak number of bytes allocated since
    /// [`start_trace`](Probe::start_trace).
    fn stop_trace(&mut self) -> usize;

    /// Returns the process CPU utilization, in percent, over a short interval.
    fn sample_cpu(&mut self) -> f64;
}

impl<P: Probe + ?Sized> Probe for &mut P {
    fn start_trace(&mut self) {
        (**self).start_trace()
    }

    fn stop_trace(&mut self) -> usize {
        (**self).stop_trace()
    }

    fn sample_cpu(&mut self) -> f64 {
        (**self).sample_cpu()
    }
}

/// An active memory trace.
///
/// The trace is stopped exactly once: by [`finish`](TraceScope::finish) on
/// the success path, or by `Drop` when the scope is abandoned early, so an
/// error inside the traced region never leaves tracing switched on.
pub struct TraceScope<'a, P: Probe + ?Sized> {
    probe: &'a mut P,
    active: bool,
}

impl<'a, P: Probe + ?Sized> TraceScope<'a, P> {
    pub fn start(probe: &'a mut P) -> Self {
        probe.start_trace();
        Self {
            probe,
            active: true,
        }
    }

    /// Stops the trace and returns the peak byte count.
    pub fn finish(mut self) -> usize {
        self.active = false;
        self.probe.stop_trace()
    }
}

impl<P: Probe + ?Sized> Drop for TraceScope<'_, P> {
    fn drop(&mut self) {
        if self.active {
            let peak = self.probe.stop_trace();
            debug!(peak_bytes = peak, "memory trace stopped on early exit");
        }
    }
}

/// Probe backed by the tracking allocator and the OS process clock.
#[derive(Debug)]
pub struct SystemProbe {
    cpu_interval: Duration,
    counters: &'static AllocationCounters,
}

impl SystemProbe {
    pub fn new(cpu_interval: Duration) -> Self {
        Self {
            cpu_interval,
            counters: &COUNTERS,
        }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new(DEFAULT_CPU_INTERVAL)
    }
}

impl Probe for SystemProbe {
    fn start_trace(&mut self) {
        self.counters.start();
    }

    fn stop_trace(&mut self) -> usize {
        self.counters.peak_since_start()
    }

    fn sample_cpu(&mut self) -> f64 {
        let wall_start = Instant::now();
        let cpu_start = process_cpu_time();

        thread::sleep(self.cpu_interval);

        let cpu = process_cpu_time().saturating_sub(cpu_start);
        cpu_percent(cpu, wall_start.elapsed())
    }
}

/// CPU time consumed over a wall-clock window, as a percentage.
///
/// Values above 100 are possible when several threads run at once.
pub fn cpu_percent(cpu: Duration, wall: Duration) -> f64 {
    if wall.is_zero() {
        return 0.0;
    }
    cpu.as_secs_f64() / wall.as_secs_f64() * 100.0
}

/// User plus system CPU time consumed by this process so far.
#[cfg(unix)]
pub fn process_cpu_time() -> Duration {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();

    // SAFETY: getrusage only writes into the struct we hand it.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        warn!(
            error = %std::io::Error::last_os_error(),
            "getrusage failed, reporting zero CPU time"
        );
        return Duration::ZERO;
    }

    // SAFETY: rc == 0 means the kernel filled the struct; it was zeroed anyway.
    let usage = unsafe { usage.assume_init() };
    timeval_to_duration(usage.ru_utime) + timeval_to_duration(usage.ru_stime)
}

#[cfg(unix)]
fn timeval_to_duration(tv: libc::timeval) -> Duration {
    Duration::from_secs(tv.tv_sec.max(0) as u64) + Duration::from_micros(tv.tv_usec.max(0) as u64)
}

/// Process CPU time is not sampled on this platform.
#[cfg(not(unix))]
pub fn process_cpu_time() -> Duration {
    Duration::ZERO
}

/// Deterministic probe returning fixed readings.
///
/// Counts how often tracing was started and stopped so callers can check
/// that every trace was closed.
#[derive(Debug, Clone, Default)]
pub struct StaticProbe {
    /// Peak bytes reported by every `stop_trace`.
    pub peak_bytes: usize,
    /// Percentage reported by every `sample_cpu`.
    pub cpu_percent: f64,
    pub traces_started: usize,
    pub traces_stopped: usize,
    pub cpu_samples: usize,
}

impl StaticProbe {
    pub fn new(peak_bytes: usize, cpu_percent: f64) -> Self {
        Self {
            peak_bytes,
            cpu_percent,
            ..Self::default()
        }
    }

    /// True when no trace is left open.
    pub fn is_balanced(&self) -> bool {
        self.traces_started == self.traces_stopped
    }
}

impl Probe for StaticProbe {
    fn start_trace(&mut self) {
        self.traces_started += 1;
    }

    fn stop_trace(&mut self) -> usize {
        self.traces_stopped += 1;
        self.peak_bytes
    }

    fn sample_cpu(&mut self) -> f64 {
        self.cpu_samples += 1;
        self.cpu_percent
    }
}
