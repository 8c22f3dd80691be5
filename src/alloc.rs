//! Allocation tracking for peak-memory measurement.
//!
//! [`TracingAllocator`] wraps the system allocator and keeps a running count
//! of live heap bytes together with the highest value that count reached.
//! Binaries that want real memory numbers install it with
//! `#[global_allocator]`; without it every trace reports zero bytes.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Live and peak heap byte counters.
///
/// A trace starts by resetting the peak to the current live count (the
/// baseline); the traced peak is then `peak - baseline`.
#[derive(Debug)]
pub struct AllocationCounters {
    live: AtomicUsize,
    peak: AtomicUsize,
    baseline: AtomicUsize,
}

impl AllocationCounters {
    pub const fn new() -> Self {
        Self {
            live: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            baseline: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn record_alloc(&self, size: usize) {
        let live = self.live.fetch_add(size, Ordering::Relaxed) + size;
        self.peak.fetch_max(live, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dealloc(&self, size: usize) {
        self.live.fetch_sub(size, Ordering::Relaxed);
    }

    /// Bytes currently allocated.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Relaxed)
    }

    /// Starts a trace at the current live byte count.
    pub fn start(&self) {
        let live = self.live();
        self.baseline.store(live, Ordering::Relaxed);
        self.peak.store(live, Ordering::Relaxed);
    }

    /// Highest number of bytes allocated on top of the baseline since [`start`](Self::start).
    pub fn peak_since_start(&self) -> usize {
        self.peak
            .load(Ordering::Relaxed)
            .saturating_sub(self.baseline.load(Ordering::Relaxed))
    }
}

impl Default for AllocationCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters fed by [`TracingAllocator`].
pub static COUNTERS: AllocationCounters = AllocationCounters::new();

/// System allocator that reports every allocation to [`COUNTERS`].
///
/// ```rust,ignore
/// use matbench::alloc::TracingAllocator;
///
/// #[global_allocator]
/// static GLOBAL: TracingAllocator = TracingAllocator;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAllocator;

unsafe impl GlobalAlloc for TracingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc(layout);
        if !ptr.is_null() {
            COUNTERS.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = System.alloc_zeroed(layout);
        if !ptr.is_null() {
            COUNTERS.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout);
        COUNTERS.record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = System.realloc(ptr, layout, new_size);
        if !new_ptr.is_null() {
            let old_size = layout.size();
            if new_size > old_size {
                COUNTERS.record_alloc(new_size - old_size);
            } else {
                COUNTERS.record_dealloc(old_size - new_size);
            }
        }
        new_ptr
    }
}
