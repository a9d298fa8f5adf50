//! Lightweight timing instrumentation.
//!
//! Pointer handling, hit-index rebuilds and autosave writes are wrapped in
//! [`profile_scope!`](crate::profile_scope). Enable the `profiling` feature to
//! get per-scope trace output:
//!
//! ```toml
//! [dependencies]
//! erboard = { features = ["profiling"] }
//! ```
//!
//! Without the feature the macro compiles to nothing.

use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::warn;

/// Threshold used by [`ScopedTimer::for_profiling`].
pub const PROFILING_THRESHOLD_MS: f64 = 1.0;

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
///
/// # Example
/// ```ignore
/// fn rebuild_index() {
///     profile_scope!("rebuild_index");
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

/// A scoped timer that logs its duration on drop when it exceeds a threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    #[cfg(feature = "profiling")]
    depth: usize,
}

// Nesting depth for indented trace output
#[cfg(feature = "profiling")]
thread_local! {
    static CURRENT_DEPTH: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        #[cfg(feature = "profiling")]
        let depth = CURRENT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });

        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            #[cfg(feature = "profiling")]
            depth,
        }
    }

    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, PROFILING_THRESHOLD_MS)
    }

    /// Elapsed time without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        {
            CURRENT_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            if elapsed_ms > self.threshold_ms {
                let indent = "  ".repeat(self.depth);
                trace!("{}[PERF] {}: {:.2}ms", indent, self.name, elapsed_ms);
            }
        }

        #[cfg(not(feature = "profiling"))]
        {
            if elapsed_ms > self.threshold_ms {
                warn!(
                    operation = self.name,
                    elapsed_ms = format!("{:.2}", elapsed_ms),
                    threshold_ms = format!("{:.2}", self.threshold_ms),
                    "Slow operation"
                );
            }
        }
    }
}

/// Run `f` and log a warning if it takes longer than `threshold_ms`.
#[inline]
pub fn measure_and_log<T, F: FnOnce() -> T>(name: &str, threshold_ms: f64, f: F) -> T {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if elapsed_ms > threshold_ms {
        warn!(
            operation = name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", threshold_ms),
            "Slow operation"
        );
    }
    result
}
