//! Lightweight timing instrumentation.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);
static SCOPES_REPORTED: AtomicU64 = AtomicU64::new(0);

/// Prints its elapsed time to stderr when dropped, if timing is enabled.
#[derive(Debug)]
pub struct Scope {
    name: &'static str,
    start: Instant,
}

impl Drop for Scope {
    fn drop(&mut self) {
        if !is_enabled() {
            return;
        }
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        SCOPES_REPORTED.fetch_add(1, Ordering::Relaxed);
        eprintln!("[perf] {}: {:.3} ms", self.name, elapsed_ms);
    }
}

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: Instant::now(),
    }
}

/// Number of scopes reported since startup.
pub fn scopes_reported() -> u64 {
    SCOPES_REPORTED.load(Ordering::Relaxed)
}
