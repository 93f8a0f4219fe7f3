//! Wall-clock access for the mempool, with a test-only override.
//!
//! Every `received_at` stamp and every expiry-age computation in this crate
//! reads the time through [`unix_time_as_secs`] instead of calling
//! `SystemTime::now()` directly, so TTL-based expiry can be tested without
//! real sleeps. The override is scoped by [`FaketimeGuard`]: it is cleared
//! when the guard drops, so a forgotten override cannot leak into an
//! unrelated test.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

static FAKETIME_ENABLED: AtomicBool = AtomicBool::new(false);
static FAKETIME_SECS: AtomicU64 = AtomicU64::new(0);
// Serializes access to the override so concurrent tests that both pin a
// fake time cannot observe each other's value.
static FAKETIME_LOCK: Mutex<()> = Mutex::new(());

/// Current unix time in seconds, honoring a test-installed override.
pub fn unix_time_as_secs() -> u64 {
    if FAKETIME_ENABLED.load(Ordering::SeqCst) {
        FAKETIME_SECS.load(Ordering::SeqCst)
    } else {
        system_time_as_secs()
    }
}

/// The real system clock, ignoring any override. Used by tests that assert
/// the override is actually taking effect.
pub fn system_time_as_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the unix epoch")
        .as_secs()
}

/// A guard that pins [`unix_time_as_secs`] to a fixed value for the lifetime
/// of the guard. Dropping it restores the real clock.
#[must_use]
pub struct FaketimeGuard<'a> {
    _lock: std::sync::MutexGuard<'a, ()>,
}

impl<'a> FaketimeGuard<'a> {
    /// Pin the clock to `secs`.
    pub fn set(&self, secs: u64) {
        FAKETIME_SECS.store(secs, Ordering::SeqCst);
        FAKETIME_ENABLED.store(true, Ordering::SeqCst);
    }

    /// Stop overriding without releasing the guard's exclusive hold on the
    /// override (a later `set` within the same guard re-enables it).
    pub fn disable(&self) {
        FAKETIME_ENABLED.store(false, Ordering::SeqCst);
    }
}

impl Drop for FaketimeGuard<'_> {
    fn drop(&mut self) {
        FAKETIME_ENABLED.store(false, Ordering::SeqCst);
    }
}

/// Acquire exclusive control over the faketime override. Blocks until any
/// other guard created by a concurrently running test is dropped.
pub fn faketime() -> FaketimeGuard<'static> {
    let lock = FAKETIME_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
    FaketimeGuard { _lock: lock }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_clock_is_monotonic_enough() {
        let before = system_time_as_secs();
        assert!(unix_time_as_secs() >= before);
    }

    #[test]
    fn override_pins_and_restores() {
        let before = system_time_as_secs();
        {
            let guard = faketime();
            guard.set(123);
            assert_eq!(unix_time_as_secs(), 123);
            guard.set(456);
            assert_eq!(unix_time_as_secs(), 456);
            guard.disable();
            assert!(unix_time_as_secs() >= before);
        }
        assert!(unix_time_as_secs() >= before);
    }

    #[test]
    fn override_clears_when_guard_drops() {
        let before = system_time_as_secs();
        {
            let guard = faketime();
            guard.set(1);
            assert_eq!(unix_time_as_secs(), 1);
        }
        assert!(unix_time_as_secs() >= before);
    }
}
