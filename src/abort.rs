//! Abort suppression around the tag write
//!
//! `vorbiscomment` rewrites the target in place. Interrupting the process
//! half way leaves a truncated file, so while the helper runs the process is
//! flagged as "abort suppressed". Interrupt handlers check
//! [`abort_suppressed`] and call [`wait_for_release`] before exiting; the
//! `vctag-cli` binary installs such a handler for SIGINT and SIGTERM.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

static ABORT_SUPPRESSED: AtomicBool = AtomicBool::new(false);

/// Whether an in-flight tag write asked not to be interrupted.
pub fn abort_suppressed() -> bool {
    ABORT_SUPPRESSED.load(Ordering::SeqCst)
}

/// Block until no tag write holds abort suppression.
///
/// Returns `true` if the caller had to wait.
pub fn wait_for_release(poll: Duration) -> bool {
    wait_on(&ABORT_SUPPRESSED, poll)
}

fn wait_on(flag: &AtomicBool, poll: Duration) -> bool {
    if !flag.load(Ordering::SeqCst) {
        return false;
    }
    tracing::info!("tag write in progress, deferring shutdown");
    while flag.load(Ordering::SeqCst) {
        std::thread::sleep(poll);
    }
    true
}

/// Scoped abort suppression.
///
/// Creating the guard sets the flag; dropping it puts back whatever value was
/// there before, so nested guards unwind correctly and the flag is restored
/// on early return and on panic.
#[derive(Debug)]
#[must_use = "abort suppression ends as soon as the guard is dropped"]
pub struct AbortGuard {
    flag: &'static AtomicBool,
    previous: bool,
}

impl AbortGuard {
    /// Suppress aborts for the whole process.
    pub fn suppress() -> Self {
        Self::on(&ABORT_SUPPRESSED)
    }

    fn on(flag: &'static AtomicBool) -> Self {
        let previous = flag.swap(true, Ordering::SeqCst);
        tracing::trace!(previous, "abort suppression on");
        Self { flag, previous }
    }

    /// The flag value that will be restored on drop.
    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl Drop for AbortGuard {
    fn drop(&mut self) {
        self.flag.store(self.previous, Ordering::SeqCst);
        tracing::trace!(restored = self.previous, "abort suppression off");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Writer tests toggle the process-wide flag concurrently, so these run
    // against private ones.
    static FLAG: AtomicBool = AtomicBool::new(false);
    static WAIT_FLAG: AtomicBool = AtomicBool::new(false);

    fn set() -> bool {
        FLAG.load(Ordering::SeqCst)
    }

    #[test]
    fn test_guard_sets_and_restores() {
        assert!(!set());
        {
            let outer = AbortGuard::on(&FLAG);
            assert!(!outer.previous());
            assert!(set());
            {
                let inner = AbortGuard::on(&FLAG);
                assert!(inner.previous());
                assert!(set());
            }
            // Inner guard restores "suppressed", not "clear"
            assert!(set());
        }
        assert!(!set());

        let result = std::panic::catch_unwind(|| {
            let _guard = AbortGuard::on(&FLAG);
            panic!("tool blew up");
        });
        assert!(result.is_err());
        assert!(!set());
    }

    #[test]
    fn test_wait_returns_immediately_when_clear() {
        static CLEAR: AtomicBool = AtomicBool::new(false);
        assert!(!wait_on(&CLEAR, Duration::from_millis(1)));
    }

    #[test]
    fn test_wait_blocks_until_guard_drops() {
        let guard = AbortGuard::on(&WAIT_FLAG);
        let (held_tx, held_rx) = std::sync::mpsc::channel();
        let holder = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            held_tx.send(()).unwrap();
            drop(guard);
        });

        assert!(wait_on(&WAIT_FLAG, Duration::from_millis(1)));
        // The guard was still held for at least the sleep above
        assert!(held_rx.try_recv().is_ok());
        assert!(!WAIT_FLAG.load(Ordering::SeqCst));
        holder.join().unwrap();
    }
}
