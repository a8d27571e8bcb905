//! Background idle-session sweeper.

use std::sync::{Arc, Weak};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use scribe_core::{ScribeError, ScribeResult};
use tracing::debug;

use super::StoreInner;

/// Owns the sweeper thread. Stopping (or dropping) wakes the thread and
/// joins it.
pub(crate) struct Sweeper {
    signal: Arc<(Mutex<bool>, Condvar)>,
    handle: Option<JoinHandle<()>>,
}

impl Sweeper {
    /// Spawn a thread that runs `evict_idle` every `interval`.
    ///
    /// The thread holds only a weak reference to the store and exits on its
    /// own once the store is gone.
    pub(crate) fn spawn(store: Weak<StoreInner>, interval: Duration) -> ScribeResult<Self> {
        let signal = Arc::new((Mutex::new(false), Condvar::new()));
        let thread_signal = Arc::clone(&signal);

        let handle = std::thread::Builder::new()
            .name("scribe-session-sweeper".to_string())
            .spawn(move || {
                let (stopped, wake) = &*thread_signal;
                loop {
                    {
                        let mut stopped = stopped.lock();
                        if !*stopped {
                            wake.wait_for(&mut stopped, interval);
                        }
                        if *stopped {
                            break;
                        }
                    }
                    let Some(store) = store.upgrade() else {
                        break;
                    };
                    let evicted = store.evict_idle(Instant::now());
                    if !evicted.is_empty() {
                        debug!(target: "scribe::session", count = evicted.len(), "Sweeper evicted idle sessions");
                    }
                }
            })
            .map_err(|e| {
                ScribeError::Internal(format!("failed to spawn session sweeper thread: {}", e))
            })?;

        Ok(Self {
            signal,
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to exit.
    pub(crate) fn stop(&mut self) {
        let (stopped, wake) = &*self.signal;
        *stopped.lock() = true;
        wake.notify_all();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.stop();
    }
}
