//! Periodic presence refresh.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::Directory;

/// Re-runs the presence enricher on a fixed period without re-fetching the
/// directory list.
///
/// Each tick reads the roster as it is at that moment, so newly loaded data is
/// picked up by the next cycle. The pass is awaited inside the timer loop and
/// the engine serializes passes internally, so a tick that fires while a pass
/// is still outstanding is deferred rather than run in parallel
/// (`MissedTickBehavior::Delay`).
pub struct RefreshScheduler {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    pub fn spawn(directory: Directory, period: Duration) -> Self {
        let (shutdown, mut stop) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; skip it, the initial load
            // already ran an enrichment pass.
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        tracing::debug!("Scheduled presence refresh");
                        directory.refresh_presence().await;
                    }
                    _ = stop.changed() => break,
                }
            }
        });

        Self { shutdown, handle }
    }

    /// Cancel the timer. No further passes are scheduled; an in-flight pass
    /// is abandoned and its results never published.
    pub fn shutdown(self) {
        let _ = self.shutdown.send(true);
        // Drop aborts the task.
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
