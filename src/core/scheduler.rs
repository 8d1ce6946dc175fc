use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(30);

/// Periodic trigger that sends a message into a command channel.
///
/// Fires once right away and then every `period`. Stopping (or dropping the
/// handle) cancels future ticks; a cycle already handed to the receiver is
/// not affected.
pub struct SyncScheduler {
    handle: JoinHandle<()>,
}

impl SyncScheduler {
    pub fn start<T>(period: Duration, tx: mpsc::Sender<T>, message: T) -> Self
    where
        T: Clone + Send + 'static,
    {
        // tokio::time::interval 不接受零週期
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if tx.send(message.clone()).await.is_err() {
                    tracing::debug!("Command channel closed, stopping sync scheduler");
                    break;
                }
            }
        });

        tracing::info!("⏱️ Periodic sync armed every {:?}", period);
        Self { handle }
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
