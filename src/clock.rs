//! Prompt clock
//!
//! A background task republishes the local `HH:MM` label on a fixed
//! interval. It owns nothing but its channel: message state is never touched
//! from here. The task stops once every receiver is gone.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::renderer::clock_label;

/// Handle to a running clock task
#[derive(Debug)]
pub struct Clock {
    label: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl Clock {
    /// Spawn the clock on the current runtime
    ///
    /// The label is available immediately and refreshed every `every`.
    pub fn spawn(every: Duration) -> Self {
        let (tx, label) = watch::channel(clock_label());
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the initial label is already set.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tx.send(clock_label()).is_err() {
                    tracing::debug!("Clock has no listeners, stopping");
                    break;
                }
            }
        });
        Self { label, task }
    }

    /// Most recently published label
    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    /// A receiver that observes every refresh
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.label.clone()
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.task.abort();
    }
}
