use crate::widget::VotingWidget;
use log::info;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(2000);

/// Owns the periodic results refresh. Stopping or dropping the handle ends
/// the loop; refreshes already in flight still finish.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn stop(&self) {
        if self.is_running() {
            info!("Stopping results refresh");
            self.task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Refreshes the results once right away, then every `period`.
///
/// Each tick spawns its own refresh, so a slow response never holds back
/// the next one.
pub fn start_refresh(widget: VotingWidget, period: Duration) -> RefreshHandle {
    info!("Starting results refresh every {:?}", period);

    let task = tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await; // first tick completes immediately
            let widget = widget.clone();
            tokio::spawn(async move {
                widget.update_results().await;
            });
        }
    });

    RefreshHandle { task }
}
