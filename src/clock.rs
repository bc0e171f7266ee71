use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Shared "now" refreshed by a repeating timer.
///
/// `start` and `stop` pair up; dropping the clock stops it as well.
pub struct Clock {
    now: Arc<watch::Sender<DateTime<Utc>>>,
    running: watch::Sender<bool>,
    ticker: Mutex<Option<JoinHandle<()>>>,
}

impl Clock {
    pub fn new() -> Self {
        let (now, _) = watch::channel(Utc::now());
        let (running, _) = watch::channel(false);
        Self {
            now: Arc::new(now),
            running,
            ticker: Mutex::new(None),
        }
    }

    /// Spawns the ticker. Calling it while already running does nothing.
    pub fn start(&self, period: Duration) {
        let mut ticker = self.ticker.lock().unwrap_or_else(PoisonError::into_inner);
        if ticker.is_some() {
            return;
        }

        let now = Arc::clone(&self.now);
        *ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                now.send_replace(Utc::now());
            }
        }));
        self.running.send_replace(true);
        debug!(?period, "clock started");
    }

    pub fn stop(&self) {
        let handle = self
            .ticker
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.abort();
            debug!("clock stopped");
        }
        self.running.send_replace(false);
    }

    pub fn is_running(&self) -> bool {
        *self.running.borrow()
    }

    pub fn now(&self) -> DateTime<Utc> {
        *self.now.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.now.subscribe()
    }

    pub fn watch_running(&self) -> watch::Receiver<bool> {
        self.running.subscribe()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.stop();
    }
}
