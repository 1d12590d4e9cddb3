//! Rotating status message shown while a request is pending.

use inbound_core::state::{LOADING_MESSAGES, STATUS_INTERVAL};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

/// Current status line; `None` while idle.
pub type Status = Option<&'static str>;

/// Publishes a cycling status message on a watch channel.
#[derive(Debug)]
pub struct StatusTicker {
    sender: watch::Sender<Status>,
    messages: &'static [&'static str],
    period: Duration,
}

impl Default for StatusTicker {
    fn default() -> Self {
        Self::new(&LOADING_MESSAGES, STATUS_INTERVAL)
    }
}

impl StatusTicker {
    pub fn new(messages: &'static [&'static str], period: Duration) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender,
            messages,
            period,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Status> {
        self.sender.subscribe()
    }

    /// Publishes the first message now and the next one every period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> RunningTicker {
        let Some(&first) = self.messages.first() else {
            return RunningTicker {
                handle: None,
                sender: self.sender.clone(),
            };
        };
        self.sender.send_replace(Some(first));

        let sender = self.sender.clone();
        let messages = self.messages;
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut index = 0;
            loop {
                ticker.tick().await;
                index = (index + 1) % messages.len();
                sender.send_replace(Some(messages[index]));
            }
        });

        RunningTicker {
            handle: Some(handle),
            sender: self.sender.clone(),
        }
    }
}

/// A started ticker. Call [`stop`](Self::stop) when the request resolves.
#[derive(Debug)]
pub struct RunningTicker {
    handle: Option<JoinHandle<()>>,
    sender: watch::Sender<Status>,
}

impl RunningTicker {
    /// Aborts the ticking task, waits for it to end and resets to idle.
    ///
    /// No message is published after this returns.
    pub async fn stop(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
        self.sender.send_replace(None);
    }
}

impl Drop for RunningTicker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            self.sender.send_replace(None);
        }
    }
}
