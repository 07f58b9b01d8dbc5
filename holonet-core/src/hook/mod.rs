//! Hook status: whether the game process is currently attached

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::store::{Observable, SubscriptionId};

/// Inbound "hooked status changed" notification from the game bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookNotification {
    pub hooked_in: bool,
}

impl HookNotification {
    pub fn new(hooked_in: bool) -> Self {
        Self { hooked_in }
    }
}

/// Holds the hooked-in flag; only bridge notifications change it
///
/// The bridge re-announces its status periodically, so a notification that
/// repeats the current value is absorbed without notifying subscribers.
#[derive(Clone, Default)]
pub struct HookStatusTracker {
    hooked_in: Observable<bool>,
}

impl HookStatusTracker {
    /// A tracker that starts unhooked
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hooked(&self) -> bool {
        self.hooked_in.get()
    }

    pub fn subscribe(&self, handler: impl Fn(&bool) + Send + Sync + 'static) -> SubscriptionId {
        self.hooked_in.subscribe(handler)
    }

    /// Apply an inbound notification. Returns whether the status changed.
    pub fn apply_notification(&self, notification: HookNotification) -> bool {
        let changed = self.hooked_in.set_if_changed(notification.hooked_in);
        if changed {
            info!("Game hook status changed: hooked_in={}", notification.hooked_in);
        }
        changed
    }

    /// Forward notifications from the bridge until its channel closes
    pub fn listen(&self, mut rx: broadcast::Receiver<HookNotification>) -> JoinHandle<()> {
        let tracker = self.clone();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(notification) => {
                        tracker.apply_notification(notification);
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Only the latest status matters
                        warn!("Hook listener lagged, skipped {} notifications", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => {
                        debug!("Hook notification channel closed");
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn starts_unhooked() {
        assert!(!HookStatusTracker::new().is_hooked());
    }

    #[test]
    fn notification_changes_status_and_notifies() {
        let tracker = HookStatusTracker::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        tracker.subscribe(move |hooked| sink.lock().unwrap().push(*hooked));

        assert!(tracker.apply_notification(HookNotification::new(true)));
        assert!(tracker.is_hooked());
        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[test]
    fn repeated_status_is_absorbed() {
        let tracker = HookStatusTracker::new();
        let seen = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&seen);
        tracker.subscribe(move |_| *counter.lock().unwrap() += 1);

        tracker.apply_notification(HookNotification::new(false));
        tracker.apply_notification(HookNotification::new(true));
        tracker.apply_notification(HookNotification::new(true));
        tracker.apply_notification(HookNotification::new(true));
        tracker.apply_notification(HookNotification::new(false));

        assert_eq!(*seen.lock().unwrap(), 2);
    }

    #[test]
    fn notification_payload_matches_bridge_format() {
        let parsed: HookNotification = serde_json::from_str(r#"{"hooked_in":true}"#).unwrap();
        assert!(parsed.hooked_in);
    }

    #[tokio::test]
    async fn listener_forwards_until_closed() {
        let tracker = HookStatusTracker::new();
        let (tx, rx) = broadcast::channel(8);
        let handle = tracker.listen(rx);

        tx.send(HookNotification::new(true)).unwrap();
        drop(tx);
        handle.await.unwrap();

        assert!(tracker.is_hooked());
    }
}
