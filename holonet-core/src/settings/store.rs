//! Settings store: current settings, persistence and change broadcast

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use super::persistence::SettingsPersistence;
use super::types::Settings;
use crate::error::PersistenceError;
use crate::store::{Observable, SubscriptionId};

enum PersistJob {
    Save(Settings),
    Flush(oneshot::Sender<()>),
}

/// Owner of the process-wide settings record
///
/// Every change (replacement or in-place update) is queued for persistence
/// and then broadcast synchronously to subscribers in subscription order.
/// Writes reach the persistence collaborator in change order.
///
/// Must be created from within a Tokio runtime.
#[derive(Clone)]
pub struct SettingsStore {
    value: Observable<Settings>,
    persistence: Arc<dyn SettingsPersistence>,
    persist_tx: mpsc::UnboundedSender<PersistJob>,
}

impl SettingsStore {
    /// Create a store holding default settings
    pub fn new(persistence: Arc<dyn SettingsPersistence>) -> Self {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_persist_worker(Arc::clone(&persistence), persist_rx));
        Self {
            value: Observable::new(Settings::default()),
            persistence,
            persist_tx,
        }
    }

    /// Snapshot of the current settings
    pub fn get(&self) -> Settings {
        self.value.get()
    }

    /// Register a change handler
    pub fn subscribe(
        &self,
        handler: impl Fn(&Settings) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.value.subscribe(handler)
    }

    pub fn subscriber_count(&self) -> usize {
        self.value.subscriber_count()
    }

    /// Replace the whole record
    pub fn replace(&self, settings: Settings) {
        self.update(|current| *current = settings);
    }

    /// Mutate the record in place
    ///
    /// The write is queued while the record is still locked, so concurrent
    /// updates are neither lost nor persisted out of order.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        self.value.update(|current| {
            f(current);
            self.queue_persist(current.clone());
        });
    }

    /// Load settings from the persistence collaborator and replace the record
    ///
    /// On failure the current value is kept and the error returned.
    pub async fn load(&self) -> Result<(), PersistenceError> {
        match self.persistence.load_settings().await {
            Ok(settings) => {
                debug!("Loaded settings");
                self.replace(settings);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load settings, keeping current values: {}", e);
                Err(e)
            }
        }
    }

    /// Wait until every queued write has been handed to the collaborator
    pub async fn flush(&self) {
        let (tx, rx) = oneshot::channel();
        if self.persist_tx.send(PersistJob::Flush(tx)).is_ok() {
            let _ = rx.await;
        }
    }

    fn queue_persist(&self, settings: Settings) {
        if self.persist_tx.send(PersistJob::Save(settings)).is_err() {
            warn!("Settings persistence worker stopped; change not saved");
        }
    }
}

async fn run_persist_worker(
    persistence: Arc<dyn SettingsPersistence>,
    mut rx: mpsc::UnboundedReceiver<PersistJob>,
) {
    while let Some(job) = rx.recv().await {
        match job {
            PersistJob::Save(settings) => {
                if let Err(e) = persistence.persist_settings(settings).await {
                    warn!("Failed to persist settings: {}", e);
                }
            }
            PersistJob::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
