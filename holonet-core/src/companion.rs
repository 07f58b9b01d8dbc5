//! Companion: wires the core together and exposes the user-facing operations
//!
//! All subscriptions are registered exactly once, in [`Companion::start`].
//! Loading settings again later only replaces the record.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use crate::bridge::GameBridge;
use crate::capture::{CaptureCoordinator, CaptureStatus, ReconcileTrigger};
use crate::error::HolonetError;
use crate::hook::HookStatusTracker;
use crate::notices::{Notice, NoticeFeed};
use crate::settings::{Settings, SettingsPersistence, SettingsStore};
use crate::submit::{MessageSubmitter, MessageType, SubmitError};

/// The running synchronization core
pub struct Companion {
    bridge: Arc<dyn GameBridge>,
    settings: SettingsStore,
    hook: HookStatusTracker,
    coordinator: CaptureCoordinator,
    submitter: MessageSubmitter,
    notices: NoticeFeed,
    hook_listener: JoinHandle<()>,
    tasks: TaskTracker,
}

impl Companion {
    /// Initialise every component, load settings and start hooking the game
    ///
    /// A failed settings load is logged and the defaults stay in effect.
    pub async fn start(
        bridge: Arc<dyn GameBridge>,
        persistence: Arc<dyn SettingsPersistence>,
    ) -> Self {
        Self::start_with_notices(bridge, persistence, NoticeFeed::default()).await
    }

    /// Like [`Companion::start`], publishing to an existing notice feed
    ///
    /// Subscribe to `notices` beforehand to observe outcomes of startup itself.
    pub async fn start_with_notices(
        bridge: Arc<dyn GameBridge>,
        persistence: Arc<dyn SettingsPersistence>,
        notices: NoticeFeed,
    ) -> Self {
        let settings = SettingsStore::new(persistence);
        let hook = HookStatusTracker::new();
        let coordinator = CaptureCoordinator::new(
            Arc::clone(&bridge),
            settings.clone(),
            hook.clone(),
            notices.clone(),
        );
        let submitter = MessageSubmitter::new(Arc::clone(&bridge), settings.clone(), hook.clone());

        coordinator.watch_inputs();
        let hook_listener = hook.listen(bridge.hook_notifications());

        let companion = Self {
            bridge,
            settings,
            hook,
            coordinator,
            submitter,
            notices,
            hook_listener,
            tasks: TaskTracker::new(),
        };

        companion.begin_hook_attempt();
        if let Err(e) = companion.settings.load().await {
            warn!("Using default settings: {}", e);
        }
        companion.coordinator.reconcile(ReconcileTrigger::Startup);

        info!("Companion started");
        companion
    }

    fn begin_hook_attempt(&self) {
        let bridge = Arc::clone(&self.bridge);
        self.tasks.spawn(async move {
            if let Err(e) = bridge.begin_hook_attempt().await {
                warn!("Failed to begin hook attempt: {}", e);
            }
        });
    }

    pub fn settings(&self) -> Settings {
        self.settings.get()
    }

    /// The settings store, for subscribing or replacing the record
    pub fn settings_store(&self) -> &SettingsStore {
        &self.settings
    }

    /// Edit settings in place; the change is persisted and broadcast
    pub fn update_settings(&self, f: impl FnOnce(&mut Settings)) {
        self.settings.update(f);
    }

    /// Load settings from storage again
    pub async fn reload_settings(&self) -> Result<(), HolonetError> {
        self.settings.load().await?;
        Ok(())
    }

    pub fn is_hooked(&self) -> bool {
        self.hook.is_hooked()
    }

    pub fn capture_status(&self) -> CaptureStatus {
        self.coordinator.status()
    }

    /// Subscribe to user-visible notices
    pub fn notices(&self) -> broadcast::Receiver<Notice> {
        self.notices.subscribe()
    }

    /// Validate and submit messages to the game
    ///
    /// Failures are returned and also published as error notices.
    pub async fn submit(
        &self,
        message_type: MessageType,
        messages: Vec<String>,
    ) -> Result<(), SubmitError> {
        let result = self.submitter.submit(message_type, messages).await;
        if let Err(e) = &result {
            self.notices.error(e.to_string());
        }
        result
    }

    /// Open a link in the user's browser
    pub fn open_link(&self, url: impl Into<String>) {
        let bridge = Arc::clone(&self.bridge);
        let url = url.into();
        self.tasks.spawn(async move {
            if let Err(e) = bridge.open_external_link(&url).await {
                debug!("Failed to open link {}: {}", url, e);
            }
        });
    }

    /// Wait for in-flight bridge commands and queued settings writes
    pub async fn settle(&self) {
        self.tasks.close();
        self.tasks.wait().await;
        self.tasks.reopen();
        self.coordinator.settle().await;
        self.settings.flush().await;
    }

    /// Stop listening for hook notifications and stop capture if running
    pub async fn shutdown(&self) {
        self.hook_listener.abort();
        self.coordinator.shutdown().await;
        self.settings.flush().await;
        info!("Companion stopped");
    }
}

impl Drop for Companion {
    fn drop(&mut self) {
        self.hook_listener.abort();
    }
}
