//! Capture coordinator: keeps the capture subprocess in line with
//! (hook status, capture setting)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use super::error::CaptureErrorKind;
use super::state::{
    CaptureAction, CaptureState, CaptureStatus, FailureReporting, ReconcileTrigger,
    StartResolution,
};
use crate::bridge::GameBridge;
use crate::hook::HookStatusTracker;
use crate::notices::NoticeFeed;
use crate::settings::SettingsStore;
use crate::store::SubscriptionId;

/// Subscriptions registered by [`CaptureCoordinator::watch_inputs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSubscriptions {
    pub settings: SubscriptionId,
    pub hook: SubscriptionId,
}

/// Reconciles the believed capture state against the current inputs
///
/// Commands run as background tasks so a slow bridge reply only delays its
/// own resolution; new triggers are evaluated immediately. Cloning yields
/// another handle to the same coordinator.
///
/// Must be used from within a Tokio runtime.
#[derive(Clone)]
pub struct CaptureCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    bridge: Arc<dyn GameBridge>,
    settings: SettingsStore,
    hook: HookStatusTracker,
    notices: NoticeFeed,
    state: Mutex<CaptureState>,
    tasks: TaskTracker,
    watching: AtomicBool,
}

impl CaptureCoordinator {
    pub fn new(
        bridge: Arc<dyn GameBridge>,
        settings: SettingsStore,
        hook: HookStatusTracker,
        notices: NoticeFeed,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                bridge,
                settings,
                hook,
                notices,
                state: Mutex::new(CaptureState::new()),
                tasks: TaskTracker::new(),
                watching: AtomicBool::new(false),
            }),
        }
    }

    /// Subscribe to settings and hook changes
    ///
    /// Only the first call registers anything; later calls return `None`.
    pub fn watch_inputs(&self) -> Option<InputSubscriptions> {
        if self.inner.watching.swap(true, Ordering::SeqCst) {
            debug!("Capture coordinator already watching its inputs");
            return None;
        }

        let weak = Arc::downgrade(&self.inner);
        let settings = self.inner.settings.subscribe(move |_| {
            reconcile_weak(&weak, ReconcileTrigger::SettingsChanged);
        });

        let weak = Arc::downgrade(&self.inner);
        let hook = self.inner.hook.subscribe(move |_| {
            reconcile_weak(&weak, ReconcileTrigger::HookStatusChanged);
        });

        Some(InputSubscriptions { settings, hook })
    }

    /// Current belief about the capture subprocess
    pub fn status(&self) -> CaptureStatus {
        self.inner.lock_state().status()
    }

    pub fn is_active(&self) -> bool {
        self.status().active
    }

    /// Re-read both inputs and issue the minimal corrective command
    pub fn reconcile(&self, trigger: ReconcileTrigger) {
        self.inner.reconcile(trigger);
    }

    /// Wait for every in-flight capture command to resolve
    pub async fn settle(&self) {
        self.inner.tasks.close();
        self.inner.tasks.wait().await;
        self.inner.tasks.reopen();
    }

    /// Stop capture if it is believed running and wait for outstanding commands
    pub async fn shutdown(&self) {
        let stop = self.inner.lock_state().force_inactive();
        if stop {
            info!("Stopping chat log capture for shutdown");
            self.inner.spawn_stop();
        }
        self.settle().await;
    }
}

fn reconcile_weak(weak: &Weak<Inner>, trigger: ReconcileTrigger) {
    if let Some(inner) = weak.upgrade() {
        inner.reconcile(trigger);
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, CaptureState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn capture_wanted(&self) -> (bool, bool) {
        let hooked_in = self.hook.is_hooked();
        let desired = self.settings.get().chat_log.capture_chat_log;
        (hooked_in, desired)
    }

    fn reconcile(self: &Arc<Self>, trigger: ReconcileTrigger) {
        // Inputs are read under the state lock so no decision uses values
        // older than the last one applied
        let (hooked_in, desired, action) = {
            let mut state = self.lock_state();
            let (hooked_in, desired) = self.capture_wanted();
            (hooked_in, desired, state.plan(hooked_in, desired, trigger))
        };

        match action {
            CaptureAction::None => {}
            CaptureAction::Start {
                generation,
                reporting,
            } => {
                debug!(
                    "Starting chat log capture (trigger={:?}, hooked_in={}, generation={})",
                    trigger, hooked_in, generation
                );
                let inner = Arc::clone(self);
                self.tasks.spawn(async move {
                    let result = inner.bridge.start_capture().await;
                    inner.finish_start(generation, reporting, result);
                });
            }
            CaptureAction::Stop => {
                info!(
                    "Stopping chat log capture (trigger={:?}, hooked_in={}, desired={})",
                    trigger, hooked_in, desired
                );
                self.spawn_stop();
            }
        }
    }

    fn finish_start(
        &self,
        generation: u64,
        reporting: FailureReporting,
        result: Result<(), CaptureErrorKind>,
    ) {
        let resolution = {
            let mut state = self.lock_state();
            let (hooked_in, desired) = self.capture_wanted();
            state.resolve_start(generation, reporting, result, hooked_in && desired)
        };

        match resolution {
            StartResolution::Activated => {
                info!("Chat log capture started");
                self.notices.info("Chat logging active");
            }
            StartResolution::AlreadyActive => {
                debug!("Start reply for capture already believed active");
            }
            StartResolution::Report(kind) => {
                warn!("Failed to start chat log capture: {}", kind);
                self.notices
                    .error(format!("Failed to start chat log capture: {kind}"));
            }
            StartResolution::Suppressed(kind) => {
                debug!("Capture start refused ({}), waiting for next trigger", kind);
            }
            StartResolution::Stale => {
                debug!("Ignoring reply to superseded capture start");
            }
            StartResolution::StaleStop => {
                info!("Superseded capture start succeeded late, stopping it");
                self.spawn_stop();
            }
        }
    }

    fn spawn_stop(&self) {
        let bridge = Arc::clone(&self.bridge);
        self.tasks.spawn(async move {
            // Stopping a capture that is not running is not worth reporting
            if let Err(e) = bridge.stop_capture().await {
                debug!("Ignoring capture stop failure: {}", e);
            }
        });
    }
}
