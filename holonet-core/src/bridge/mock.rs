//! Mock game bridge for testing
//!
//! MockBridge records every command in order and answers from scripted
//! queues, falling back to success when a queue is empty. Start replies can
//! be held back to reproduce races between a start and later triggers.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{Semaphore, broadcast};

use super::traits::GameBridge;
use crate::capture::CaptureErrorKind;
use crate::error::BridgeError;
use crate::hook::HookNotification;
use crate::submit::OutboundMessageBatch;

/// A command received by the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeCall {
    BeginHookAttempt,
    StartCapture,
    StopCapture,
    SubmitMessages {
        batch: OutboundMessageBatch,
        retry: bool,
    },
    OpenExternalLink(String),
}

/// Scripted implementation of GameBridge
pub struct MockBridge {
    calls: Mutex<Vec<BridgeCall>>,
    start_results: Mutex<VecDeque<Result<(), CaptureErrorKind>>>,
    submit_results: Mutex<VecDeque<Result<(), String>>>,
    stop_fails: Mutex<bool>,
    hold_starts: Mutex<bool>,
    start_gate: Semaphore,
    hook_tx: broadcast::Sender<HookNotification>,
}

impl MockBridge {
    pub fn new() -> Self {
        let (hook_tx, _) = broadcast::channel(16);
        Self {
            calls: Mutex::new(Vec::new()),
            start_results: Mutex::new(VecDeque::new()),
            submit_results: Mutex::new(VecDeque::new()),
            stop_fails: Mutex::new(false),
            hold_starts: Mutex::new(false),
            start_gate: Semaphore::new(0),
            hook_tx,
        }
    }

    /// Queue the reply for the next start_capture
    pub fn queue_start_result(&self, result: Result<(), CaptureErrorKind>) {
        lock(&self.start_results).push_back(result);
    }

    /// Queue the reply for the next submit_messages
    pub fn queue_submit_result(&self, result: Result<(), String>) {
        lock(&self.submit_results).push_back(result);
    }

    /// Make every stop_capture fail
    pub fn fail_stops(&self) {
        *lock(&self.stop_fails) = true;
    }

    /// Hold start replies until [`MockBridge::release_start`] is called
    pub fn hold_starts(&self) {
        *lock(&self.hold_starts) = true;
    }

    /// Let one held start reply through
    pub fn release_start(&self) {
        self.start_gate.add_permits(1);
    }

    /// Send a hooked-status notification as the bridge would
    pub fn announce_hooked(&self, hooked_in: bool) {
        let _ = self.hook_tx.send(HookNotification::new(hooked_in));
    }

    /// Every command received, oldest first
    pub fn calls(&self) -> Vec<BridgeCall> {
        lock(&self.calls).clone()
    }

    pub fn start_calls(&self) -> usize {
        self.count(|call| matches!(call, BridgeCall::StartCapture))
    }

    pub fn stop_calls(&self) -> usize {
        self.count(|call| matches!(call, BridgeCall::StopCapture))
    }

    pub fn hook_attempts(&self) -> usize {
        self.count(|call| matches!(call, BridgeCall::BeginHookAttempt))
    }

    /// Submitted batches with their retry flags
    pub fn submissions(&self) -> Vec<(OutboundMessageBatch, bool)> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                BridgeCall::SubmitMessages { batch, retry } => Some((batch.clone(), *retry)),
                _ => None,
            })
            .collect()
    }

    /// Yield until at least `n` start commands have been received
    pub async fn wait_for_start_calls(&self, n: usize) {
        while self.start_calls() < n {
            tokio::task::yield_now().await;
        }
    }

    fn count(&self, predicate: impl Fn(&BridgeCall) -> bool) -> usize {
        lock(&self.calls).iter().filter(|call| predicate(call)).count()
    }

    fn record(&self, call: BridgeCall) {
        lock(&self.calls).push(call);
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[async_trait]
impl GameBridge for MockBridge {
    async fn begin_hook_attempt(&self) -> Result<(), BridgeError> {
        self.record(BridgeCall::BeginHookAttempt);
        Ok(())
    }

    fn hook_notifications(&self) -> broadcast::Receiver<HookNotification> {
        self.hook_tx.subscribe()
    }

    async fn start_capture(&self) -> Result<(), CaptureErrorKind> {
        self.record(BridgeCall::StartCapture);

        let held = *lock(&self.hold_starts);
        if held && let Ok(permit) = self.start_gate.acquire().await {
            permit.forget();
        }

        lock(&self.start_results).pop_front().unwrap_or(Ok(()))
    }

    async fn stop_capture(&self) -> Result<(), BridgeError> {
        self.record(BridgeCall::StopCapture);
        if *lock(&self.stop_fails) {
            return Err(BridgeError::CommandFailed("capture not running".to_string()));
        }
        Ok(())
    }

    async fn submit_messages(&self, batch: OutboundMessageBatch, retry: bool) -> Result<(), String> {
        self.record(BridgeCall::SubmitMessages { batch, retry });
        lock(&self.submit_results).pop_front().unwrap_or(Ok(()))
    }

    async fn open_external_link(&self, url: &str) -> Result<(), BridgeError> {
        self.record(BridgeCall::OpenExternalLink(url.to_string()));
        Ok(())
    }
}
