//! Shared helpers for holonet-core integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use holonet_core::{Companion, MemorySettings, MockBridge, Notice, NoticeFeed, Settings};
use tokio::sync::broadcast;

pub struct TestCompanion {
    pub companion: Companion,
    pub bridge: Arc<MockBridge>,
    pub storage: Arc<MemorySettings>,
    pub notices: broadcast::Receiver<Notice>,
}

/// Start a companion over a fresh mock bridge and the given storage
pub async fn start_with(storage: MemorySettings, bridge: MockBridge) -> TestCompanion {
    let bridge = Arc::new(bridge);
    let storage = Arc::new(storage);
    let feed = NoticeFeed::default();
    let notices = feed.subscribe();
    let companion = Companion::start_with_notices(bridge.clone(), storage.clone(), feed).await;
    TestCompanion {
        companion,
        bridge,
        storage,
        notices,
    }
}

pub async fn start_default() -> TestCompanion {
    start_with(MemorySettings::new(), MockBridge::new()).await
}

pub fn settings_with_capture(capture: bool) -> Settings {
    let mut settings = Settings::default();
    settings.chat_log.capture_chat_log = capture;
    settings
}

/// Poll `condition`, yielding to other tasks, until it holds or a second passes
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached in time");
}

/// Announce a hook status and wait until the companion has applied it
pub async fn set_hooked(t: &TestCompanion, hooked_in: bool) {
    t.bridge.announce_hooked(hooked_in);
    wait_until(|| t.companion.is_hooked() == hooked_in).await;
}

pub fn drain(rx: &mut broadcast::Receiver<Notice>) -> Vec<Notice> {
    let mut notices = Vec::new();
    while let Ok(notice) = rx.try_recv() {
        notices.push(notice);
    }
    notices
}

pub fn error_messages(rx: &mut broadcast::Receiver<Notice>) -> Vec<String> {
    drain(rx)
        .into_iter()
        .filter(|n| n.is_error())
        .map(|n| n.message)
        .collect()
}
