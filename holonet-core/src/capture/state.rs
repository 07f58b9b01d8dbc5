//! Capture reconciliation state machine
//!
//! Pure bookkeeping: decides which command to issue for the current inputs
//! and how to interpret a start reply. The coordinator executes the
//! decisions.

use serde::{Deserialize, Serialize};

use super::error::CaptureErrorKind;

/// What caused a reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileTrigger {
    /// Initial reconciliation after startup
    Startup,
    /// The settings record changed
    SettingsChanged,
    /// The hook status changed
    HookStatusChanged,
}

/// Whether a reportable start failure reaches the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReporting {
    Surface,
    /// Speculative start while unhooked; expected to fail
    Quiet,
}

/// Command the coordinator should issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAction {
    None,
    Start {
        generation: u64,
        reporting: FailureReporting,
    },
    Stop,
}

/// Interpretation of a start reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartResolution {
    /// Capture is now believed active
    Activated,
    /// Success for a capture already believed active
    AlreadyActive,
    /// Failure the user should see
    Report(CaptureErrorKind),
    /// Failure dropped silently
    Suppressed(CaptureErrorKind),
    /// Reply to a start invalidated before it resolved
    Stale,
    /// Stale success while capture is no longer wanted; stop it again
    StaleStop,
}

/// Snapshot of the coordinator's belief
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaptureStatus {
    /// Capture subprocess believed running
    pub active: bool,
    /// A start command is outstanding
    pub start_pending: bool,
    /// Bumped whenever the coordinator drives toward inactive
    pub generation: u64,
}

/// Believed capture state plus the staleness guard for start replies
#[derive(Debug, Default)]
pub struct CaptureState {
    status: CaptureStatus,
}

impl CaptureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> CaptureStatus {
        self.status
    }

    /// Decide the minimal corrective command for the current inputs
    pub fn plan(&mut self, hooked_in: bool, desired: bool, trigger: ReconcileTrigger) -> CaptureAction {
        let status = &mut self.status;

        if status.active {
            if hooked_in && desired {
                return CaptureAction::None;
            }
            status.active = false;
            status.start_pending = false;
            status.generation += 1;
            return CaptureAction::Stop;
        }

        if !desired {
            if status.start_pending {
                status.start_pending = false;
                status.generation += 1;
            }
            return CaptureAction::None;
        }

        if status.start_pending {
            if !hooked_in && trigger == ReconcileTrigger::HookStatusChanged {
                // Game went away while a start was in flight
                status.start_pending = false;
                status.generation += 1;
            }
            return CaptureAction::None;
        }

        let reporting = if !hooked_in && trigger == ReconcileTrigger::HookStatusChanged {
            FailureReporting::Quiet
        } else {
            FailureReporting::Surface
        };
        status.start_pending = true;
        CaptureAction::Start {
            generation: status.generation,
            reporting,
        }
    }

    /// Apply a start reply issued under `generation`
    ///
    /// `wanted` is whether capture should run given the inputs at the time
    /// the reply arrives.
    pub fn resolve_start(
        &mut self,
        generation: u64,
        reporting: FailureReporting,
        result: Result<(), CaptureErrorKind>,
        wanted: bool,
    ) -> StartResolution {
        let status = &mut self.status;

        if generation != status.generation {
            return match result {
                Ok(()) if wanted => {
                    // A newer start may still be outstanding; its reply clears the flag
                    if status.active {
                        StartResolution::AlreadyActive
                    } else {
                        status.active = true;
                        StartResolution::Activated
                    }
                }
                Ok(()) => StartResolution::StaleStop,
                Err(_) => StartResolution::Stale,
            };
        }

        status.start_pending = false;
        match result {
            Ok(()) if status.active => StartResolution::AlreadyActive,
            Ok(()) => {
                status.active = true;
                StartResolution::Activated
            }
            // An adopted earlier start already runs capture
            Err(kind) if kind.is_benign() || status.active => StartResolution::Suppressed(kind),
            Err(kind) => match reporting {
                FailureReporting::Surface => StartResolution::Report(kind),
                FailureReporting::Quiet => StartResolution::Suppressed(kind),
            },
        }
    }

    /// Drive toward inactive regardless of inputs (shutdown)
    ///
    /// Returns whether a stop should be issued.
    pub fn force_inactive(&mut self) -> bool {
        let status = &mut self.status;
        let was_active = status.active;
        status.active = false;
        status.start_pending = false;
        status.generation += 1;
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ReconcileTrigger::*;

    fn start_at(generation: u64) -> CaptureAction {
        CaptureAction::Start {
            generation,
            reporting: FailureReporting::Surface,
        }
    }

    fn active_state() -> CaptureState {
        let mut state = CaptureState::new();
        state.plan(true, true, SettingsChanged);
        state.resolve_start(0, FailureReporting::Surface, Ok(()), true);
        assert!(state.status().active);
        state
    }

    #[test]
    fn hooked_and_desired_starts_once() {
        let mut state = CaptureState::new();
        assert_eq!(state.plan(true, true, SettingsChanged), start_at(0));
        assert_eq!(state.plan(true, true, SettingsChanged), CaptureAction::None);
        assert_eq!(state.plan(true, true, HookStatusChanged), CaptureAction::None);
        assert!(state.status().start_pending);
    }

    #[test]
    fn active_and_desired_is_noop() {
        let mut state = active_state();
        assert_eq!(state.plan(true, true, HookStatusChanged), CaptureAction::None);
        assert!(state.status().active);
    }

    #[test]
    fn undesired_while_active_stops() {
        let mut state = active_state();
        assert_eq!(state.plan(true, false, SettingsChanged), CaptureAction::Stop);
        assert!(!state.status().active);
        assert_eq!(state.plan(true, false, SettingsChanged), CaptureAction::None);
    }

    #[test]
    fn unhooked_while_active_stops_exactly_once() {
        let mut state = active_state();
        assert_eq!(state.plan(false, true, HookStatusChanged), CaptureAction::Stop);
        assert!(!state.status().active);
        // Still unhooked: the quiet speculative start row applies, never a second stop
        let next = state.plan(false, true, HookStatusChanged);
        assert_ne!(next, CaptureAction::Stop);
    }

    #[test]
    fn unhooked_desired_from_hook_trigger_starts_quietly() {
        let mut state = CaptureState::new();
        assert_eq!(
            state.plan(false, true, HookStatusChanged),
            CaptureAction::Start {
                generation: 0,
                reporting: FailureReporting::Quiet,
            }
        );
    }

    #[test]
    fn unhooked_desired_from_settings_trigger_reports() {
        let mut state = CaptureState::new();
        assert_eq!(state.plan(false, true, SettingsChanged), start_at(0));
    }

    #[test]
    fn undesired_and_inactive_is_noop() {
        let mut state = CaptureState::new();
        assert_eq!(state.plan(true, false, SettingsChanged), CaptureAction::None);
        assert_eq!(state.plan(false, false, HookStatusChanged), CaptureAction::None);
        assert_eq!(state.status(), CaptureStatus::default());
    }

    #[test]
    fn success_activates() {
        let mut state = CaptureState::new();
        state.plan(true, true, Startup);
        let resolution = state.resolve_start(0, FailureReporting::Surface, Ok(()), true);
        assert_eq!(resolution, StartResolution::Activated);
        assert!(state.status().active);
        assert!(!state.status().start_pending);
    }

    #[test]
    fn benign_failures_are_suppressed_and_retry_on_next_trigger() {
        for kind in [CaptureErrorKind::AlreadyInjected, CaptureErrorKind::NotYetFullyReady] {
            let mut state = CaptureState::new();
            state.plan(true, true, SettingsChanged);
            let resolution = state.resolve_start(0, FailureReporting::Surface, Err(kind), true);
            assert_eq!(resolution, StartResolution::Suppressed(kind));
            assert!(!state.status().active);
            assert_eq!(state.plan(true, true, HookStatusChanged), start_at(0));
        }
    }

    #[test]
    fn reportable_failures_are_reported() {
        for kind in [
            CaptureErrorKind::SwtorNotRunning,
            CaptureErrorKind::WrongGuiSettings,
            CaptureErrorKind::UnsupportedVersion,
        ] {
            let mut state = CaptureState::new();
            state.plan(false, true, SettingsChanged);
            let resolution = state.resolve_start(0, FailureReporting::Surface, Err(kind), true);
            assert_eq!(resolution, StartResolution::Report(kind));
            assert!(!state.status().active);
        }
    }

    #[test]
    fn quiet_start_failures_are_suppressed() {
        let mut state = CaptureState::new();
        state.plan(false, true, HookStatusChanged);
        let resolution = state.resolve_start(
            0,
            FailureReporting::Quiet,
            Err(CaptureErrorKind::SwtorNotRunning),
            true,
        );
        assert_eq!(
            resolution,
            StartResolution::Suppressed(CaptureErrorKind::SwtorNotRunning)
        );
    }

    #[test]
    fn disconnect_invalidates_pending_start() {
        let mut state = CaptureState::new();
        assert_eq!(state.plan(true, true, HookStatusChanged), start_at(0));

        // Game disconnects before the reply
        assert_eq!(state.plan(false, true, HookStatusChanged), CaptureAction::None);
        assert_eq!(state.status().generation, 1);
        assert!(!state.status().start_pending);

        // Late success must not flip the belief
        let resolution = state.resolve_start(0, FailureReporting::Surface, Ok(()), false);
        assert_eq!(resolution, StartResolution::StaleStop);
        assert!(!state.status().active);
    }

    #[test]
    fn disabling_capture_invalidates_pending_start() {
        let mut state = CaptureState::new();
        state.plan(true, true, SettingsChanged);
        assert_eq!(state.plan(true, false, SettingsChanged), CaptureAction::None);

        let resolution = state.resolve_start(0, FailureReporting::Surface, Ok(()), false);
        assert_eq!(resolution, StartResolution::StaleStop);
        assert!(!state.status().active);
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut state = CaptureState::new();
        state.plan(true, true, SettingsChanged);
        state.plan(true, false, SettingsChanged);

        let resolution = state.resolve_start(
            0,
            FailureReporting::Surface,
            Err(CaptureErrorKind::UnsupportedVersion),
            false,
        );
        assert_eq!(resolution, StartResolution::Stale);
    }

    #[test]
    fn stale_success_is_adopted_when_capture_is_wanted_again() {
        let mut state = CaptureState::new();
        state.plan(true, true, HookStatusChanged);
        state.plan(false, true, HookStatusChanged);
        // Hook comes back; a fresh start is issued under the new generation
        assert_eq!(state.plan(true, true, HookStatusChanged), start_at(1));

        let resolution = state.resolve_start(0, FailureReporting::Surface, Ok(()), true);
        assert_eq!(resolution, StartResolution::Activated);
        assert!(state.status().active);
        assert!(state.status().start_pending);

        // The fresh start then reports the payload is already there
        let resolution = state.resolve_start(
            1,
            FailureReporting::Surface,
            Err(CaptureErrorKind::AlreadyInjected),
            true,
        );
        assert_eq!(
            resolution,
            StartResolution::Suppressed(CaptureErrorKind::AlreadyInjected)
        );
        assert!(state.status().active);
        assert!(!state.status().start_pending);
    }

    #[test]
    fn failure_after_adopted_start_is_not_reported() {
        let mut state = CaptureState::new();
        state.plan(true, true, HookStatusChanged);
        state.plan(false, true, HookStatusChanged);
        assert_eq!(state.plan(true, true, HookStatusChanged), start_at(1));
        state.resolve_start(0, FailureReporting::Surface, Ok(()), true);

        let resolution = state.resolve_start(
            1,
            FailureReporting::Surface,
            Err(CaptureErrorKind::WrongGuiSettings),
            true,
        );
        assert_eq!(
            resolution,
            StartResolution::Suppressed(CaptureErrorKind::WrongGuiSettings)
        );
        assert!(state.status().active);
        assert!(!state.status().start_pending);
    }

    #[test]
    fn force_inactive_reports_whether_to_stop() {
        let mut state = active_state();
        assert!(state.force_inactive());
        assert!(!state.force_inactive());
        assert!(!state.status().active);
    }
}
