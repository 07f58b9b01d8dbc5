//! Chat log capture coordination

pub mod coordinator;
pub mod error;
pub mod state;

pub use coordinator::{CaptureCoordinator, InputSubscriptions};
pub use error::CaptureErrorKind;
pub use state::{
    CaptureAction, CaptureState, CaptureStatus, FailureReporting, ReconcileTrigger,
    StartResolution,
};
