//! Game bridge abstraction

pub mod mock;
pub mod traits;

pub use mock::{BridgeCall, MockBridge};
pub use traits::GameBridge;
