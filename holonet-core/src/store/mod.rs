//! Reactive values shared between the companion's components

pub mod observable;

pub use observable::{Observable, SubscriptionId};
