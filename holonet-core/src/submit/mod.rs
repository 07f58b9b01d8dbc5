//! Outbound chat message submission

pub mod error;
pub mod message;
pub mod pipeline;

pub use error::SubmitError;
pub use message::{MessageType, OutboundMessageBatch};
pub use pipeline::{MAX_MESSAGE_LEN, MessageSubmitter, prepare_messages, retry_policy};
