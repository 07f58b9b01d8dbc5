//! Settings file editing for the CLI

mod edit;

pub use edit::{parse_value, set_key};
