mod handler;

pub use handler::{handle_key, KeyOutcome};
