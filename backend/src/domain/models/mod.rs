pub mod event;

pub use event::{Event, EventChannel, EventValidationError};
