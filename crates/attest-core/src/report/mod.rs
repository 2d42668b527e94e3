pub mod console;

pub use console::{assertion_message, emit_failure, format_failure};
