//! Batch input and terminal output for the binary.

mod batch;
mod reporter;

pub use batch::BatchInput;
pub use reporter::{SummaryReporter, render_json};
