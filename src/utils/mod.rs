//! Terminal output helpers: styling, spinners and the stage reporter

pub mod progress;
pub mod reporter;
pub mod styling;

pub use progress::*;
pub use reporter::{ConsoleReporter, SilentReporter, StageReporter};
pub use styling::*;
