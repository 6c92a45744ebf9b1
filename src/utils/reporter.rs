//! Progress reporting seam between the pipeline and the terminal

use super::styling::{print_detail, print_info, print_step_header, print_success, print_warning};

/// Receives human-readable progress from the pipeline stages.
///
/// Nothing reported here is part of the data contract; [`SilentReporter`]
/// drops everything.
pub trait StageReporter {
    /// A new numbered stage begins
    fn step(&self, number: u8, title: &str);
    /// A decision taken inside the current stage
    fn detail(&self, message: &str);
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    /// Non-fatal problem, e.g. a convergence warning
    fn warning(&self, message: &str);
}

/// Styled terminal output
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl StageReporter for ConsoleReporter {
    fn step(&self, number: u8, title: &str) {
        print_step_header(number, title);
    }

    fn detail(&self, message: &str) {
        print_detail(message);
    }

    fn info(&self, message: &str) {
        print_info(message);
    }

    fn success(&self, message: &str) {
        print_success(message);
    }

    fn warning(&self, message: &str) {
        print_warning(message);
    }
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl StageReporter for SilentReporter {
    fn step(&self, _number: u8, _title: &str) {}
    fn detail(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
}

#[cfg(test)]
pub(crate) mod recording {
    use std::cell::RefCell;

    use super::StageReporter;

    /// Captures every message, for asserting on reported stages
    #[derive(Default)]
    pub struct RecordingReporter {
        pub lines: RefCell<Vec<String>>,
    }

    impl RecordingReporter {
        fn push(&self, kind: &str, message: &str) {
            self.lines.borrow_mut().push(format!("{}: {}", kind, message));
        }
    }

    impl StageReporter for RecordingReporter {
        fn step(&self, number: u8, title: &str) {
            self.push("step", &format!("{} {}", number, title));
        }
        fn detail(&self, message: &str) {
            self.push("detail", message);
        }
        fn info(&self, message: &str) {
            self.push("info", message);
        }
        fn success(&self, message: &str) {
            self.push("success", message);
        }
        fn warning(&self, message: &str) {
            self.push("warning", message);
        }
    }
}
