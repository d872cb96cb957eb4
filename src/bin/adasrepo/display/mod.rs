mod error;

pub use error::print_error;

use std::io::{self, Write};

#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub interactive: bool,
}

impl Context {
    pub fn detect() -> Self {
        Self {
            interactive: crate::io::stderr_is_tty(),
        }
    }

    pub fn with_quiet(self, quiet: bool) -> Self {
        if quiet {
            Self { interactive: false }
        } else {
            self
        }
    }

    /// Prints a one-line status message to stderr when interactive.
    pub fn status(&self, message: impl AsRef<str>) {
        if self.interactive {
            let _ = writeln!(io::stderr().lock(), "   ✓ {}", message.as_ref());
        }
    }
}
