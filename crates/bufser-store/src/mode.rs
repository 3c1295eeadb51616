use std::fmt;

/// Access mode of a store, fixed for its whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Create or truncate, write-only.
    Write,
    /// Existing file, read-only.
    Read,
}

impl Mode {
    /// Returns a human-readable name for the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Write => "write",
            Mode::Read => "read",
        }
    }

    /// Returns true for [`Mode::Write`].
    pub fn is_write(self) -> bool {
        self == Mode::Write
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
