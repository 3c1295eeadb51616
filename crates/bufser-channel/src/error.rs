use bufser_store::{Mode, StoreError};

/// Errors that can occur while transferring or decoding channel data.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// The underlying store could not be opened or failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An I/O error occurred while moving bytes to or from the store.
    #[error("channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store ran out of data before a transfer was satisfied.
    #[error("unexpected end of stream ({requested} bytes requested, {available} available)")]
    UnexpectedEof { requested: usize, available: usize },

    /// A sequence count exceeds the configured maximum, on encode or decode.
    #[error("sequence too long ({count} elements, max {max})")]
    SequenceTooLong { count: u64, max: u64 },

    /// A decoded sequence count does not fit in `usize` on this platform.
    #[error("sequence count {count} does not fit in usize")]
    CountOverflow { count: u64 },

    /// The byte length of a flat run of scalars overflows `usize`.
    #[error("sequence length overflow ({count} elements of {width} bytes)")]
    LengthOverflow { count: u64, width: usize },

    /// Decoded text is not valid UTF-8.
    #[error("invalid UTF-8 in text: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A boolean byte other than 0 or 1.
    #[error("invalid bool byte {0:#04x}")]
    InvalidBool(u8),

    /// A 32-bit value that is not a Unicode scalar value.
    #[error("invalid char value {0:#x}")]
    InvalidChar(u32),

    /// An option presence tag other than 0 or 1.
    #[error("invalid option tag {0:#04x}")]
    InvalidOptionTag(u8),

    /// The channel was opened in the other mode.
    #[error("channel is opened for {actual}, operation requires {expected}")]
    ModeMismatch { expected: Mode, actual: Mode },
}

pub type Result<T> = std::result::Result<T, ChannelError>;
