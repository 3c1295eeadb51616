/// Default buffer capacity: 8 KiB.
pub const DEFAULT_CAPACITY: usize = 8 * 1024;

/// Default maximum decoded sequence length: 64 Mi elements.
pub const DEFAULT_MAX_SEQUENCE_LEN: u64 = 64 * 1024 * 1024;

/// Configuration for a buffered channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelConfig {
    /// Buffer capacity in bytes. `0` disables buffering. Default: 8 KiB.
    pub capacity: usize,
    /// Largest sequence count accepted on decode. Default: 64 Mi.
    pub max_sequence_len: u64,
}

impl ChannelConfig {
    /// Default configuration with an explicit buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Returns true if the channel bypasses the buffer entirely.
    pub fn is_unbuffered(&self) -> bool {
        self.capacity == 0
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_sequence_len: DEFAULT_MAX_SEQUENCE_LEN,
        }
    }
}
