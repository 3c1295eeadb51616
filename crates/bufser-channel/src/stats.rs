/// Counters for the store operations a channel has issued.
///
/// A store operation is one logical request (a flush, a direct transfer or a
/// refill), however many `read`/`write` calls it took to complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelStats {
    /// Write requests sent to the store.
    pub store_writes: u64,
    /// Read requests sent to the store.
    pub store_reads: u64,
    /// Bytes handed to or delivered from the channel by callers.
    pub bytes_transferred: u64,
}
