use std::io::{ErrorKind, Read};
use std::path::Path;

use bufser_store::{ByteStore, Mode};
use bytes::BytesMut;
use tracing::{debug, trace};

use crate::config::ChannelConfig;
use crate::error::{ChannelError, Result};
use crate::stats::ChannelStats;

/// Buffered read side of a channel over any `Read` store.
///
/// Bytes `[cursor, filled)` of the buffer are read from the store but not
/// yet delivered. `filled` equals the capacity except after a refill that
/// reached the end of the store.
pub struct ChannelReader<S: Read> {
    inner: S,
    buf: BytesMut,
    cursor: usize,
    filled: usize,
    config: ChannelConfig,
    stats: ChannelStats,
}

impl<S: Read> ChannelReader<S> {
    /// Create a new channel reader with default configuration.
    ///
    /// The buffer is filled from the store immediately.
    pub fn new(inner: S) -> Result<Self> {
        Self::with_config(inner, ChannelConfig::default())
    }

    /// Create a new channel reader with explicit configuration.
    ///
    /// The buffer is filled from the store immediately.
    pub fn with_config(inner: S, config: ChannelConfig) -> Result<Self> {
        let mut reader = Self {
            inner,
            buf: BytesMut::zeroed(config.capacity),
            cursor: 0,
            filled: 0,
            config,
            stats: ChannelStats::default(),
        };
        reader.refill()?;
        Ok(reader)
    }

    /// Fill `dst` with the next `dst.len()` bytes of the stream.
    ///
    /// Requests that fit in the unconsumed part of the buffer are served
    /// without touching the store. Otherwise the buffered remainder is
    /// delivered first, a remainder of at least one full buffer is read
    /// straight from the store, and the buffer is refilled.
    ///
    /// Returns [`ChannelError::UnexpectedEof`] if the store ends first.
    pub fn transfer_in(&mut self, dst: &mut [u8]) -> Result<()> {
        if dst.is_empty() {
            return Ok(());
        }

        let available = self.filled - self.cursor;
        if dst.len() < available {
            dst.copy_from_slice(&self.buf[self.cursor..self.cursor + dst.len()]);
            self.cursor += dst.len();
            self.stats.bytes_transferred += dst.len() as u64;
            return Ok(());
        }

        let requested = dst.len();
        let (head, mut rest) = dst.split_at_mut(available);
        head.copy_from_slice(&self.buf[self.cursor..self.filled]);
        self.cursor = self.filled;

        if rest.len() >= self.config.capacity {
            if !rest.is_empty() {
                trace!(size = rest.len(), "reading span directly from store");
                self.read_direct(rest, requested)?;
            }
            rest = &mut [];
        }

        self.refill()?;

        if !rest.is_empty() {
            if rest.len() > self.filled {
                return Err(ChannelError::UnexpectedEof {
                    requested,
                    available: requested - rest.len() + self.filled,
                });
            }
            rest.copy_from_slice(&self.buf[..rest.len()]);
            self.cursor = rest.len();
        }

        self.stats.bytes_transferred += requested as u64;
        Ok(())
    }

    /// Release the buffer and the store.
    pub fn close(self) -> Result<ChannelStats> {
        debug!(
            store_reads = self.stats.store_reads,
            bytes = self.stats.bytes_transferred,
            "closed channel reader"
        );
        Ok(self.stats)
    }

    /// Buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Bytes read from the store but not yet delivered.
    pub fn buffered(&self) -> usize {
        self.filled - self.cursor
    }

    /// Store operation counters so far.
    pub fn stats(&self) -> ChannelStats {
        self.stats
    }

    /// Current channel configuration.
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// Borrow the underlying store.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Refill the whole buffer, stopping early only at end of store.
    fn refill(&mut self) -> Result<()> {
        if self.config.capacity == 0 {
            return Ok(());
        }

        let filled = fill(&mut self.inner, &mut self.buf[..])?;
        self.stats.store_reads += 1;
        self.cursor = 0;
        self.filled = filled;

        if filled < self.config.capacity {
            trace!(filled, capacity = self.config.capacity, "refill reached end of store");
        }
        Ok(())
    }

    fn read_direct(&mut self, dst: &mut [u8], requested: usize) -> Result<()> {
        let len = dst.len();
        let got = fill(&mut self.inner, dst)?;
        self.stats.store_reads += 1;
        if got < len {
            return Err(ChannelError::UnexpectedEof {
                requested,
                available: requested - len + got,
            });
        }
        Ok(())
    }
}

impl ChannelReader<ByteStore> {
    /// Open an existing `path` and a channel reader over it.
    pub fn open(path: impl AsRef<Path>, config: ChannelConfig) -> Result<Self> {
        let store = ByteStore::open(path, Mode::Read)?;
        debug!(path = ?store.path(), capacity = config.capacity, "opened channel reader");
        Self::with_config(store, config)
    }
}

/// Read into `dst` until it is full or the store reports end of data.
fn fill<S: Read>(inner: &mut S, dst: &mut [u8]) -> Result<usize> {
    let mut offset = 0usize;
    while offset < dst.len() {
        match inner.read(&mut dst[offset..]) {
            Ok(0) => break,
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(ChannelError::Io(err)),
        }
    }
    Ok(offset)
}
