use std::io::{ErrorKind, Write};
use std::path::Path;

use bufser_store::{ByteStore, Mode};
use bytes::BytesMut;
use tracing::{debug, trace, warn};

use crate::config::ChannelConfig;
use crate::error::{ChannelError, Result};
use crate::stats::ChannelStats;

/// Buffered write side of a channel over any `Write` store.
///
/// Bytes `[0, pending)` of the buffer have not reached the store yet. They
/// are flushed by [`close`](Self::close), by a transfer that does not fit,
/// or, best effort, when the writer is dropped. Once a store write has
/// failed the drop-time flush is skipped, since the stream position is no
/// longer known.
pub struct ChannelWriter<S: Write> {
    inner: S,
    buf: BytesMut,
    config: ChannelConfig,
    stats: ChannelStats,
    poisoned: bool,
}

impl<S: Write> ChannelWriter<S> {
    /// Create a new channel writer with default configuration.
    pub fn new(inner: S) -> Self {
        Self::with_config(inner, ChannelConfig::default())
    }

    /// Create a new channel writer with explicit configuration.
    pub fn with_config(inner: S, config: ChannelConfig) -> Self {
        Self {
            inner,
            buf: BytesMut::with_capacity(config.capacity),
            config,
            stats: ChannelStats::default(),
            poisoned: false,
        }
    }

    /// Append a span to the stream.
    ///
    /// A span that fits in the remaining buffer room is copied into the
    /// buffer without touching the store. Otherwise the pending bytes are
    /// flushed and the whole span is written to the store directly; spans
    /// are never split across buffer copies.
    pub fn transfer_out(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }

        if bytes.len() >= self.room() {
            self.flush_pending()?;
            trace!(size = bytes.len(), "writing span directly to store");
            let written = write_all(&mut self.inner, bytes);
            self.poison_on_err(written)?;
            self.stats.store_writes += 1;
        } else {
            self.buf.extend_from_slice(bytes);
        }

        self.stats.bytes_transferred += bytes.len() as u64;
        Ok(())
    }

    /// Write all pending bytes to the store and flush it.
    pub fn flush(&mut self) -> Result<()> {
        self.flush_pending()?;
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.poisoned = true;
                    return Err(ChannelError::Io(err));
                }
            }
        }
    }

    /// Flush pending bytes and release the buffer and the store.
    pub fn close(mut self) -> Result<ChannelStats> {
        self.flush()?;
        debug!(
            store_writes = self.stats.store_writes,
            bytes = self.stats.bytes_transferred,
            "closed channel writer"
        );
        Ok(self.stats)
    }

    /// Buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Bytes buffered but not yet written to the store.
    pub fn pending(&self) -> usize {
        self.buf.len()
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

    fn poison_on_err(&mut self, result: Result<()>) -> Result<()> {
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    fn room(&self) -> usize {
        self.config.capacity - self.buf.len()
    }

    fn flush_pending(&mut self) -> Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        trace!(pending = self.buf.len(), "flushing channel buffer");
        let written = write_all(&mut self.inner, &self.buf);
        self.poison_on_err(written)?;
        self.stats.store_writes += 1;
        self.buf.clear();
        Ok(())
    }
}

impl ChannelWriter<ByteStore> {
    /// Create or truncate `path` and open a channel writer over it.
    pub fn create(path: impl AsRef<Path>, config: ChannelConfig) -> Result<Self> {
        let store = ByteStore::open(path, Mode::Write)?;
        debug!(path = ?store.path(), capacity = config.capacity, "opened channel writer");
        Ok(Self::with_config(store, config))
    }
}

impl<S: Write> Drop for ChannelWriter<S> {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let pending = self.buf.len();
        if self.poisoned {
            warn!(pending, "discarding pending bytes after failed store write");
            return;
        }
        if let Err(err) = self.flush_pending() {
            warn!(pending, error = %err, "dropping channel writer lost pending bytes");
        }
    }
}

fn write_all<S: Write>(inner: &mut S, bytes: &[u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < bytes.len() {
        match inner.write(&bytes[offset..]) {
            Ok(0) => return Err(ChannelError::Io(ErrorKind::WriteZero.into())),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(ChannelError::Io(err)),
        }
    }
    Ok(())
}
