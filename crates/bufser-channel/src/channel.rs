use std::io::{Read, Write};
use std::path::Path;

use bufser_store::{ByteStore, Mode};

use crate::codec::{Decode, Encode};
use crate::config::ChannelConfig;
use crate::error::{ChannelError, Result};
use crate::reader::ChannelReader;
use crate::stats::ChannelStats;
use crate::writer::ChannelWriter;

/// A channel opened in exactly one mode.
///
/// Lets a record describe its layout once, with a single ordered function
/// that runs in both directions:
///
/// ```no_run
/// use bufser_channel::{Channel, ChannelConfig, Mode, Result};
///
/// struct Node {
///     parent: i64,
///     children: Vec<i64>,
/// }
///
/// impl Node {
///     fn persist(&mut self, channel: &mut Channel) -> Result<()> {
///         channel.transfer(&mut self.parent)?;
///         channel.transfer(&mut self.children)
///     }
/// }
///
/// # fn main() -> Result<()> {
/// let mut node = Node { parent: -1, children: vec![1, 2] };
/// let mut channel = Channel::open("tree.bin", Mode::Write, ChannelConfig::default())?;
/// node.persist(&mut channel)?;
/// channel.close()?;
/// # Ok(())
/// # }
/// ```
pub enum Channel<W: Write = ByteStore, R: Read = ByteStore> {
    /// Encoding pass.
    Writer(ChannelWriter<W>),
    /// Decoding pass.
    Reader(ChannelReader<R>),
}

impl Channel {
    /// Open `path` in `mode` with the given buffer configuration.
    pub fn open(path: impl AsRef<Path>, mode: Mode, config: ChannelConfig) -> Result<Self> {
        match mode {
            Mode::Write => ChannelWriter::create(path, config).map(Channel::Writer),
            Mode::Read => ChannelReader::open(path, config).map(Channel::Reader),
        }
    }
}

impl<W: Write, R: Read> Channel<W, R> {
    /// The mode this channel was opened in.
    pub fn mode(&self) -> Mode {
        match self {
            Channel::Writer(_) => Mode::Write,
            Channel::Reader(_) => Mode::Read,
        }
    }

    /// Encode `value` in write mode; replace it with the decoded value in
    /// read mode.
    pub fn transfer<T: Encode + Decode>(&mut self, value: &mut T) -> Result<()> {
        match self {
            Channel::Writer(writer) => value.encode(writer),
            Channel::Reader(reader) => value.decode_into(reader),
        }
    }

    /// Move raw bytes in the channel's direction.
    ///
    /// Writes `bytes` in write mode; overwrites them from the stream in
    /// read mode.
    pub fn transfer_raw(&mut self, bytes: &mut [u8]) -> Result<()> {
        match self {
            Channel::Writer(writer) => writer.transfer_out(bytes),
            Channel::Reader(reader) => reader.transfer_in(bytes),
        }
    }

    /// The write side, or [`ChannelError::ModeMismatch`].
    pub fn writer(&mut self) -> Result<&mut ChannelWriter<W>> {
        match self {
            Channel::Writer(writer) => Ok(writer),
            Channel::Reader(_) => Err(ChannelError::ModeMismatch {
                expected: Mode::Write,
                actual: Mode::Read,
            }),
        }
    }

    /// The read side, or [`ChannelError::ModeMismatch`].
    pub fn reader(&mut self) -> Result<&mut ChannelReader<R>> {
        match self {
            Channel::Reader(reader) => Ok(reader),
            Channel::Writer(_) => Err(ChannelError::ModeMismatch {
                expected: Mode::Read,
                actual: Mode::Write,
            }),
        }
    }

    /// Store operation counters so far.
    pub fn stats(&self) -> ChannelStats {
        match self {
            Channel::Writer(writer) => writer.stats(),
            Channel::Reader(reader) => reader.stats(),
        }
    }

    /// Flush pending writes and release the buffer and store.
    pub fn close(self) -> Result<ChannelStats> {
        match self {
            Channel::Writer(writer) => writer.close(),
            Channel::Reader(reader) => reader.close(),
        }
    }
}

impl<W: Write, R: Read> From<ChannelWriter<W>> for Channel<W, R> {
    fn from(writer: ChannelWriter<W>) -> Self {
        Channel::Writer(writer)
    }
}

impl<W: Write, R: Read> From<ChannelReader<R>> for Channel<W, R> {
    fn from(reader: ChannelReader<R>) -> Self {
        Channel::Reader(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Node {
        parent: i64,
        children: Vec<i64>,
        label: Option<String>,
    }

    impl Node {
        fn persist<W: Write, R: Read>(&mut self, channel: &mut Channel<W, R>) -> Result<()> {
            channel.transfer(&mut self.parent)?;
            channel.transfer(&mut self.children)?;
            channel.transfer(&mut self.label)
        }
    }

    fn sample_tree() -> Vec<Node> {
        vec![
            Node {
                parent: -1,
                children: vec![1, 2],
                label: Some("root".into()),
            },
            Node {
                parent: 0,
                children: vec![],
                label: None,
            },
            Node {
                parent: 0,
                children: vec![],
                label: Some("leaf".into()),
            },
        ]
    }

    #[test]
    fn single_function_persists_both_ways() {
        let mut tree = sample_tree();
        let mut wire = Vec::new();
        {
            let writer = ChannelWriter::with_config(&mut wire, ChannelConfig::with_capacity(5));
            let mut channel: Channel<_, &[u8]> = writer.into();
            let mut count = tree.len() as u64;
            channel.transfer(&mut count).unwrap();
            for node in &mut tree {
                node.persist(&mut channel).unwrap();
            }
            channel.close().unwrap();
        }

        for capacity in [0usize, 1, 7, 64] {
            let reader =
                ChannelReader::with_config(wire.as_slice(), ChannelConfig::with_capacity(capacity))
                    .unwrap();
            let mut channel: Channel<Vec<u8>, _> = reader.into();
            assert_eq!(channel.mode(), Mode::Read);

            let mut count = 0u64;
            channel.transfer(&mut count).unwrap();
            let mut decoded: Vec<Node> = (0..count).map(|_| Node::default()).collect();
            for node in &mut decoded {
                node.persist(&mut channel).unwrap();
            }
            assert_eq!(decoded, sample_tree(), "capacity {capacity}");
        }
    }

    #[test]
    fn wrong_side_is_mode_mismatch() {
        let reader = ChannelReader::with_config(&b""[..], ChannelConfig::with_capacity(0)).unwrap();
        let mut channel: Channel<Vec<u8>, _> = reader.into();
        assert!(matches!(
            channel.writer(),
            Err(ChannelError::ModeMismatch {
                expected: Mode::Write,
                actual: Mode::Read
            })
        ));
        assert!(channel.reader().is_ok());
    }

    #[test]
    fn raw_transfer_follows_mode() {
        let mut wire = Vec::new();
        let writer = ChannelWriter::with_config(&mut wire, ChannelConfig::with_capacity(2));
        let mut channel: Channel<_, &[u8]> = Channel::from(writer);
        let mut raw = *b"raw";
        channel.transfer_raw(&mut raw).unwrap();
        channel.close().unwrap();
        assert_eq!(wire, b"raw");

        let reader = ChannelReader::with_config(wire.as_slice(), ChannelConfig::with_capacity(2))
            .unwrap();
        let mut channel: Channel<Vec<u8>, _> = Channel::from(reader);
        let mut back = [0u8; 3];
        channel.transfer_raw(&mut back).unwrap();
        assert_eq!(&back, b"raw");
    }

    #[test]
    fn open_on_disk_and_reopen() {
        let dir = std::env::temp_dir().join(format!("bufser-channel-open-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("values.bin");

        for round in 0..8u32 {
            let mut value = vec![round; round as usize];
            let mut channel = Channel::open(&path, Mode::Write, ChannelConfig::with_capacity(3)).unwrap();
            assert_eq!(channel.mode(), Mode::Write);
            channel.transfer(&mut value).unwrap();
            channel.close().unwrap();

            let mut decoded = Vec::<u32>::new();
            let mut channel = Channel::open(&path, Mode::Read, ChannelConfig::with_capacity(5)).unwrap();
            channel.transfer(&mut decoded).unwrap();
            channel.close().unwrap();
            assert_eq!(decoded, value);
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
