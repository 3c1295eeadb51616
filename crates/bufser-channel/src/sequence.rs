//! Count-prefixed sequences and text.

use std::io::{Read, Write};

use bytes::{Bytes, BytesMut};

use crate::codec::{Decode, Encode};
use crate::error::{ChannelError, Result};
use crate::reader::ChannelReader;
use crate::scalar::{decode_scalar, encode_scalar, Scalar};
use crate::writer::ChannelWriter;

/// Size of the count prefix in bytes.
pub const COUNT_SIZE: usize = 8;

/// Upper bound on up-front reservation for element-wise decodes.
pub(crate) const PREALLOC_LIMIT: usize = 4096;

/// Encode a sequence count prefix, enforcing `max_sequence_len`.
///
/// The limit matches the one [`decode_count`] applies, so a stream written
/// under a configuration always reads back under the same configuration.
pub fn encode_count<W: Write>(writer: &mut ChannelWriter<W>, count: usize) -> Result<()> {
    let count = count as u64;
    check_count(count, writer.config().max_sequence_len)?;
    encode_scalar(writer, count)
}

/// Decode a sequence count prefix, enforcing `max_sequence_len`.
pub fn decode_count<R: Read>(reader: &mut ChannelReader<R>) -> Result<usize> {
    let count: u64 = decode_scalar(reader)?;
    check_count(count, reader.config().max_sequence_len)?;
    usize::try_from(count).map_err(|_| ChannelError::CountOverflow { count })
}

fn check_count(count: u64, max: u64) -> Result<()> {
    if count > max {
        return Err(ChannelError::SequenceTooLong { count, max });
    }
    Ok(())
}

/// Encode a flat sequence: count, then the whole element run in one transfer.
pub fn encode_sequence<W: Write, T: Scalar>(writer: &mut ChannelWriter<W>, items: &[T]) -> Result<()> {
    encode_count(writer, items.len())?;
    write_flat(writer, items)
}

/// Decode a flat sequence written by [`encode_sequence`].
pub fn decode_sequence<R: Read, T: Scalar>(reader: &mut ChannelReader<R>) -> Result<Vec<T>> {
    let count = decode_count(reader)?;
    read_flat(reader, count)
}

/// Encode a custom sequence: count, then each element in order.
pub fn encode_custom_sequence<W: Write, T: Encode>(
    writer: &mut ChannelWriter<W>,
    items: &[T],
) -> Result<()> {
    encode_count(writer, items.len())?;
    for item in items {
        item.encode(writer)?;
    }
    Ok(())
}

/// Decode a custom sequence written by [`encode_custom_sequence`].
pub fn decode_custom_sequence<R: Read, T: Decode>(reader: &mut ChannelReader<R>) -> Result<Vec<T>> {
    let count = decode_count(reader)?;
    let mut items = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for _ in 0..count {
        items.push(T::decode(reader)?);
    }
    Ok(items)
}

/// Encode text as its byte length followed by the UTF-8 bytes.
pub fn encode_text<W: Write>(writer: &mut ChannelWriter<W>, text: &str) -> Result<()> {
    encode_bytes(writer, text.as_bytes())
}

/// Decode text written by [`encode_text`].
pub fn decode_text<R: Read>(reader: &mut ChannelReader<R>) -> Result<String> {
    let count = decode_count(reader)?;
    let raw = read_flat::<R, u8>(reader, count)?;
    String::from_utf8(raw).map_err(ChannelError::InvalidUtf8)
}

/// Encode a byte string as its length followed by the raw bytes.
pub fn encode_bytes<W: Write>(writer: &mut ChannelWriter<W>, bytes: &[u8]) -> Result<()> {
    encode_count(writer, bytes.len())?;
    writer.transfer_out(bytes)
}

/// Decode a byte string written by [`encode_bytes`] or [`encode_text`].
pub fn decode_bytes<R: Read>(reader: &mut ChannelReader<R>) -> Result<Bytes> {
    let count = decode_count(reader)?;
    let mut raw = BytesMut::zeroed(count);
    reader.transfer_in(&mut raw)?;
    Ok(raw.freeze())
}

/// Write a run of scalars with no count prefix in one transfer.
pub(crate) fn write_flat<W: Write, T: Scalar>(
    writer: &mut ChannelWriter<W>,
    items: &[T],
) -> Result<()> {
    let mut raw = BytesMut::zeroed(items.len() * T::WIDTH);
    for (chunk, item) in raw.chunks_exact_mut(T::WIDTH).zip(items) {
        item.write_le(chunk);
    }
    writer.transfer_out(&raw)
}

/// Read `count` scalars with no count prefix in one transfer.
pub(crate) fn read_flat<R: Read, T: Scalar>(
    reader: &mut ChannelReader<R>,
    count: usize,
) -> Result<Vec<T>> {
    let len = count
        .checked_mul(T::WIDTH)
        .ok_or(ChannelError::LengthOverflow {
            count: count as u64,
            width: T::WIDTH,
        })?;
    let mut raw = vec![0u8; len];
    reader.transfer_in(&mut raw)?;
    Ok(raw.chunks_exact(T::WIDTH).map(T::read_le).collect())
}
