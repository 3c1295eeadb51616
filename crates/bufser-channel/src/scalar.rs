//! Fixed-width scalar encoding.
//!
//! Every scalar is written as its little-endian bytes. `usize` and `isize`
//! always take 8 bytes on the wire regardless of the host pointer width.

use std::io::{Read, Write};

use crate::error::Result;
use crate::reader::ChannelReader;
use crate::writer::ChannelWriter;

/// Widest scalar on the wire (`u128`/`i128`).
pub const MAX_SCALAR_WIDTH: usize = 16;

/// A value with a fixed-width little-endian wire form.
pub trait Scalar: Copy {
    /// Encoded width in bytes, at most [`MAX_SCALAR_WIDTH`].
    const WIDTH: usize;

    /// Write the encoding into `dst`, which is exactly `WIDTH` bytes.
    fn write_le(self, dst: &mut [u8]);

    /// Read a value from `src`, which is exactly `WIDTH` bytes.
    fn read_le(src: &[u8]) -> Self;
}

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Scalar for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();

                fn write_le(self, dst: &mut [u8]) {
                    dst.copy_from_slice(&self.to_le_bytes());
                }

                fn read_le(src: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(src);
                    <$ty>::from_le_bytes(raw)
                }
            }
        )*
    };
}

impl_scalar!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128, f32, f64);

impl Scalar for usize {
    const WIDTH: usize = 8;

    fn write_le(self, dst: &mut [u8]) {
        (self as u64).write_le(dst);
    }

    fn read_le(src: &[u8]) -> Self {
        u64::read_le(src) as usize
    }
}

impl Scalar for isize {
    const WIDTH: usize = 8;

    fn write_le(self, dst: &mut [u8]) {
        (self as i64).write_le(dst);
    }

    fn read_le(src: &[u8]) -> Self {
        i64::read_le(src) as isize
    }
}

/// Encode one scalar with a single `transfer_out`.
pub fn encode_scalar<W: Write, T: Scalar>(writer: &mut ChannelWriter<W>, value: T) -> Result<()> {
    let mut raw = [0u8; MAX_SCALAR_WIDTH];
    value.write_le(&mut raw[..T::WIDTH]);
    writer.transfer_out(&raw[..T::WIDTH])
}

/// Decode one scalar with a single `transfer_in`.
pub fn decode_scalar<R: Read, T: Scalar>(reader: &mut ChannelReader<R>) -> Result<T> {
    let mut raw = [0u8; MAX_SCALAR_WIDTH];
    reader.transfer_in(&mut raw[..T::WIDTH])?;
    Ok(T::read_le(&raw[..T::WIDTH]))
}
