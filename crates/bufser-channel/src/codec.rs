//! Capability traits for values that travel through a channel.
//!
//! A composite record implements [`Encode`] and [`Decode`] by calling the
//! field codecs in the same order in both directions:
//!
//! ```
//! use std::io::{Read, Write};
//! use bufser_channel::{ChannelReader, ChannelWriter, Decode, Encode, Result};
//!
//! struct Point {
//!     label: String,
//!     coords: Vec<f32>,
//! }
//!
//! impl Encode for Point {
//!     fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
//!         self.label.encode(writer)?;
//!         self.coords.encode(writer)
//!     }
//! }
//!
//! impl Decode for Point {
//!     fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
//!         Ok(Self {
//!             label: String::decode(reader)?,
//!             coords: Vec::decode(reader)?,
//!         })
//!     }
//! }
//! ```
//!
//! The order is not validated; a mismatch desynchronizes the stream.

use std::io::{Read, Write};

use bytes::Bytes;

use crate::error::{ChannelError, Result};
use crate::reader::ChannelReader;
use crate::scalar::{decode_scalar, encode_scalar};
use crate::sequence::{
    decode_bytes, decode_count, decode_text, encode_bytes, encode_count, encode_text, read_flat,
    write_flat, PREALLOC_LIMIT,
};
use crate::writer::ChannelWriter;

/// A value that can be written to a channel.
pub trait Encode {
    /// Write this value.
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()>;

    /// Write a run of values with no count prefix.
    ///
    /// Element-wise by default; scalar types write the run in one transfer.
    fn encode_slice<W: Write>(items: &[Self], writer: &mut ChannelWriter<W>) -> Result<()>
    where
        Self: Sized,
    {
        for item in items {
            item.encode(writer)?;
        }
        Ok(())
    }
}

/// A value that can be read back from a channel.
pub trait Decode: Sized {
    /// Read a value.
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self>;

    /// Read a value into `self`, replacing its previous contents.
    fn decode_into<R: Read>(&mut self, reader: &mut ChannelReader<R>) -> Result<()> {
        *self = Self::decode(reader)?;
        Ok(())
    }

    /// Read a run of `count` values with no count prefix.
    ///
    /// Element-wise by default; scalar types read the run in one transfer.
    fn decode_vec<R: Read>(count: usize, reader: &mut ChannelReader<R>) -> Result<Vec<Self>> {
        let mut items = Vec::with_capacity(count.min(PREALLOC_LIMIT));
        for _ in 0..count {
            items.push(Self::decode(reader)?);
        }
        Ok(items)
    }
}

macro_rules! impl_scalar_codec {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
                    encode_scalar(writer, *self)
                }

                fn encode_slice<W: Write>(items: &[Self], writer: &mut ChannelWriter<W>) -> Result<()> {
                    write_flat(writer, items)
                }
            }

            impl Decode for $ty {
                fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
                    decode_scalar(reader)
                }

                fn decode_vec<R: Read>(count: usize, reader: &mut ChannelReader<R>) -> Result<Vec<Self>> {
                    read_flat(reader, count)
                }
            }
        )*
    };
}

impl_scalar_codec!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);

impl Encode for bool {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        encode_scalar(writer, u8::from(*self))
    }
}

impl Decode for bool {
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
        match decode_scalar::<R, u8>(reader)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ChannelError::InvalidBool(other)),
        }
    }
}

impl Encode for char {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        encode_scalar(writer, u32::from(*self))
    }
}

impl Decode for char {
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
        let raw: u32 = decode_scalar(reader)?;
        char::from_u32(raw).ok_or(ChannelError::InvalidChar(raw))
    }
}

impl Encode for str {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        encode_text(writer, self)
    }
}

impl Encode for String {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        encode_text(writer, self)
    }
}

impl Decode for String {
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
        decode_text(reader)
    }
}

impl Encode for Bytes {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        encode_bytes(writer, self)
    }
}

impl Decode for Bytes {
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
        decode_bytes(reader)
    }
}

impl<T: Encode> Encode for [T] {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        encode_count(writer, self.len())?;
        T::encode_slice(self, writer)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        self.as_slice().encode(writer)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
        let count = decode_count(reader)?;
        T::decode_vec(count, reader)
    }
}

/// A presence tag (`0` or `1`) followed by the value when present.
impl<T: Encode> Encode for Option<T> {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        match self {
            Some(value) => {
                encode_scalar(writer, 1u8)?;
                value.encode(writer)
            }
            None => encode_scalar(writer, 0u8),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
        match decode_scalar::<R, u8>(reader)? {
            0 => Ok(None),
            1 => Ok(Some(T::decode(reader)?)),
            other => Err(ChannelError::InvalidOptionTag(other)),
        }
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
        (**self).encode(writer)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
        T::decode(reader).map(Box::new)
    }
}

macro_rules! impl_tuple_codec {
    ($($name:ident),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            #[allow(non_snake_case)]
            fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
                let ($($name,)+) = self;
                $($name.encode(writer)?;)+
                Ok(())
            }
        }

        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
                Ok(($($name::decode(reader)?,)+))
            }
        }
    };
}

impl_tuple_codec!(A);
impl_tuple_codec!(A, B);
impl_tuple_codec!(A, B, C);
impl_tuple_codec!(A, B, C, D);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelConfig;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Object {
        name: String,
        values: Vec<i32>,
        scale: f32,
        tag: i32,
    }

    impl Encode for Object {
        fn encode<W: Write>(&self, writer: &mut ChannelWriter<W>) -> Result<()> {
            self.name.encode(writer)?;
            self.values.encode(writer)?;
            self.scale.encode(writer)?;
            self.tag.encode(writer)
        }
    }

    impl Decode for Object {
        fn decode<R: Read>(reader: &mut ChannelReader<R>) -> Result<Self> {
            Ok(Self {
                name: String::decode(reader)?,
                values: Vec::decode(reader)?,
                scale: f32::decode(reader)?,
                tag: i32::decode(reader)?,
            })
        }
    }

    fn encode_to_vec<T: Encode + ?Sized>(value: &T, capacity: usize) -> Vec<u8> {
        let mut wire = Vec::new();
        let mut writer = ChannelWriter::with_config(&mut wire, ChannelConfig::with_capacity(capacity));
        value.encode(&mut writer).unwrap();
        writer.close().unwrap();
        wire
    }

    fn decode_from<T: Decode>(wire: &[u8], capacity: usize) -> Result<T> {
        let mut reader = ChannelReader::with_config(wire, ChannelConfig::with_capacity(capacity))?;
        T::decode(&mut reader)
    }

    #[test]
    fn record_roundtrip() {
        let object = Object {
            name: "Hello".into(),
            values: vec![1, 2, 3, 4],
            scale: 10.0,
            tag: 77,
        };
        for write_capacity in 0..40 {
            let wire = encode_to_vec(&object, write_capacity);
            assert_eq!(wire.len(), 8 + 5 + 8 + 16 + 4 + 4);
            for read_capacity in 0..40 {
                let decoded: Object = decode_from(&wire, read_capacity).unwrap();
                assert_eq!(decoded, object);
            }
        }
    }

    #[test]
    fn vec_of_records_roundtrip() {
        let objects = vec![
            Object {
                name: "Hello".into(),
                values: vec![1, 2, 3, 4],
                scale: 10.0,
                tag: 1,
            },
            Object::default(),
        ];
        let wire = encode_to_vec(&objects, 7);
        let decoded: Vec<Object> = decode_from(&wire, 11).unwrap();
        assert_eq!(decoded, objects);
    }

    #[test]
    fn decode_into_replaces_contents() {
        let wire = encode_to_vec(&vec![5u16, 6], 0);
        let mut target = vec![1u16, 2, 3, 4];
        let mut reader =
            ChannelReader::with_config(wire.as_slice(), ChannelConfig::with_capacity(3)).unwrap();
        target.decode_into(&mut reader).unwrap();
        assert_eq!(target, [5, 6]);
    }

    #[test]
    fn slice_and_vec_share_layout() {
        let items = [3i64, -3];
        assert_eq!(encode_to_vec(&items[..], 0), encode_to_vec(&items.to_vec(), 0));
    }

    #[test]
    fn scalar_vec_uses_single_bulk_transfer() {
        let mut wire = Vec::new();
        let mut writer = ChannelWriter::with_config(&mut wire, ChannelConfig::with_capacity(0));
        vec![0u8; 300].encode(&mut writer).unwrap();
        assert_eq!(writer.stats().store_writes, 2);
        writer.close().unwrap();
    }

    #[test]
    fn bool_and_char() {
        let wire = encode_to_vec(&(true, 'ß', false), 2);
        assert_eq!(wire, [1, 0xdf, 0, 0, 0, 0]);
        let decoded: (bool, char, bool) = decode_from(&wire, 2).unwrap();
        assert_eq!(decoded, (true, 'ß', false));

        assert!(matches!(
            decode_from::<bool>(&[2], 0),
            Err(ChannelError::InvalidBool(2))
        ));
        assert!(matches!(
            decode_from::<char>(&0xD800u32.to_le_bytes(), 0),
            Err(ChannelError::InvalidChar(0xD800))
        ));
    }

    #[test]
    fn option_roundtrip() {
        let values: Vec<Option<String>> = vec![Some("node".into()), None, Some(String::new())];
        let wire = encode_to_vec(&values, 4);
        let decoded: Vec<Option<String>> = decode_from(&wire, 5).unwrap();
        assert_eq!(decoded, values);

        assert!(matches!(
            decode_from::<Option<u8>>(&[9], 1),
            Err(ChannelError::InvalidOptionTag(9))
        ));
    }

    #[test]
    fn bytes_roundtrip() {
        let payload = Bytes::from_static(b"\x00\x01binary\xff");
        let wire = encode_to_vec(&payload, 3);
        let decoded: Bytes = decode_from(&wire, 0).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn boxed_and_nested_values() {
        let value: Box<(u8, Vec<Vec<u32>>)> = Box::new((7, vec![vec![], vec![1, 2], vec![3]]));
        let wire = encode_to_vec(&value, 6);
        let decoded: Box<(u8, Vec<Vec<u32>>)> = decode_from(&wire, 1).unwrap();
        assert_eq!(decoded, value);
    }
}
