//! Buffered binary channel with typed codecs.
//!
//! This is the core layer of bufser. A channel owns a byte store and a
//! fixed-capacity memory buffer, and moves arbitrary-length byte spans
//! through it while keeping store operations to a minimum:
//! - [`ChannelWriter::transfer_out`] buffers small spans and writes large
//!   ones straight to the store
//! - [`ChannelReader::transfer_in`] serves spans from the buffer and
//!   refills it transparently
//!
//! On top of that sit the codecs. Every value is written as fixed-width
//! little-endian bytes; sequences and text carry a `u64` count prefix:
//!
//! ```text
//! ┌──────────────────┬──────────────────────────────────┐
//! │ Count (8B LE)    │ count × element bytes, no padding │
//! └──────────────────┴──────────────────────────────────┘
//! ```
//!
//! Composite records implement [`Encode`] and [`Decode`] with the same
//! field order in both directions.

pub mod channel;
pub mod codec;
pub mod config;
pub mod error;
pub mod reader;
pub mod scalar;
pub mod sequence;
pub mod stats;
pub mod writer;

pub use bufser_store::{ByteStore, Mode, StoreError};
pub use channel::Channel;
pub use codec::{Decode, Encode};
pub use config::{ChannelConfig, DEFAULT_CAPACITY, DEFAULT_MAX_SEQUENCE_LEN};
pub use error::{ChannelError, Result};
pub use reader::ChannelReader;
pub use scalar::{decode_scalar, encode_scalar, Scalar, MAX_SCALAR_WIDTH};
pub use sequence::{
    decode_bytes, decode_count, decode_custom_sequence, decode_sequence, decode_text,
    encode_bytes, encode_count, encode_custom_sequence, encode_sequence, encode_text,
    COUNT_SIZE,
};
pub use stats::ChannelStats;
pub use writer::ChannelWriter;
