//! Buffered binary serialization to files with minimal I/O.
//!
//! bufser writes scalars, sequences, text and user-defined records to a file
//! through a fixed-capacity memory buffer, and reads them back in the same
//! order.
//!
//! # Crate Structure
//!
//! - [`store`]: file-backed byte store with a fixed access mode
//! - [`channel`]: buffered channel and the scalar, sequence and text codecs
//!
//! # Example
//!
//! ```no_run
//! use bufser::channel::{ChannelConfig, ChannelReader, ChannelWriter, Decode, Encode};
//!
//! # fn main() -> bufser::channel::Result<()> {
//! let values = vec![1i32, 2, 3, 4];
//!
//! let mut writer = ChannelWriter::create("values.bin", ChannelConfig::with_capacity(64))?;
//! "Hello".encode(&mut writer)?;
//! values.encode(&mut writer)?;
//! writer.close()?;
//!
//! let mut reader = ChannelReader::open("values.bin", ChannelConfig::default())?;
//! assert_eq!(String::decode(&mut reader)?, "Hello");
//! assert_eq!(Vec::<i32>::decode(&mut reader)?, values);
//! reader.close()?;
//! # Ok(())
//! # }
//! ```

/// Re-export store types.
pub mod store {
    pub use bufser_store::*;
}

/// Re-export channel and codec types.
pub mod channel {
    pub use bufser_channel::*;
}
