//! File-backed byte store.
//!
//! A [`ByteStore`] is an open file paired with the [`Mode`] it was opened in:
//! - [`Mode::Write`] creates or truncates the file, write-only
//! - [`Mode::Read`] opens an existing file, read-only
//!
//! This is the lowest layer of bufser. It does no buffering of its own;
//! everything else builds on top of the [`ByteStore`] type provided here.

pub mod error;
pub mod mode;
pub mod store;

pub use error::{Result, StoreError};
pub use mode::Mode;
pub use store::ByteStore;
