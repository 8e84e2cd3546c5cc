//! Error Types for segbuf
//!
//! This module defines the errors a `Buffer` operation can return.
//!
//! ## Error Categories
//!
//! ### Caller Errors
//! - `Unsupported`: `read_at` was asked for a nonzero offset. Only a peek from
//!   the start of the stream is supported, so retrying with the same arguments
//!   will fail the same way.
//!
//! ### Sink Errors
//! - `SinkFailure`: the sink handed to `drain_to` rejected a write. The error
//!   carries the number of bytes the sink had already accepted; those bytes are
//!   not re-sent or rolled back.
//!
//! Running out of memory while allocating a segment is not an error value. The
//! global allocator aborts the process, same as any other `Vec` growth.
//!
//! ## Example
//! ```
//! use segbuf_core::{Buffer, Error};
//!
//! let buffer = Buffer::new();
//! buffer.write_string("ohai!");
//!
//! let mut dst = [0u8; 5];
//! match buffer.read_at(&mut dst, 3) {
//!     Err(Error::Unsupported { offset }) => assert_eq!(offset, 3),
//!     other => panic!("unexpected: {:?}", other),
//! }
//! ```

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported read offset: {offset} (only offset 0 is supported)")]
    Unsupported { offset: u64 },

    #[error("Sink failure after {written} bytes: {source}")]
    SinkFailure {
        written: u64,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Bytes successfully handed off before the error occurred
    pub fn written(&self) -> u64 {
        match self {
            Error::Unsupported { .. } => 0,
            Error::SinkFailure { written, .. } => *written,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
