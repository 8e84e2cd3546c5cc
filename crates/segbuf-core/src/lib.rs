//! segbuf Core
//!
//! An in-memory, append-only byte buffer built from fixed-capacity segments.
//! One producer writes into it while any number of threads query its length,
//! peek at its start or drain it to a sink. Any point in its growth can be
//! captured as an independent snapshot.
//!
//! ## Components
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Buffer (RwLock<Vec<Segment>>)                    │
//! │                                                  │
//! │ ┌───────────┐ ┌───────────┐ ┌───────────┐        │
//! │ │ Segment   │→│ Segment   │→│ Segment   │ ◄─ tail│
//! │ │ 255/255   │ │ 255/255   │ │  42/255   │        │
//! │ └───────────┘ └───────────┘ └───────────┘        │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! - [`Segment`]: fixed-capacity chunk with best-effort append, truncate,
//!   copy and suffix extraction
//! - [`Buffer`]: ordered segments forming one stream, guarded by a single
//!   reader/writer lock
//!
//! ## Example
//! ```
//! use segbuf_core::Buffer;
//!
//! let buffer = Buffer::new();
//! buffer.write(&[0u8; 300]);
//! assert_eq!(buffer.len(), 300);
//! assert_eq!(buffer.segment_count(), 2);
//!
//! let frozen = buffer.snapshot();
//! buffer.write_string("more");
//! assert_eq!(frozen.len(), 300);
//! ```

pub mod buffer;
pub mod config;
pub mod error;
pub mod segment;

pub use buffer::{Buffer, BufferStats};
pub use config::BufferConfig;
pub use error::{Error, Result};
pub use segment::{Segment, SEGMENT_CAPACITY, SEGMENT_SIZE};
