//! Segment - Fixed-Capacity Byte Chunk
//!
//! A segment is the unit of storage inside a `Buffer`: a fixed-size byte array
//! plus a count of how many of its bytes are live.
//!
//! ## Layout
//! Each segment has a footprint of `SEGMENT_SIZE` (256) bytes. One byte of that
//! footprint is accounted for by the length, which leaves `SEGMENT_CAPACITY`
//! (255) bytes of payload. The length is kept in its own field rather than in
//! the first byte of the array; only the observable capacity is preserved.
//!
//! ```text
//! ┌───────┬──────────────────────────────┬──────────────────────┐
//! │  len  │ payload[0..len]  (live)       │ payload[len..] stale │
//! └───────┴──────────────────────────────┴──────────────────────┘
//! ```
//!
//! ## Best-Effort Append
//! `append` never fails. Input that does not fit is cut to the remaining
//! capacity and the returned count tells the caller how much was taken. A
//! `Buffer` compensates by rolling over to a new segment, so only direct
//! segment users can observe a short append.
//!
//! ## Truncation
//! `truncate` only moves the length back. Bytes past the new length stay in
//! the array until a later append overwrites them; nothing zeroes them.
//!
//! ## Copies
//! `copy` (and `Clone`) allocate fresh storage and copy only the live bytes.
//! The two segments share nothing afterwards.
//!
//! ## Example
//! ```
//! use segbuf_core::Segment;
//!
//! let mut seg = Segment::new();
//! assert_eq!(seg.append(&[0x02, 0x03, 0x05]), 3);
//!
//! let before = seg.copy();
//! seg.truncate(1);
//!
//! assert_eq!(seg.bytes(), &[0x02]);
//! assert_eq!(before.bytes(), &[0x02, 0x03, 0x05]);
//! ```

use std::fmt;

/// Total footprint of one segment in bytes (length slot plus payload)
pub const SEGMENT_SIZE: usize = 256;

/// Payload bytes a single segment can hold
pub const SEGMENT_CAPACITY: usize = SEGMENT_SIZE - 1;

/// Fixed-capacity byte chunk with an explicitly tracked length
pub struct Segment {
    /// Number of live payload bytes, always <= SEGMENT_CAPACITY
    len: usize,

    /// Payload storage; bytes at and past `len` are stale
    data: Box<[u8; SEGMENT_CAPACITY]>,
}

impl Segment {
    /// Create an empty segment with its own storage
    pub fn new() -> Self {
        Self {
            len: 0,
            data: Box::new([0u8; SEGMENT_CAPACITY]),
        }
    }

    /// Number of live payload bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Maximum number of payload bytes (`SEGMENT_CAPACITY`)
    pub fn capacity(&self) -> usize {
        SEGMENT_CAPACITY
    }

    /// Payload bytes that can still be appended
    pub fn remaining(&self) -> usize {
        SEGMENT_CAPACITY - self.len
    }

    pub fn is_full(&self) -> bool {
        self.len == SEGMENT_CAPACITY
    }

    /// Append as much of `bytes` as fits and return how many were copied.
    ///
    /// Input longer than `remaining()` is silently cut. Appending to a full
    /// segment returns 0 and changes nothing.
    pub fn append(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.remaining());
        if n == 0 {
            return 0;
        }

        self.data[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        n
    }

    /// Shrink the live payload to `n` bytes and return the resulting length.
    ///
    /// `n >= len()` is a no-op. Discarded bytes are not cleared.
    pub fn truncate(&mut self, n: usize) -> usize {
        if n >= self.len {
            return self.len;
        }
        self.len = n;
        n
    }

    /// Independent copy holding the current live payload
    pub fn copy(&self) -> Segment {
        let mut data = Box::new([0u8; SEGMENT_CAPACITY]);
        data[..self.len].copy_from_slice(&self.data[..self.len]);
        Segment {
            len: self.len,
            data,
        }
    }

    /// Read-only view of the live payload
    pub fn bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// New segment holding the payload suffix that starts at index `i`.
    ///
    /// Returns `None` when `i >= len()`, so a returned tail always holds at
    /// least one byte. The source segment is left untouched.
    pub fn tail(&self, i: usize) -> Option<Segment> {
        if i >= self.len {
            return None;
        }

        let mut tail = Segment::new();
        tail.append(&self.data[i..self.len]);
        Some(tail)
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Segment {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segment")
            .field("len", &self.len)
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.bytes() == other.bytes()
    }
}

impl Eq for Segment {}
