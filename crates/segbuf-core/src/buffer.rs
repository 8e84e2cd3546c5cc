//! Buffer - Segmented Append-Only Byte Stream
//!
//! A `Buffer` is an ordered list of `Segment`s that together hold one logical
//! byte stream. Writers append to the tail segment and roll over to a fresh
//! segment whenever it fills up; readers walk the list in order.
//!
//! ## How Writes Span Segments
//!
//! ```text
//! write(300 bytes)
//!         ↓
//! tail.append(300) → took 255 (segment full)
//!         ↓
//! push new segment
//!         ↓
//! tail.append(45) → took 45
//!         ↓
//! return 300
//! ```
//!
//! Only the last segment ever has spare capacity. Earlier segments are never
//! revisited, so a write at the `Buffer` level never loses bytes even though a
//! single `Segment::append` may be short.
//!
//! ## Thread Safety
//!
//! One `RwLock` guards the whole segment list:
//! - `write` holds the exclusive lock for the whole call
//! - `len`, `read_at`, `drain_to`, `snapshot`, `to_bytes` and `stats` hold the shared lock
//!
//! Readers never block each other, but a slow sink in `drain_to` holds the
//! shared lock for as long as it stalls, which also delays queued writers.
//!
//! ## Snapshots
//!
//! `snapshot` copies every segment into a new `Buffer`. Writes to either side
//! afterwards are invisible to the other.
//!
//! ## Example
//!
//! ```
//! use segbuf_core::Buffer;
//!
//! let buffer = Buffer::new();
//! buffer.write_string("ohai!");
//! assert_eq!(buffer.len(), 5);
//!
//! let mut out = Vec::new();
//! let sent = buffer.drain_to(&mut out).unwrap();
//! assert_eq!(sent, 5);
//! assert_eq!(out, b"ohai!");
//! assert_eq!(buffer.len(), 5);
//! ```

use std::fmt;
use std::io;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use bytes::{BufMut, Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use segbuf_observability::metrics;

use crate::config::BufferConfig;
use crate::error::{Error, Result};
use crate::segment::Segment;

/// Growable sequence of segments holding one logical byte stream
pub struct Buffer {
    config: BufferConfig,

    /// Segments in stream order; only the last one may have spare capacity
    segments: RwLock<Vec<Segment>>,
}

/// Point-in-time summary of a buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferStats {
    /// Buffer label from its config
    pub label: String,

    /// Logical length in bytes
    pub len: usize,

    /// Number of allocated segments
    pub segments: usize,

    /// Bytes the tail segment can still take before a rollover
    pub tail_remaining: usize,
}

impl Buffer {
    /// Create an empty buffer with the default config
    pub fn new() -> Self {
        Self::with_config(BufferConfig::default())
    }

    pub fn with_config(config: BufferConfig) -> Self {
        let segments = Vec::with_capacity(config.segment_reserve);
        Self {
            config,
            segments: RwLock::new(segments),
        }
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Logical length: the sum of all segment lengths
    pub fn len(&self) -> usize {
        self.read_segments().iter().map(Segment::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.read_segments().iter().all(Segment::is_empty)
    }

    pub fn segment_count(&self) -> usize {
        self.read_segments().len()
    }

    /// Append `bytes` to the stream, allocating segments as needed.
    ///
    /// Always consumes the whole input and returns its length.
    pub fn write(&self, bytes: &[u8]) -> usize {
        let mut segments = self.write_segments();
        let mut allocated = 0u64;

        if segments.is_empty() {
            segments.push(Segment::new());
            allocated += 1;
        }

        let mut written = 0;
        while written < bytes.len() {
            let appended = match segments.last_mut() {
                Some(tail) => tail.append(&bytes[written..]),
                None => 0,
            };
            written += appended;

            if written < bytes.len() {
                segments.push(Segment::new());
                allocated += 1;
                debug!(
                    label = %self.config.label,
                    segments = segments.len(),
                    "Tail segment full, allocated new segment"
                );
            }
        }
        drop(segments);

        trace!(label = %self.config.label, bytes = written, "Buffer write");

        if self.config.metrics {
            let label = [self.config.label.as_str()];
            metrics::BYTES_WRITTEN_TOTAL
                .with_label_values(&label)
                .inc_by(written as u64);
            if allocated > 0 {
                metrics::SEGMENTS_ALLOCATED_TOTAL
                    .with_label_values(&label)
                    .inc_by(allocated);
            }
        }

        written
    }

    /// Append the UTF-8 bytes of `text`; returns the byte count
    pub fn write_string(&self, text: &str) -> usize {
        self.write(text.as_bytes())
    }

    /// Copy bytes from the start of the stream into `dst`.
    ///
    /// Only `offset == 0` is supported; any other offset fails with
    /// `Error::Unsupported` before anything is copied. Returns the number of
    /// bytes copied, which is the smaller of `dst.len()` and `len()`.
    pub fn read_at(&self, dst: &mut [u8], offset: u64) -> Result<usize> {
        if offset != 0 {
            if self.config.metrics {
                metrics::READ_AT_UNSUPPORTED_TOTAL.inc();
            }
            return Err(Error::Unsupported { offset });
        }

        let segments = self.read_segments();
        let mut copied = 0;
        for segment in segments.iter() {
            if copied == dst.len() {
                break;
            }
            let src = segment.bytes();
            let n = src.len().min(dst.len() - copied);
            dst[copied..copied + n].copy_from_slice(&src[..n]);
            copied += n;
        }

        Ok(copied)
    }

    /// Write the whole stream, segment by segment, to `sink`.
    ///
    /// The buffer keeps its contents. On a sink error the drain stops at once
    /// and `Error::SinkFailure` reports how many bytes the sink had accepted.
    pub fn drain_to<W: io::Write + ?Sized>(&self, sink: &mut W) -> Result<u64> {
        let segments = self.read_segments();
        let mut written = 0u64;

        for segment in segments.iter() {
            let mut pending = segment.bytes();
            while !pending.is_empty() {
                match sink.write(pending) {
                    Ok(0) => {
                        let source =
                            io::Error::new(io::ErrorKind::WriteZero, "sink accepted no bytes");
                        return Err(self.drain_failed(written, source));
                    }
                    Ok(n) => {
                        written += n as u64;
                        pending = &pending[n..];
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(self.drain_failed(written, e)),
                }
            }
        }
        drop(segments);

        trace!(label = %self.config.label, bytes = written, "Buffer drained");

        if self.config.metrics {
            metrics::DRAIN_BYTES_TOTAL
                .with_label_values(&[self.config.label.as_str()])
                .inc_by(written);
        }

        Ok(written)
    }

    /// Independent copy of the buffer as it is right now
    pub fn snapshot(&self) -> Buffer {
        let segments = self.read_segments();
        let mut copies = Vec::with_capacity(segments.len().max(self.config.segment_reserve));
        copies.extend(segments.iter().map(Segment::copy));
        drop(segments);

        debug!(
            label = %self.config.label,
            segments = copies.len(),
            "Buffer snapshot taken"
        );

        if self.config.metrics {
            metrics::SNAPSHOTS_TOTAL
                .with_label_values(&[self.config.label.as_str()])
                .inc();
        }

        Buffer {
            config: self.config.clone(),
            segments: RwLock::new(copies),
        }
    }

    /// Concatenate the stream into one contiguous `Bytes`
    pub fn to_bytes(&self) -> Bytes {
        let segments = self.read_segments();
        let total = segments.iter().map(Segment::len).sum();

        let mut out = BytesMut::with_capacity(total);
        for segment in segments.iter() {
            out.put_slice(segment.bytes());
        }
        out.freeze()
    }

    pub fn stats(&self) -> BufferStats {
        let segments = self.read_segments();
        BufferStats {
            label: self.config.label.clone(),
            len: segments.iter().map(Segment::len).sum(),
            segments: segments.len(),
            tail_remaining: segments.last().map(Segment::remaining).unwrap_or(0),
        }
    }

    fn drain_failed(&self, written: u64, source: io::Error) -> Error {
        warn!(
            label = %self.config.label,
            written = written,
            error = %source,
            "Sink failed during drain"
        );

        if self.config.metrics {
            let label = [self.config.label.as_str()];
            metrics::DRAIN_ERRORS_TOTAL.with_label_values(&label).inc();
            metrics::DRAIN_BYTES_TOTAL
                .with_label_values(&label)
                .inc_by(written);
        }

        Error::SinkFailure { written, source }
    }

    // A writer that panics leaves every segment consistent, so poisoning
    // carries no information here.
    fn read_segments(&self) -> RwLockReadGuard<'_, Vec<Segment>> {
        self.segments.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_segments(&self) -> RwLockWriteGuard<'_, Vec<Segment>> {
        self.segments.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Buffer {
    fn clone(&self) -> Self {
        self.snapshot()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        f.debug_struct("Buffer")
            .field("label", &stats.label)
            .field("len", &stats.len)
            .field("segments", &stats.segments)
            .finish()
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Buffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for &Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Buffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SEGMENT_CAPACITY;
    use std::io::Write;

    fn quiet() -> Buffer {
        Buffer::with_config(BufferConfig {
            label: "unit".to_string(),
            metrics: false,
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = quiet();
        assert_eq!(buffer.len(), 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.segment_count(), 0);

        let mut out = Vec::new();
        assert_eq!(buffer.drain_to(&mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_creates_first_segment() {
        let buffer = quiet();
        assert_eq!(buffer.write(&[]), 0);
        assert_eq!(buffer.segment_count(), 1);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_ohai_roundtrip() {
        let buffer = quiet();
        assert_eq!(buffer.write_string("ohai!"), 5);
        assert_eq!(buffer.len(), 5);

        let mut out = Vec::new();
        assert_eq!(buffer.drain_to(&mut out).unwrap(), 5);
        assert_eq!(out, vec![b'o', b'h', b'a', b'i', b'!']);
        assert_eq!(buffer.len(), 5);
    }

    #[test]
    fn test_write_spans_segments() {
        let buffer = quiet();
        let input: Vec<u8> = (0..256u32).map(|i| i as u8).collect();

        assert_eq!(buffer.write(&input), 256);
        assert_eq!(buffer.len(), 256);
        assert_eq!(buffer.segment_count(), 2);
        assert_eq!(buffer.to_bytes(), Bytes::from(input));
    }

    #[test]
    fn test_exact_fill_does_not_allocate_early() {
        let buffer = quiet();
        buffer.write(&[7; SEGMENT_CAPACITY]);
        assert_eq!(buffer.segment_count(), 1);
        assert_eq!(buffer.stats().tail_remaining, 0);

        buffer.write(&[8]);
        assert_eq!(buffer.segment_count(), 2);
        assert_eq!(buffer.stats().tail_remaining, SEGMENT_CAPACITY - 1);
    }

    #[test]
    fn test_read_at_rejects_nonzero_offset() {
        let buffer = quiet();
        buffer.write_string("abc");

        let mut dst = [0xFFu8; 3];
        let err = buffer.read_at(&mut dst, 1).unwrap_err();
        assert!(matches!(err, Error::Unsupported { offset: 1 }));
        assert_eq!(dst, [0xFF; 3]);
    }

    #[test]
    fn test_read_at_bounded_by_destination() {
        let buffer = quiet();
        buffer.write(&[1; 300]);

        let mut small = [0u8; 10];
        assert_eq!(buffer.read_at(&mut small, 0).unwrap(), 10);
        assert_eq!(small, [1; 10]);

        let mut large = [0u8; 400];
        assert_eq!(buffer.read_at(&mut large, 0).unwrap(), 300);
        assert!(large[..300].iter().all(|&b| b == 1));
        assert!(large[300..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_snapshot_is_independent() {
        let buffer = quiet();
        buffer.write_string("before");

        let snapshot = buffer.snapshot();
        buffer.write_string("-after");
        snapshot.write_string("-fork");

        assert_eq!(&buffer.to_bytes()[..], b"before-after");
        assert_eq!(&snapshot.to_bytes()[..], b"before-fork");
        assert_eq!(snapshot.config(), buffer.config());
    }

    #[test]
    fn test_io_write_impls() {
        let mut buffer = quiet();
        write!(buffer, "{}-{}", "io", 42).unwrap();
        buffer.flush().unwrap();

        let shared = &buffer;
        let mut handle = shared;
        handle.write_all(b"!").unwrap();

        assert_eq!(&buffer.to_bytes()[..], b"io-42!");
    }

    #[test]
    fn test_stats() {
        let buffer = quiet();
        assert_eq!(
            buffer.stats(),
            BufferStats {
                label: "unit".to_string(),
                len: 0,
                segments: 0,
                tail_remaining: 0,
            }
        );

        buffer.write(&[0; 260]);
        let stats = buffer.stats();
        assert_eq!(stats.len, 260);
        assert_eq!(stats.segments, 2);
        assert_eq!(stats.tail_remaining, SEGMENT_CAPACITY - 5);
    }

    #[test]
    fn test_metrics_recorded_per_label() {
        let buffer = Buffer::with_config(BufferConfig {
            label: "buffer-unit-metrics".to_string(),
            ..Default::default()
        });
        buffer.write(&[0; 300]);

        let label = ["buffer-unit-metrics"];
        assert_eq!(
            metrics::BYTES_WRITTEN_TOTAL.with_label_values(&label).get(),
            300
        );
        assert_eq!(
            metrics::SEGMENTS_ALLOCATED_TOTAL
                .with_label_values(&label)
                .get(),
            2
        );
    }
}
