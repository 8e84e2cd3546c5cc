//! segbuf Observability
//!
//! Prometheus metrics for buffer activity.
//!
//! # Features
//!
//! - Per-buffer counters labelled by `BufferConfig::label`
//! - Prometheus text exposition written to any `io::Write`
//!
//! # Usage
//!
//! ```
//! use segbuf_observability::{exporter, metrics};
//!
//! metrics::init();
//! metrics::BYTES_WRITTEN_TOTAL.with_label_values(&["ingest"]).inc_by(5);
//!
//! let text = exporter::encode_text().unwrap();
//! assert!(text.contains("segbuf_bytes_written_total"));
//! ```

pub mod exporter;
pub mod metrics;

pub use metrics::{init as init_metrics, REGISTRY};

/// Initialize all observability components
pub fn init() {
    metrics::init();
}
