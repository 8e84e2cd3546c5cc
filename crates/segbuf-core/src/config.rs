//! Buffer Configuration
//!
//! ## BufferConfig
//!
//! - **label**: Name used for this buffer in log fields and metric labels (default: "default")
//! - **segment_reserve**: Initial capacity of the segment list (default: 16, i.e. ~4KB before the list regrows)
//! - **metrics**: Record Prometheus metrics for this buffer (default: true)
//!
//! None of these change what a buffer stores or returns.
//!
//! ## Usage
//!
//! ```
//! use segbuf_core::{Buffer, BufferConfig};
//!
//! let config = BufferConfig {
//!     label: "ingest".to_string(),
//!     segment_reserve: 64,
//!     ..Default::default()
//! };
//! let buffer = Buffer::with_config(config);
//! assert_eq!(buffer.config().label, "ingest");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Buffer name for logs and metrics
    #[serde(default = "default_label")]
    pub label: String,

    /// Number of segment slots to reserve up front
    #[serde(default = "default_segment_reserve")]
    pub segment_reserve: usize,

    /// Whether to record Prometheus metrics
    #[serde(default = "default_metrics")]
    pub metrics: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
            segment_reserve: default_segment_reserve(),
            metrics: default_metrics(),
        }
    }
}

fn default_label() -> String {
    "default".to_string()
}

fn default_segment_reserve() -> usize {
    16
}

fn default_metrics() -> bool {
    true
}
