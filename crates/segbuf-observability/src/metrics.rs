use lazy_static::lazy_static;
use prometheus::{IntCounter, IntCounterVec, Opts, Registry};
use std::sync::Once;

static INIT: Once = Once::new();

lazy_static! {
    /// Global Prometheus metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // Write Path
    // ============================================================================

    /// Total bytes written into buffers
    pub static ref BYTES_WRITTEN_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("segbuf_bytes_written_total", "Total bytes written into buffers"),
        &["buffer"]
    ).expect("metric can be created");

    /// Total segments allocated by buffers
    pub static ref SEGMENTS_ALLOCATED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("segbuf_segments_allocated_total", "Total segments allocated"),
        &["buffer"]
    ).expect("metric can be created");

    // ============================================================================
    // Read Path
    // ============================================================================

    /// Total bytes handed to drain sinks, including partial drains
    pub static ref DRAIN_BYTES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("segbuf_drain_bytes_total", "Total bytes drained to sinks"),
        &["buffer"]
    ).expect("metric can be created");

    /// Drains aborted by a sink error
    pub static ref DRAIN_ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("segbuf_drain_errors_total", "Total drains aborted by sink errors"),
        &["buffer"]
    ).expect("metric can be created");

    /// Snapshots taken
    pub static ref SNAPSHOTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("segbuf_snapshots_total", "Total buffer snapshots taken"),
        &["buffer"]
    ).expect("metric can be created");

    /// read_at calls rejected for a nonzero offset
    pub static ref READ_AT_UNSUPPORTED_TOTAL: IntCounter = IntCounter::new(
        "segbuf_read_at_unsupported_total",
        "Total read_at calls rejected for a nonzero offset"
    ).expect("metric can be created");
}

/// Initialize metrics registry
/// Can be called multiple times safely (idempotent)
pub fn init() {
    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(BYTES_WRITTEN_TOTAL.clone()))
            .expect("bytes_written_total can be registered");
        REGISTRY
            .register(Box::new(SEGMENTS_ALLOCATED_TOTAL.clone()))
            .expect("segments_allocated_total can be registered");
        REGISTRY
            .register(Box::new(DRAIN_BYTES_TOTAL.clone()))
            .expect("drain_bytes_total can be registered");
        REGISTRY
            .register(Box::new(DRAIN_ERRORS_TOTAL.clone()))
            .expect("drain_errors_total can be registered");
        REGISTRY
            .register(Box::new(SNAPSHOTS_TOTAL.clone()))
            .expect("snapshots_total can be registered");
        REGISTRY
            .register(Box::new(READ_AT_UNSUPPORTED_TOTAL.clone()))
            .expect("read_at_unsupported_total can be registered");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        init();
        // If no panic, registration succeeded
    }

    #[test]
    fn test_write_path_metrics() {
        BYTES_WRITTEN_TOTAL.with_label_values(&["metrics-test"]).inc_by(1024);
        SEGMENTS_ALLOCATED_TOTAL.with_label_values(&["metrics-test"]).inc_by(5);

        assert_eq!(
            BYTES_WRITTEN_TOTAL.with_label_values(&["metrics-test"]).get(),
            1024
        );
        assert_eq!(
            SEGMENTS_ALLOCATED_TOTAL
                .with_label_values(&["metrics-test"])
                .get(),
            5
        );
    }

    #[test]
    fn test_drain_metrics() {
        DRAIN_BYTES_TOTAL.with_label_values(&["drain-test"]).inc_by(300);
        DRAIN_ERRORS_TOTAL.with_label_values(&["drain-test"]).inc();

        assert_eq!(DRAIN_BYTES_TOTAL.with_label_values(&["drain-test"]).get(), 300);
        assert_eq!(DRAIN_ERRORS_TOTAL.with_label_values(&["drain-test"]).get(), 1);
    }
}
