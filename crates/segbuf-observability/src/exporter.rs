use std::io;

use prometheus::{Encoder, TextEncoder};

use crate::metrics::REGISTRY;

/// Render every registered metric in the Prometheus text format
pub fn encode_text() -> prometheus::Result<String> {
    let mut buffer = Vec::new();
    write_text(&mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Write every registered metric in the Prometheus text format to `sink`
pub fn write_text<W: io::Write>(sink: &mut W) -> prometheus::Result<()> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    encoder.encode(&metric_families, sink)
}

/// Content type of the text exposition format
pub fn content_type() -> String {
    TextEncoder::new().format_type().to_string()
}
