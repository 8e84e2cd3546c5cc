//! Output formatting for segbuf
//!
//! - Table: ASCII table (default)
//! - JSON: Machine-readable JSON

use anyhow::Result;
use clap::ValueEnum;
use segbuf_core::BufferStats;
use tabled::{settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Bytes")]
    len: usize,
    #[tabled(rename = "Segments")]
    segments: usize,
    #[tabled(rename = "Tail Free")]
    tail_remaining: usize,
}

/// Render buffer stats in the requested format
pub fn render_stats(stats: &BufferStats, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(stats)?),
        OutputFormat::Table => {
            let row = StatsRow {
                label: stats.label.clone(),
                len: stats.len,
                segments: stats.segments,
                tail_remaining: stats.tail_remaining,
            };
            Ok(Table::new(vec![row]).with(Style::rounded()).to_string())
        }
    }
}

/// Lowercase hex, 16 bytes per line
pub fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .map(|line| {
            line.iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
