//! Prometheus metrics for decode runs.
//!
//! The decoder is a one-shot tool, so metrics are written in text
//! exposition format to a file (for the node exporter's textfile
//! collector) rather than served over HTTP.
//!
//! # Metrics Exposed
//!
//! - `stego_extract_decodes_total` - Completed decode passes
//! - `stego_extract_pixels_total` - Pixels traversed
//! - `stego_extract_bits_total` - Bits extracted
//! - `stego_extract_chars_retained_total` - Characters kept by the filter
//! - `stego_extract_chars_dropped_total` - Codes dropped by the filter
//! - `stego_extract_last_trailing_bits` - Partial-byte bits discarded in the latest decode
//! - `stego_extract_last_retention_ratio` - Kept / assembled bytes in the latest decode
//! - `stego_extract_last_duration_seconds` - Wall time of the latest decode
//!
//! # Example
//!
//! ```no_run
//! use stego_extract::assembly::DecodeStats;
//! use stego_extract::metrics::MetricsRegistry;
//! use std::time::Duration;
//!
//! let registry = MetricsRegistry::new().expect("Failed to create registry");
//! registry.record(&DecodeStats::default(), Duration::from_millis(3));
//! registry.write_textfile("/var/lib/node_exporter/stego.prom").unwrap();
//! ```

mod collector;

pub use collector::{MetricsError, MetricsRegistry};
