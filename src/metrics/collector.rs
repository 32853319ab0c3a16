//! Metrics collection and registry.

use crate::assembly::DecodeStats;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("failed to write metrics file: {0}")]
    Io(#[from] std::io::Error),
}

/// Prometheus metrics registry for decode runs.
pub struct MetricsRegistry {
    registry: Registry,

    // Totals across decodes
    decodes_total: IntCounter,
    pixels_total: IntCounter,
    bits_total: IntCounter,
    chars_retained_total: IntCounter,
    chars_dropped_total: IntCounter,

    // Last decode
    last_trailing_bits: IntGauge,
    last_retention_ratio: Gauge,
    last_duration_seconds: Gauge,
}

impl MetricsRegistry {
    /// Creates a new metrics registry with all decode metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let decodes_total = IntCounter::new(
            "stego_extract_decodes_total",
            "Total number of completed decode passes",
        )?;
        let pixels_total = IntCounter::new(
            "stego_extract_pixels_total",
            "Total pixels traversed",
        )?;
        let bits_total = IntCounter::new(
            "stego_extract_bits_total",
            "Total bits extracted from bit-planes",
        )?;
        let chars_retained_total = IntCounter::new(
            "stego_extract_chars_retained_total",
            "Total characters kept by the printable filter",
        )?;
        let chars_dropped_total = IntCounter::new(
            "stego_extract_chars_dropped_total",
            "Total character codes dropped by the printable filter",
        )?;

        let last_trailing_bits = IntGauge::new(
            "stego_extract_last_trailing_bits",
            "Bits discarded after the last complete byte in the latest decode",
        )?;
        let last_retention_ratio = Gauge::new(
            "stego_extract_last_retention_ratio",
            "Fraction of assembled bytes kept in the latest decode",
        )?;
        let last_duration_seconds = Gauge::new(
            "stego_extract_last_duration_seconds",
            "Wall time of the latest decode",
        )?;

        registry.register(Box::new(decodes_total.clone()))?;
        registry.register(Box::new(pixels_total.clone()))?;
        registry.register(Box::new(bits_total.clone()))?;
        registry.register(Box::new(chars_retained_total.clone()))?;
        registry.register(Box::new(chars_dropped_total.clone()))?;
        registry.register(Box::new(last_trailing_bits.clone()))?;
        registry.register(Box::new(last_retention_ratio.clone()))?;
        registry.register(Box::new(last_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            decodes_total,
            pixels_total,
            bits_total,
            chars_retained_total,
            chars_dropped_total,
            last_trailing_bits,
            last_retention_ratio,
            last_duration_seconds,
        })
    }

    /// Records one finished decode.
    pub fn record(&self, stats: &DecodeStats, elapsed: Duration) {
        self.decodes_total.inc();
        self.pixels_total.inc_by(stats.pixels_visited as u64);
        self.bits_total.inc_by(stats.bits_extracted as u64);
        self.chars_retained_total.inc_by(stats.chars_retained as u64);
        self.chars_dropped_total.inc_by(stats.chars_dropped as u64);

        self.last_trailing_bits.set(stats.trailing_bits as i64);
        self.last_retention_ratio.set(stats.retention_ratio());
        self.last_duration_seconds.set(elapsed.as_secs_f64());
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Writes the text exposition to `path` for a textfile collector.
    pub fn write_textfile(&self, path: impl AsRef<Path>) -> Result<(), MetricsError> {
        std::fs::write(path.as_ref(), self.encode()?)?;
        tracing::debug!(path = %path.as_ref().display(), "Wrote metrics textfile");
        Ok(())
    }
}
