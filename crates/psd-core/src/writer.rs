// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Histogram Writer
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One-dimensional histogram export.
//!
//! Runs single-threaded, strictly after all tracing; the detector skips
//! it entirely when file output is disabled.

use psd_types::error::DetectorResult;
use serde::{Deserialize, Serialize};

/// Exported histogram: axis metadata plus the three parallel arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistogramFile {
    pub title: String,
    pub xlabel: String,
    pub ylabel: String,
    /// Axis variable name.
    pub xvar: String,
    /// Bin range `[0, channels)`.
    pub xlimits: [f64; 2],
    pub channels: usize,
    /// Event count per channel.
    pub counts: Vec<u64>,
    /// Weight sum per channel.
    pub weight: Vec<f64>,
    /// Weight² sum per channel.
    pub weight_sq: Vec<f64>,
    /// Producing detector instance.
    pub component: String,
}

/// Serialize the histogram to pretty JSON at `path`.
pub fn write_histogram(path: &str, file: &HistogramFile) -> DetectorResult<()> {
    let json = serde_json::to_string_pretty(file)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> HistogramFile {
        HistogramFile {
            title: "bank0 tube-triplet position histogram".to_string(),
            xlabel: "Position along tube bank [channel]".to_string(),
            ylabel: "Intensity".to_string(),
            xvar: "ch".to_string(),
            xlimits: [0.0, 6.0],
            channels: 6,
            counts: vec![0, 1, 2, 0, 0, 4],
            weight: vec![0.0, 0.5, 1.5, 0.0, 0.0, 2.0],
            weight_sq: vec![0.0, 0.25, 1.25, 0.0, 0.0, 1.0],
            component: "bank0".to_string(),
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let file = sample_file();
        let json = serde_json::to_string(&file).unwrap();
        let back: HistogramFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.channels, 6);
        assert_eq!(back.counts, file.counts);
        assert_eq!(back.weight, file.weight);
        assert_eq!(back.weight_sq, file.weight_sq);
        assert_eq!(back.component, "bank0");
    }

    #[test]
    fn test_write_and_read_back() {
        let path = std::env::temp_dir().join("psd_writer_test_histogram.json");
        let path = path.to_string_lossy().to_string();
        write_histogram(&path, &sample_file()).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        let back: HistogramFile = serde_json::from_str(&contents).unwrap();
        assert_eq!(back.xlimits, [0.0, 6.0]);
        assert_eq!(back.counts.len(), back.channels);
        std::fs::remove_file(&path).ok();
    }
}
