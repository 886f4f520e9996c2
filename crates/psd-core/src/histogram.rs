// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Histogram
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Position histogram: per-channel event count, weight sum and weight²
//! sum.
//!
//! The channel space is partitioned into three equal contiguous bands of
//! `channels / 3` bins, one band per tube, ordered by tube index. Cells
//! are atomic so independent rays may accumulate in parallel; summation
//! order across rays is not deterministic, only statistically equal.

use ndarray::Array1;
use std::sync::atomic::{AtomicU64, Ordering};

/// Channel index for a hit in `tube` at axial fraction `ty`, or `None`
/// when the index falls outside `[0, channels)`. `ty == 1.0` in the last
/// tube maps one past the end and is dropped; the caller skips the
/// update without failing the event.
pub fn channel_index(channels: usize, tube: usize, ty: f64) -> Option<usize> {
    let band = channels / 3;
    let within = (band as f64 * ty).floor();
    if !within.is_finite() || within < 0.0 {
        return None;
    }
    let index = within as usize + tube * band;
    (index < channels).then_some(index)
}

/// Lock-free accumulation histogram.
#[derive(Debug)]
pub struct Histogram {
    counts: Vec<AtomicU64>,
    weight: Vec<AtomicU64>,
    weight_sq: Vec<AtomicU64>,
}

/// Plain-array copy of the histogram state for export.
#[derive(Debug, Clone)]
pub struct HistogramSnapshot {
    pub counts: Vec<u64>,
    pub weight: Array1<f64>,
    pub weight_sq: Array1<f64>,
}

impl Histogram {
    /// All channels zeroed.
    pub fn new(channels: usize) -> Self {
        let zeros = |_: usize| AtomicU64::new(0);
        Histogram {
            counts: (0..channels).map(zeros).collect(),
            weight: (0..channels).map(zeros).collect(),
            weight_sq: (0..channels).map(zeros).collect(),
        }
    }

    pub fn channels(&self) -> usize {
        self.counts.len()
    }

    /// Record one detection of weight `p` into `channel`. Out-of-range
    /// channels are skipped silently.
    pub fn record(&self, channel: usize, p: f64) {
        if channel >= self.counts.len() {
            return;
        }
        self.counts[channel].fetch_add(1, Ordering::Relaxed);
        atomic_add_f64(&self.weight[channel], p);
        atomic_add_f64(&self.weight_sq[channel], p * p);
    }

    pub fn snapshot(&self) -> HistogramSnapshot {
        HistogramSnapshot {
            counts: self
                .counts
                .iter()
                .map(|c| c.load(Ordering::Relaxed))
                .collect(),
            weight: self
                .weight
                .iter()
                .map(|w| f64::from_bits(w.load(Ordering::Relaxed)))
                .collect(),
            weight_sq: self
                .weight_sq
                .iter()
                .map(|w| f64::from_bits(w.load(Ordering::Relaxed)))
                .collect(),
        }
    }

    /// Total recorded events.
    pub fn total_count(&self) -> u64 {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }
}

/// f64 add on an `AtomicU64` cell holding the value's bit pattern.
fn atomic_add_f64(cell: &AtomicU64, value: f64) {
    let mut current = cell.load(Ordering::Relaxed);
    loop {
        let next = (f64::from_bits(current) + value).to_bits();
        match cell.compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return,
            Err(seen) => current = seen,
        }
    }
}
