// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Charge Division
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Charge splitting at the two readout ends of the series chain.
//!
//! The continuous divider is deterministic in the hit position and the
//! fixed total resistance. The quantized divider draws one pulse height
//! per event from the injected random source and splits it by the same
//! resistance ratio, truncating to integers.

use crate::tube::TripletAssembly;
use psd_types::config::ChargeDivision;

/// One uniform draw in [0, 1). The host simulation owns seeding and
/// reproducibility; tests substitute a fixed sequence.
pub trait UniformSource {
    fn draw(&mut self) -> f64;
}

impl<R: rand::Rng> UniformSource for R {
    fn draw(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSource {
    values: Vec<f64>,
    next: usize,
}

impl FixedSource {
    pub fn new(values: Vec<f64>) -> Self {
        FixedSource { values, next: 0 }
    }
}

impl UniformSource for FixedSource {
    fn draw(&mut self) -> f64 {
        let v = self.values[self.next % self.values.len()];
        self.next += 1;
        v
    }
}

/// Split charges at the two readout ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChargeSplit {
    pub left: f64,
    pub right: f64,
}

/// Charge seen at the right readout: the series resistance between the
/// left end of the chain and the hit point, i.e. everything preceding
/// the hit tube plus the wire up to the hit.
fn resistance_to_left(assembly: &TripletAssembly, tube: usize, ty: f64) -> f64 {
    assembly.resistance_before(tube) + ty * assembly.tube(tube).resistance()
}

/// Split the event charge for a hit in `tube` at axial fraction `ty`.
///
/// Continuous: `left + right == total_resistance` for every valid hit.
/// Quantized: `left + right == height` exactly, with the height drawn
/// uniformly in `[threshold, levels)`.
pub fn split_charge<S: UniformSource + ?Sized>(
    division: ChargeDivision,
    assembly: &TripletAssembly,
    tube: usize,
    ty: f64,
    source: &mut S,
) -> ChargeSplit {
    let right_resistance = resistance_to_left(assembly, tube, ty);
    match division {
        ChargeDivision::Continuous => ChargeSplit {
            left: assembly.total_resistance() - right_resistance,
            right: right_resistance,
        },
        ChargeDivision::Quantized { threshold, levels } => {
            let span = (levels - threshold) as f64;
            let height = (threshold as f64 + source.draw() * span).floor();
            let ratio = right_resistance / assembly.total_resistance();
            let right = (height * ratio).floor();
            ChargeSplit {
                left: height - right,
                right,
            }
        }
    }
}
