// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Detector
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! The triplet detector instance: per-neutron processing, terminal
//! classification, parallel batch tracing, and finalization.
//!
//! Initialization is single-threaded and fail-fast: slot names and tube
//! parameters are validated before any tracing. Per-ray processing takes
//! `&self`; the histogram is the only shared mutable state.

use crate::charge::{split_charge, UniformSource};
use crate::histogram::{channel_index, Histogram};
use crate::response::{axial_fraction, end_effect_scale, gas_transmission};
use crate::tube::{TripletAssembly, TubeHit};
use crate::writer::HistogramFile;
use psd_geometry::Vec3;
use psd_types::config::{ChargeDivision, TripletConfig};
use psd_types::constants::{CHARGE_MISS, T_IN_MISS, T_OUT_MISS};
use psd_types::error::{DetectorError, DetectorResult};
use psd_types::state::{Neutron, SlotHandle, SlotSchema};

/// Terminal classification of one processed ray.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The ray hit a tube and is consumed by the detector.
    Detected,
    /// No tube absorbed the ray; it is removed from the simulation.
    Absorbed,
}

/// Transient per-ray record. Misses carry the sentinel values
/// `t_in = -2`, `t_out = -1`, charges `-1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionEvent {
    pub tube: Option<usize>,
    pub t_in: f64,
    pub t_out: f64,
    pub axial: Option<f64>,
    pub channel: Option<usize>,
    pub charge_left: f64,
    pub charge_right: f64,
}

impl DetectionEvent {
    fn miss() -> Self {
        DetectionEvent {
            tube: None,
            t_in: T_IN_MISS,
            t_out: T_OUT_MISS,
            axial: None,
            channel: None,
            charge_left: CHARGE_MISS,
            charge_right: CHARGE_MISS,
        }
    }
}

/// Batch totals from `trace_batch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraceSummary {
    pub detected: u64,
    pub absorbed: u64,
}

/// Output slot handles, resolved once at initialization.
#[derive(Debug, Clone, Copy, Default)]
struct OutputSlots {
    charge_left: Option<SlotHandle>,
    charge_right: Option<SlotHandle>,
    time: Option<SlotHandle>,
}

/// One PSD tube-triplet detector instance. Owns its histogram; no state
/// is shared across instances.
#[derive(Debug)]
pub struct TripletDetector {
    name: String,
    assembly: TripletAssembly,
    histogram: Histogram,
    division: ChargeDivision,
    pressure_bar: f64,
    /// Dead length normalized per tube by that tube's length.
    dead_norm: [f64; 3],
    slots: OutputSlots,
    non_perturbing: bool,
    no_file_output: bool,
    filename: String,
}

impl TripletDetector {
    /// Build and validate a detector. All configuration resolution
    /// happens here, strictly before any tracing; a requested slot name
    /// missing from `schema` is fatal.
    pub fn new(cfg: &TripletConfig, schema: &SlotSchema) -> DetectorResult<Self> {
        if cfg.channels < 3 {
            return Err(DetectorError::ConfigError(format!(
                "channel count must allow three bands, got {}",
                cfg.channels
            )));
        }
        if let ChargeDivision::Quantized { threshold, levels } = cfg.charge_division {
            if levels <= threshold {
                return Err(DetectorError::ConfigError(format!(
                    "pulse-height levels ({levels}) must exceed threshold ({threshold})"
                )));
            }
        }

        let assembly = TripletAssembly::from_config(cfg)?;
        let mut dead_norm = [0.0; 3];
        if cfg.dead_length_m > 0.0 {
            for (i, norm) in dead_norm.iter_mut().enumerate() {
                *norm = cfg.dead_length_m / assembly.tube(i).length;
            }
        }

        let resolve = |requested: &Option<String>| -> DetectorResult<Option<SlotHandle>> {
            match requested.as_deref().filter(|s| !s.is_empty()) {
                None => Ok(None),
                Some(name) => schema
                    .resolve(name)
                    .map(Some)
                    .ok_or_else(|| DetectorError::MissingSlot {
                        detector: cfg.name.clone(),
                        slot: name.to_string(),
                    }),
            }
        };
        let slots = OutputSlots {
            charge_left: resolve(&cfg.charge_left_slot)?,
            charge_right: resolve(&cfg.charge_right_slot)?,
            time: resolve(&cfg.time_slot)?,
        };

        Ok(TripletDetector {
            name: cfg.name.clone(),
            histogram: Histogram::new(cfg.channels),
            assembly,
            division: cfg.charge_division,
            pressure_bar: cfg.pressure_bar,
            dead_norm,
            slots,
            non_perturbing: cfg.non_perturbing,
            no_file_output: cfg.no_file_output,
            filename: cfg.filename.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assembly(&self) -> &TripletAssembly {
        &self.assembly
    }

    pub fn histogram(&self) -> &Histogram {
        &self.histogram
    }

    /// Process one neutron: resolve the struck tube, attenuate the
    /// weight, accumulate the histogram, split the charge, write the
    /// configured output slots, classify, and apply the restore policy.
    pub fn process<S: UniformSource + ?Sized>(
        &self,
        neutron: &mut Neutron,
        source: &mut S,
    ) -> (Outcome, DetectionEvent) {
        let saved = self.non_perturbing.then(|| neutron.kinematics());

        let position = Vec3::from_array(neutron.position);
        let velocity = Vec3::from_array(neutron.velocity);
        let (outcome, event) = match self.assembly.locate_hit(position, velocity) {
            None => (Outcome::Absorbed, DetectionEvent::miss()),
            Some(hit) => self.register_hit(neutron, &hit, source),
        };

        if let Some(saved) = saved {
            neutron.restore(&saved);
        }
        (outcome, event)
    }

    fn register_hit<S: UniformSource + ?Sized>(
        &self,
        neutron: &mut Neutron,
        hit: &TubeHit,
        source: &mut S,
    ) -> (Outcome, DetectionEvent) {
        let tube = self.assembly.tube(hit.tube);
        let ty = axial_fraction(hit, tube.length);
        if !(0.0..=1.0).contains(&ty) {
            // Numerical edge near the tube ends under the midpoint
            // approximation.
            return (Outcome::Absorbed, DetectionEvent::miss());
        }

        let chord_dt = hit.t_out - hit.t_in;
        if self.pressure_bar > 0.0 && chord_dt != 0.0 {
            let transmit = gas_transmission(self.pressure_bar, chord_dt);
            neutron.weight *= 1.0 - transmit;
        }
        neutron.weight *= end_effect_scale(ty, self.dead_norm[hit.tube]);

        let channel = channel_index(self.histogram.channels(), hit.tube, ty);
        if let Some(channel) = channel {
            self.histogram.record(channel, neutron.weight);
        }

        let split = split_charge(self.division, &self.assembly, hit.tube, ty, source);
        if let Some(slot) = self.slots.charge_left {
            neutron.set_slot(slot, split.left);
        }
        if let Some(slot) = self.slots.charge_right {
            neutron.set_slot(slot, split.right);
        }
        if let Some(slot) = self.slots.time {
            neutron.set_slot(slot, 0.5 * (hit.t_in + hit.t_out));
        }

        let event = DetectionEvent {
            tube: Some(hit.tube),
            t_in: hit.t_in,
            t_out: hit.t_out,
            axial: Some(ty),
            channel,
            charge_left: split.left,
            charge_right: split.right,
        };
        (Outcome::Detected, event)
    }

    /// Trace a batch of independent rays in parallel. Histogram sums
    /// accumulate atomically; their floating-point order is not
    /// deterministic across runs.
    pub fn trace_batch(&self, neutrons: &mut [Neutron]) -> TraceSummary {
        use rayon::prelude::*;
        let (detected, absorbed) = neutrons
            .par_iter_mut()
            .map(|neutron| {
                let mut rng = rand::thread_rng();
                match self.process(neutron, &mut rng).0 {
                    Outcome::Detected => (1u64, 0u64),
                    Outcome::Absorbed => (0u64, 1u64),
                }
            })
            .reduce(|| (0, 0), |a, b| (a.0 + b.0, a.1 + b.1));
        TraceSummary { detected, absorbed }
    }

    /// Export snapshot for the histogram writer.
    pub fn export(&self) -> HistogramFile {
        let snapshot = self.histogram.snapshot();
        HistogramFile {
            title: format!("{} tube-triplet position histogram", self.name),
            xlabel: "Position along tube bank [channel]".to_string(),
            ylabel: "Intensity".to_string(),
            xvar: "ch".to_string(),
            xlimits: [0.0, self.histogram.channels() as f64],
            channels: self.histogram.channels(),
            counts: snapshot.counts,
            weight: snapshot.weight.to_vec(),
            weight_sq: snapshot.weight_sq.to_vec(),
            component: self.name.clone(),
        }
    }

    /// Write the histogram file unless file output is disabled. Returns
    /// whether a file was written. Call once, after all tracing.
    pub fn finalize(&self) -> DetectorResult<bool> {
        if self.no_file_output {
            return Ok(false);
        }
        crate::writer::write_histogram(&self.filename, &self.export())?;
        Ok(true)
    }
}
