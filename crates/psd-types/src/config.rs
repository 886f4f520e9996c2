// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Top-level configuration for one PSD tube-triplet detector instance.
///
/// Aggregate overrides and per-tube parameters are resolved once, at
/// detector construction; nothing here is consulted per event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripletConfig {
    /// Detector instance name, used in error messages and file output.
    pub name: String,
    /// Total histogram channels across the three tubes. Each tube owns a
    /// contiguous band of `channels / 3` bins.
    pub channels: usize,
    /// The three tubes, in series order. Index 1 is the middle tube and
    /// defines the assembly base frame.
    pub tubes: [TubeConfig; 3],
    /// Inter-tube connector resistances [Ω]: tube0↔tube1, tube1↔tube2.
    pub connector_ohm: [f64; 2],
    /// Lead resistances at the two outer readout ends [Ω].
    #[serde(default)]
    pub lead_ohm: [f64; 2],
    /// Aggregate parameters that replace per-tube values when set > 0.
    #[serde(default)]
    pub overrides: AggregateOverrides,
    /// He-3 fill pressure [bar]; values ≤ 0 disable gas attenuation.
    #[serde(default)]
    pub pressure_bar: f64,
    /// Characteristic end-effect dead length [m]; 0 disables the roll-off.
    #[serde(default)]
    pub dead_length_m: f64,
    #[serde(default)]
    pub traversal: TraversalOrder,
    #[serde(default)]
    pub charge_division: ChargeDivision,
    /// Neutron user-slot name receiving the left-end charge.
    /// Empty or absent disables the write.
    #[serde(default)]
    pub charge_left_slot: Option<String>,
    /// Neutron user-slot name receiving the right-end charge.
    #[serde(default)]
    pub charge_right_slot: Option<String>,
    /// Neutron user-slot name receiving the chord midpoint time.
    #[serde(default)]
    pub time_slot: Option<String>,
    /// Observe-only mode: restore the neutron's kinematic state after
    /// processing, regardless of hit/miss outcome.
    #[serde(default)]
    pub non_perturbing: bool,
    /// Skip histogram file export entirely.
    #[serde(default)]
    pub no_file_output: bool,
    /// Histogram destination file.
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "psd_triplet.json".to_string()
}

/// Geometry and wiring of a single tube.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeConfig {
    pub radius_m: f64,
    pub length_m: f64,
    /// Anode wire resistivity [Ω/m].
    pub resistivity_ohm_m: f64,
    /// Position of the tube center relative to the middle tube [m].
    #[serde(default)]
    pub offset_m: [f64; 3],
    #[serde(default)]
    pub orientation: OrientationConfig,
}

/// How the tube axis orientation is specified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OrientationConfig {
    /// Explicit tilt angles about the assembly x and z axes [rad].
    Angles { about_x_rad: f64, about_z_rad: f64 },
    /// Axis derived from the two wire endpoint positions [m]. The tube
    /// center and length follow from the endpoints as well.
    Endpoints { a_m: [f64; 3], b_m: [f64; 3] },
}

impl Default for OrientationConfig {
    fn default() -> Self {
        OrientationConfig::Angles {
            about_x_rad: 0.0,
            about_z_rad: 0.0,
        }
    }
}

/// Aggregate parameters. Each value > 0 replaces the corresponding
/// per-tube value for all three tubes; `resistance_ohm` wins over
/// `resistivity_ohm_m` when both are set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AggregateOverrides {
    #[serde(default)]
    pub length_m: f64,
    #[serde(default)]
    pub radius_m: f64,
    /// Common total wire resistance per tube [Ω].
    #[serde(default)]
    pub resistance_ohm: f64,
    #[serde(default)]
    pub resistivity_ohm_m: f64,
}

/// Tube traversal order of the geometry resolver. The first intersecting
/// tube in traversal order wins; overlapping tubes are not detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// Middle tube first, tested in the assembly base frame without a
    /// transform, then the outer tubes.
    #[default]
    Shortcut,
    /// Tubes 0, 1, 2 in index order, every one fully transformed.
    Strict,
}

/// Charge-division strategy at the two readout ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ChargeDivision {
    /// Deterministic resistive divider over the series chain.
    Continuous,
    /// One uniform pulse-height draw in `[threshold, levels)`, split
    /// proportionally to the divider ratio and truncated to integers.
    Quantized { threshold: u32, levels: u32 },
}

impl Default for ChargeDivision {
    fn default() -> Self {
        ChargeDivision::Continuous
    }
}

impl TripletConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> crate::error::DetectorResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// A symmetric bank of three vertical 1-inch tubes, useful as a test
    /// and demo baseline.
    pub fn example(name: &str) -> Self {
        let tube = |x_off: f64| TubeConfig {
            radius_m: 0.0127,
            length_m: 0.30,
            resistivity_ohm_m: 1500.0,
            offset_m: [x_off, 0.0, 0.0],
            orientation: OrientationConfig::default(),
        };
        TripletConfig {
            name: name.to_string(),
            channels: 300,
            tubes: [tube(-0.03), tube(0.0), tube(0.03)],
            connector_ohm: [50.0, 50.0],
            lead_ohm: [0.0, 0.0],
            overrides: AggregateOverrides::default(),
            pressure_bar: 0.0,
            dead_length_m: 0.0,
            traversal: TraversalOrder::default(),
            charge_division: ChargeDivision::default(),
            charge_left_slot: None,
            charge_right_slot: None,
            time_slot: None,
            non_perturbing: false,
            no_file_output: false,
            filename: default_filename(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_deserializes_with_defaults() {
        let json = r#"{
            "name": "bank0",
            "channels": 300,
            "tubes": [
                {"radius_m": 0.0127, "length_m": 0.3, "resistivity_ohm_m": 1500.0},
                {"radius_m": 0.0127, "length_m": 0.3, "resistivity_ohm_m": 1500.0},
                {"radius_m": 0.0127, "length_m": 0.3, "resistivity_ohm_m": 1500.0}
            ],
            "connector_ohm": [50.0, 50.0]
        }"#;
        let cfg: TripletConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.name, "bank0");
        assert_eq!(cfg.channels, 300);
        assert_eq!(cfg.traversal, TraversalOrder::Shortcut);
        assert_eq!(cfg.charge_division, ChargeDivision::Continuous);
        assert_eq!(cfg.lead_ohm, [0.0, 0.0]);
        assert!(!cfg.non_perturbing);
        assert!(!cfg.no_file_output);
        assert!(cfg.charge_left_slot.is_none());
        assert_eq!(cfg.filename, "psd_triplet.json");
    }

    #[test]
    fn test_tagged_variants_deserialize() {
        let json = r#"{
            "name": "bank1",
            "channels": 96,
            "tubes": [
                {"radius_m": 0.0127, "length_m": 0.3, "resistivity_ohm_m": 1500.0,
                 "orientation": {"mode": "endpoints",
                                 "a_m": [0.0, -0.15, 0.0], "b_m": [0.0, 0.15, 0.0]}},
                {"radius_m": 0.0127, "length_m": 0.3, "resistivity_ohm_m": 1500.0},
                {"radius_m": 0.0127, "length_m": 0.3, "resistivity_ohm_m": 1500.0,
                 "orientation": {"mode": "angles", "about_x_rad": 0.1, "about_z_rad": 0.0}}
            ],
            "connector_ohm": [50.0, 50.0],
            "traversal": "strict",
            "charge_division": {"model": "quantized", "threshold": 100, "levels": 1024}
        }"#;
        let cfg: TripletConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.traversal, TraversalOrder::Strict);
        assert_eq!(
            cfg.charge_division,
            ChargeDivision::Quantized {
                threshold: 100,
                levels: 1024
            }
        );
        match &cfg.tubes[0].orientation {
            OrientationConfig::Endpoints { a_m, b_m } => {
                assert_eq!(a_m[1], -0.15);
                assert_eq!(b_m[1], 0.15);
            }
            other => panic!("Unexpected orientation: {other:?}"),
        }
    }

    #[test]
    fn test_roundtrip_serialization() {
        let cfg = TripletConfig::example("roundtrip");
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: TripletConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.name, cfg2.name);
        assert_eq!(cfg.channels, cfg2.channels);
        assert_eq!(cfg.connector_ohm, cfg2.connector_ohm);
        assert_eq!(cfg.traversal, cfg2.traversal);
    }

    #[test]
    fn test_overrides_default_to_disabled() {
        let ov = AggregateOverrides::default();
        assert_eq!(ov.length_m, 0.0);
        assert_eq!(ov.radius_m, 0.0);
        assert_eq!(ov.resistance_ohm, 0.0);
        assert_eq!(ov.resistivity_ohm_m, 0.0);
    }
}
