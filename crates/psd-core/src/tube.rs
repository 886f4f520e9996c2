// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Tube Assembly
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Static geometric and electrical description of the three tubes, and
//! the geometry resolver that finds the first intersecting tube for a
//! ray.

use psd_geometry::rotation::axis_tilt_angles;
use psd_geometry::{cylinder, Mat3, Vec3};
use psd_types::config::{
    AggregateOverrides, OrientationConfig, TraversalOrder, TripletConfig, TubeConfig,
};
use psd_types::error::{DetectorError, DetectorResult};

/// One resolved position-sensitive tube. Immutable after construction.
#[derive(Debug, Clone)]
pub struct Tube {
    pub radius: f64,
    pub length: f64,
    /// Anode wire resistivity [Ω/m].
    pub resistivity: f64,
    /// Tube center relative to the middle tube [m].
    pub offset: Vec3,
    /// Local→assembly rotation; the tube axis is local +y.
    pub rotation: Mat3,
    /// Cached assembly→local rotation.
    inv_rotation: Mat3,
}

impl Tube {
    /// Resolve a tube from its configuration and the aggregate
    /// overrides. Endpoint-parameterized tubes derive center, length and
    /// orientation from the wire endpoints; overrides still win for
    /// length, radius and resistance.
    pub fn resolve(
        index: usize,
        cfg: &TubeConfig,
        overrides: &AggregateOverrides,
    ) -> DetectorResult<Tube> {
        let (derived_length, offset, rotation) = match &cfg.orientation {
            OrientationConfig::Angles {
                about_x_rad,
                about_z_rad,
            } => (
                None,
                Vec3::from_array(cfg.offset_m),
                Mat3::tilt_xz(*about_x_rad, *about_z_rad),
            ),
            OrientationConfig::Endpoints { a_m, b_m } => {
                let a = Vec3::from_array(*a_m);
                let b = Vec3::from_array(*b_m);
                let axis = b - a;
                let direction = axis.normalized().ok_or_else(|| DetectorError::TubeGeometry {
                    index,
                    message: "wire endpoints coincide".to_string(),
                })?;
                let (ax, az) = axis_tilt_angles(direction);
                let center = (a + b) * 0.5;
                (Some(axis.norm()), center, Mat3::tilt_xz(ax, az))
            }
        };

        let length = if overrides.length_m > 0.0 {
            overrides.length_m
        } else {
            derived_length.unwrap_or(cfg.length_m)
        };
        let radius = if overrides.radius_m > 0.0 {
            overrides.radius_m
        } else {
            cfg.radius_m
        };
        if length <= 0.0 || !length.is_finite() {
            return Err(DetectorError::TubeGeometry {
                index,
                message: format!("length must be finite and > 0, got {length}"),
            });
        }
        if radius <= 0.0 || !radius.is_finite() {
            return Err(DetectorError::TubeGeometry {
                index,
                message: format!("radius must be finite and > 0, got {radius}"),
            });
        }

        let resistivity = if overrides.resistance_ohm > 0.0 {
            overrides.resistance_ohm / length
        } else if overrides.resistivity_ohm_m > 0.0 {
            overrides.resistivity_ohm_m
        } else {
            cfg.resistivity_ohm_m
        };
        if resistivity < 0.0 || !resistivity.is_finite() {
            return Err(DetectorError::TubeGeometry {
                index,
                message: format!("resistivity must be finite and >= 0, got {resistivity}"),
            });
        }

        Ok(Tube {
            radius,
            length,
            resistivity,
            offset,
            rotation,
            inv_rotation: rotation.transpose(),
        })
    }

    /// Total wire resistance of this tube [Ω].
    pub fn resistance(&self) -> f64 {
        self.resistivity * self.length
    }

    /// Transform an assembly-frame ray into this tube's local frame.
    pub fn to_local(&self, position: Vec3, velocity: Vec3) -> (Vec3, Vec3) {
        (
            self.inv_rotation.apply(position - self.offset),
            self.inv_rotation.apply(velocity),
        )
    }

    /// Transform a local point back into the assembly frame.
    pub fn to_assembly(&self, local: Vec3) -> Vec3 {
        self.rotation.apply(local) + self.offset
    }
}

/// First intersecting tube for a ray: tube index, entry/exit ray-time
/// parameters, and the local-frame ray the crossing was computed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeHit {
    pub tube: usize,
    pub t_in: f64,
    pub t_out: f64,
    pub local_position: Vec3,
    pub local_velocity: Vec3,
}

/// Three serially-wired tubes with their connector and lead resistances.
///
/// The series chain runs left readout → tube 0 → connector 0 → tube 1 →
/// connector 1 → tube 2 → right readout. `total_resistance` is computed
/// once at construction and never mutated.
#[derive(Debug, Clone)]
pub struct TripletAssembly {
    tubes: [Tube; 3],
    traversal: TraversalOrder,
    total_resistance: f64,
    resistance_before: [f64; 3],
}

impl TripletAssembly {
    pub fn from_config(cfg: &TripletConfig) -> DetectorResult<Self> {
        let tubes = [
            Tube::resolve(0, &cfg.tubes[0], &cfg.overrides)?,
            Tube::resolve(1, &cfg.tubes[1], &cfg.overrides)?,
            Tube::resolve(2, &cfg.tubes[2], &cfg.overrides)?,
        ];
        for (i, r) in cfg.connector_ohm.iter().chain(cfg.lead_ohm.iter()).enumerate() {
            if *r < 0.0 || !r.is_finite() {
                return Err(DetectorError::ConfigError(format!(
                    "connector/lead resistance [{i}] must be finite and >= 0, got {r}"
                )));
            }
        }

        let mut resistance_before = [0.0; 3];
        let mut running = cfg.lead_ohm[0];
        for i in 0..3 {
            resistance_before[i] = running;
            running += tubes[i].resistance();
            if i < 2 {
                running += cfg.connector_ohm[i];
            }
        }
        let total_resistance = running + cfg.lead_ohm[1];
        if total_resistance <= 0.0 || !total_resistance.is_finite() {
            return Err(DetectorError::ConfigError(format!(
                "total series resistance must be > 0, got {total_resistance}"
            )));
        }

        Ok(TripletAssembly {
            tubes,
            traversal: cfg.traversal,
            total_resistance,
            resistance_before,
        })
    }

    pub fn tube(&self, index: usize) -> &Tube {
        &self.tubes[index]
    }

    pub fn tubes(&self) -> &[Tube; 3] {
        &self.tubes
    }

    /// Fixed series resistance of the whole chain [Ω].
    pub fn total_resistance(&self) -> f64 {
        self.total_resistance
    }

    /// Series resistance preceding tube `index`: left lead, earlier
    /// tubes and earlier connectors.
    pub fn resistance_before(&self, index: usize) -> f64 {
        self.resistance_before[index]
    }

    /// Find the first tube the ray crosses, in the configured traversal
    /// order. A crossing counts only when its exit lies forward of the
    /// ray origin. If tubes overlap in space, traversal order silently
    /// decides the winner.
    pub fn locate_hit(&self, position: Vec3, velocity: Vec3) -> Option<TubeHit> {
        match self.traversal {
            TraversalOrder::Shortcut => self
                .probe(1, position, velocity, false)
                .or_else(|| self.probe(0, position, velocity, true))
                .or_else(|| self.probe(2, position, velocity, true)),
            TraversalOrder::Strict => (0..3)
                .find_map(|i| self.probe(i, position, velocity, true)),
        }
    }

    fn probe(&self, index: usize, position: Vec3, velocity: Vec3, transform: bool) -> Option<TubeHit> {
        let tube = &self.tubes[index];
        let (p, v) = if transform {
            tube.to_local(position, velocity)
        } else {
            // The middle tube shares the assembly base frame.
            (position, velocity)
        };
        let crossing = cylinder::intersect(p, v, tube.radius, tube.length)?;
        if crossing.t_out <= 0.0 {
            return None;
        }
        Some(TubeHit {
            tube: index,
            t_in: crossing.t_in,
            t_out: crossing.t_out,
            local_position: p,
            local_velocity: v,
        })
    }
}
