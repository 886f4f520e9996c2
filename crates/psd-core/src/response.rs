// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Absorption & Efficiency
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gas transmission, axial hit position, and the end-of-tube efficiency
//! roll-off.
//!
//! Weight attenuation replaces stochastic branching: every ray that
//! geometrically hits a tube is kept, its statistical weight scaled to
//! the fraction of real neutrons the event represents.

use crate::tube::TubeHit;
use psd_types::constants::{K_HE3, V_THERMAL};

/// Middle tube index; its local axis is mirrored by assembly geometry.
pub const MIRRORED_TUBE: usize = 1;

/// He-3 transmission probability over a chord of duration `dt` seconds.
///
/// The 1/v absorption law cancels the speed/path product, leaving the
/// fixed thermal reference speed as the only velocity scale.
pub fn gas_transmission(pressure_bar: f64, dt: f64) -> f64 {
    (-K_HE3 * pressure_bar * V_THERMAL * dt).exp()
}

/// Fractional axial hit position in [0, 1] under the midpoint
/// approximation: local entry coordinate plus half the chord along the
/// local axial velocity. The middle tube uses the opposite sign
/// convention from the outer tubes.
///
/// Values outside [0, 1] are returned as-is; the caller downgrades such
/// events to a miss.
pub fn axial_fraction(hit: &TubeHit, tube_length: f64) -> f64 {
    let y_mid =
        hit.local_position.y + 0.5 * (hit.t_in + hit.t_out) * hit.local_velocity.y;
    let s = y_mid / tube_length;
    if hit.tube == MIRRORED_TUBE {
        0.5 - s
    } else {
        0.5 + s
    }
}

/// Quintic smoothstep: zero first and second derivative at both ends.
fn smootherstep(x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

/// End-effect efficiency multiplier at axial fraction `ty`.
///
/// `dead_norm` is the characteristic dead length normalized by the tube
/// length. Sensitivity tapers over a dead length from each tube end;
/// `dead_norm <= 0` is the exact identity.
pub fn end_effect_scale(ty: f64, dead_norm: f64) -> f64 {
    if dead_norm <= 0.0 {
        return 1.0;
    }
    smootherstep(ty / dead_norm) * smootherstep((1.0 - ty) / dead_norm)
}
