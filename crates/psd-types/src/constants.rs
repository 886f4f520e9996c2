// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// He-3 macroscopic absorption coefficient at the thermal reference
/// speed [1/(m·bar)]. Scales as 1/v away from the reference.
pub const K_HE3: f64 = 7.417;

/// Thermal reference neutron speed for the 1/v absorption law [m/s].
pub const V_THERMAL: f64 = 2200.0;

/// Neutron mass (kg)
pub const M_NEUTRON: f64 = 1.67492749804e-27;

/// Entry ray-time parameter reported for a tube miss.
pub const T_IN_MISS: f64 = -2.0;

/// Exit ray-time parameter reported for a tube miss.
pub const T_OUT_MISS: f64 = -1.0;

/// Charge value reported at both readout ends for a tube miss.
pub const CHARGE_MISS: f64 = -1.0;
