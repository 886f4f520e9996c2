// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Detector Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Electronic response of a serially-wired triplet of gas-filled
//! position-sensitive tubes: per-neutron geometric resolution, gas
//! transmission weighting, end-of-tube efficiency roll-off, resistive or
//! pulse-height charge division, and position-histogram accumulation.

pub mod charge;
pub mod detector;
pub mod histogram;
pub mod response;
pub mod tube;
pub mod wireframe;
pub mod writer;
