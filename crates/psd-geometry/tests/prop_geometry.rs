// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Property-Based Tests (proptest) for psd-geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for psd-geometry using proptest.
//!
//! Covers: rotation orthonormality, tilt-angle recovery, cylinder
//! crossing membership and symmetry.

use proptest::prelude::*;
use psd_geometry::rotation::axis_tilt_angles;
use psd_geometry::{intersect, Mat3, Vec3};

// ── Rotation Properties ──────────────────────────────────────────────

proptest! {
    /// Any tilt rotation preserves vector norms.
    #[test]
    fn rotation_preserves_norm(
        ax in -1.5f64..1.5,
        az in -3.1f64..3.1,
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
        z in -10.0f64..10.0,
    ) {
        let r = Mat3::tilt_xz(ax, az);
        let v = Vec3::new(x, y, z);
        let rv = r.apply(v);
        prop_assert!((rv.norm() - v.norm()).abs() < 1e-10,
            "norm changed: {} -> {}", v.norm(), rv.norm());
    }

    /// Transpose undoes the rotation.
    #[test]
    fn rotation_transpose_is_inverse(
        ax in -1.5f64..1.5,
        az in -3.1f64..3.1,
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
        z in -10.0f64..10.0,
    ) {
        let r = Mat3::tilt_xz(ax, az);
        let v = Vec3::new(x, y, z);
        let back = r.transpose().apply(r.apply(v));
        prop_assert!((back - v).norm() < 1e-10);
    }

    /// axis_tilt_angles followed by tilt_xz recovers the direction.
    #[test]
    fn tilt_angles_roundtrip(
        x in -1.0f64..1.0,
        y in -1.0f64..1.0,
        z in -1.0f64..1.0,
    ) {
        prop_assume!(x * x + y * y + z * z > 1e-4);
        let d = Vec3::new(x, y, z).normalized().unwrap();
        let (ax, az) = axis_tilt_angles(d);
        let mapped = Mat3::tilt_xz(ax, az).apply(Vec3::new(0.0, 1.0, 0.0));
        prop_assert!((mapped - d).norm() < 1e-10,
            "mapped {:?} != direction {:?}", mapped, d);
    }
}

// ── Cylinder Crossing Properties ─────────────────────────────────────

proptest! {
    /// The chord midpoint of any reported crossing lies inside the
    /// cylinder (radially and axially, up to tolerance).
    #[test]
    fn crossing_midpoint_inside(
        ox in -5.0f64..5.0,
        oy in -5.0f64..5.0,
        oz in -5.0f64..5.0,
        vx in -2.0f64..2.0,
        vy in -2.0f64..2.0,
        vz in -2.0f64..2.0,
        radius in 0.1f64..2.0,
        length in 0.2f64..4.0,
    ) {
        prop_assume!(vx * vx + vy * vy + vz * vz > 1e-6);
        let origin = Vec3::new(ox, oy, oz);
        let velocity = Vec3::new(vx, vy, vz);
        if let Some(crossing) = intersect(origin, velocity, radius, length) {
            let t_mid = 0.5 * (crossing.t_in + crossing.t_out);
            let p = origin + velocity * t_mid;
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            prop_assert!(radial <= radius + 1e-9,
                "midpoint radially outside: {} > {}", radial, radius);
            prop_assert!(p.y.abs() <= 0.5 * length + 1e-9,
                "midpoint axially outside: {} > {}", p.y.abs(), 0.5 * length);
        }
    }

    /// Entry always precedes exit.
    #[test]
    fn crossing_interval_ordered(
        ox in -5.0f64..5.0,
        oz in -5.0f64..5.0,
        vx in -2.0f64..2.0,
        vy in -2.0f64..2.0,
        vz in -2.0f64..2.0,
        radius in 0.1f64..2.0,
        length in 0.2f64..4.0,
    ) {
        prop_assume!(vx * vx + vy * vy + vz * vz > 1e-6);
        let origin = Vec3::new(ox, 0.0, oz);
        let velocity = Vec3::new(vx, vy, vz);
        if let Some(crossing) = intersect(origin, velocity, radius, length) {
            prop_assert!(crossing.t_in < crossing.t_out);
        }
    }

    /// Reversing the ray direction mirrors the crossing interval.
    #[test]
    fn crossing_reversal_symmetry(
        ox in -5.0f64..5.0,
        oy in -3.0f64..3.0,
        oz in -5.0f64..5.0,
        vx in -2.0f64..2.0,
        vy in -2.0f64..2.0,
        vz in -2.0f64..2.0,
        radius in 0.1f64..2.0,
        length in 0.2f64..4.0,
    ) {
        prop_assume!(vx * vx + vy * vy + vz * vz > 1e-6);
        let origin = Vec3::new(ox, oy, oz);
        let velocity = Vec3::new(vx, vy, vz);
        let forward = intersect(origin, velocity, radius, length);
        let backward = intersect(origin, -velocity, radius, length);
        match (forward, backward) {
            (Some(f), Some(b)) => {
                prop_assert!((f.t_in + b.t_out).abs() < 1e-8,
                    "t_in {} != -t_out {}", f.t_in, b.t_out);
                prop_assert!((f.t_out + b.t_in).abs() < 1e-8);
            }
            (None, None) => {}
            (f, b) => prop_assert!(false, "asymmetric crossing: {f:?} vs {b:?}"),
        }
    }
}
