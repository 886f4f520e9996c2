// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Cylinder Intersection
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Infinite ray vs. finite cylinder.
//!
//! The cylinder is centered at the origin with its axis along local y,
//! radius `radius` and full length `length`. Ray parameters are the `t`
//! of `origin + velocity · t` and may be negative when the origin lies
//! inside or past the cylinder; callers decide what counts as a forward
//! hit.

use crate::vec3::Vec3;

/// Threshold below which a quadratic/axial coefficient is treated as
/// parallel to the axis.
const PARALLEL_EPS: f64 = 1e-12;

/// Entry/exit ray parameters of a cylinder crossing, `t_in < t_out`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderCrossing {
    pub t_in: f64,
    pub t_out: f64,
}

/// Intersection interval of the ray with the finite cylinder, or `None`
/// when the ray misses the mantle or the cap slab entirely.
pub fn intersect(
    origin: Vec3,
    velocity: Vec3,
    radius: f64,
    length: f64,
) -> Option<CylinderCrossing> {
    let half = 0.5 * length;

    // Radial part: |(x, z)| <= radius.
    let a = velocity.x * velocity.x + velocity.z * velocity.z;
    let b = 2.0 * (origin.x * velocity.x + origin.z * velocity.z);
    let c = origin.x * origin.x + origin.z * origin.z - radius * radius;

    let (mut t_in, mut t_out) = if a > PARALLEL_EPS {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        ((-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a))
    } else {
        // Travelling parallel to the axis: either always inside the
        // radius or never.
        if c > 0.0 {
            return None;
        }
        (f64::NEG_INFINITY, f64::INFINITY)
    };

    // Axial part: |y| <= half.
    if velocity.y.abs() > PARALLEL_EPS {
        let ta = (-half - origin.y) / velocity.y;
        let tb = (half - origin.y) / velocity.y;
        let (y_in, y_out) = if ta <= tb { (ta, tb) } else { (tb, ta) };
        t_in = t_in.max(y_in);
        t_out = t_out.min(y_out);
    } else if origin.y.abs() > half {
        return None;
    }

    if t_out > t_in {
        Some(CylinderCrossing { t_in, t_out })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perpendicular_crossing_through_center() {
        // Ray along x through the origin of a r=1, L=2 cylinder.
        let crossing = intersect(
            Vec3::new(-5.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            1.0,
            2.0,
        )
        .unwrap();
        assert!((crossing.t_in - 4.0).abs() < 1e-12);
        assert!((crossing.t_out - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_miss_beyond_radius() {
        let crossing = intersect(
            Vec3::new(-5.0, 0.0, 1.5),
            Vec3::new(1.0, 0.0, 0.0),
            1.0,
            2.0,
        );
        assert!(crossing.is_none());
    }

    #[test]
    fn test_miss_beyond_caps() {
        // Passes the mantle radius but above the top cap.
        let crossing = intersect(
            Vec3::new(-5.0, 3.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            1.0,
            2.0,
        );
        assert!(crossing.is_none());
    }

    #[test]
    fn test_clipped_by_cap() {
        // Oblique ray entering through the mantle, leaving through a cap.
        let crossing = intersect(
            Vec3::new(-5.0, -1.0, 0.0),
            Vec3::new(1.0, 0.25, 0.0),
            1.0,
            2.0,
        )
        .unwrap();
        let y_out = -1.0 + 0.25 * crossing.t_out;
        assert!(y_out <= 1.0 + 1e-12);
        assert!(crossing.t_out > crossing.t_in);
    }

    #[test]
    fn test_axis_parallel_inside() {
        let crossing = intersect(
            Vec3::new(0.2, -5.0, 0.3),
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            2.0,
        )
        .unwrap();
        assert!((crossing.t_in - 4.0).abs() < 1e-12);
        assert!((crossing.t_out - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_axis_parallel_outside_radius() {
        let crossing = intersect(
            Vec3::new(1.2, -5.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            1.0,
            2.0,
        );
        assert!(crossing.is_none());
    }

    #[test]
    fn test_origin_inside_gives_negative_entry() {
        let crossing = intersect(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            1.0,
            2.0,
        )
        .unwrap();
        assert!(crossing.t_in < 0.0);
        assert!(crossing.t_out > 0.0);
    }

    #[test]
    fn test_tangent_ray_is_a_miss_or_empty() {
        // Grazing the mantle at z = radius: degenerate interval must not
        // be reported as a crossing.
        let crossing = intersect(
            Vec3::new(-5.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
            1.0,
            2.0,
        );
        assert!(crossing.is_none());
    }
}
