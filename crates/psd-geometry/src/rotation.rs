// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Rotation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! 3×3 rotation matrices for tube orientation.
//!
//! Tube axes are local +y. An orientation is the local→assembly rotation;
//! rays transform into a tube frame with the transpose.

use crate::vec3::Vec3;

/// Row-major 3×3 rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    /// Right-handed rotation about the x axis.
    pub fn rot_x(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3 {
            m: [[1.0, 0.0, 0.0], [0.0, c, -s], [0.0, s, c]],
        }
    }

    /// Right-handed rotation about the y axis.
    pub fn rot_y(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3 {
            m: [[c, 0.0, s], [0.0, 1.0, 0.0], [-s, 0.0, c]],
        }
    }

    /// Right-handed rotation about the z axis.
    pub fn rot_z(angle: f64) -> Mat3 {
        let (s, c) = angle.sin_cos();
        Mat3 {
            m: [[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// Tube orientation from tilt angles: rotate about x, then about z.
    /// Maps the local axis ŷ to
    /// `(-sin(az)·cos(ax), cos(az)·cos(ax), sin(ax))`.
    pub fn tilt_xz(about_x: f64, about_z: f64) -> Mat3 {
        Mat3::rot_z(about_z).mul(Mat3::rot_x(about_x))
    }

    /// Matrix product `self · other`.
    pub fn mul(self, other: Mat3) -> Mat3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
            }
        }
        Mat3 { m: out }
    }

    /// Apply to a vector.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    /// Transpose; the inverse for a rotation.
    pub fn transpose(self) -> Mat3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        Mat3 { m: out }
    }
}

/// Tilt angles (about x, about z) that carry the local axis ŷ onto the
/// unit direction `d`, i.e. `Mat3::tilt_xz(ax, az).apply(ŷ) == d`.
///
/// `d` must be a unit vector; callers derive it from wire endpoints and
/// reject degenerate (zero-length) axes before normalizing.
pub fn axis_tilt_angles(d: Vec3) -> (f64, f64) {
    let about_x = d.z.clamp(-1.0, 1.0).asin();
    let about_z = if d.x == 0.0 && d.y == 0.0 {
        // Axis along ±z: the rotation about z is arbitrary.
        0.0
    } else {
        (-d.x).atan2(d.y)
    };
    (about_x, about_z)
}
