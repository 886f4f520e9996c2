//! Geometry primitives for the PSD triplet detector: 3-vectors, rotation
//! matrices, and the finite-cylinder intersection test used by the
//! per-neutron hot loop.

pub mod cylinder;
pub mod rotation;
pub mod vec3;

pub use cylinder::{intersect, CylinderCrossing};
pub use rotation::Mat3;
pub use vec3::Vec3;
