//! Wireframe outlines of the tube bank for an external renderer.
//!
//! Pure data: end circles and mantle edge lines per tube, in assembly
//! coordinates.

use crate::tube::{TripletAssembly, Tube};
use psd_geometry::Vec3;

/// Default circle discretization.
const CIRCLE_SEGMENTS: usize = 32;

/// Open or closed polyline in assembly coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<[f64; 3]>,
}

/// End circles and four mantle edge lines of one tube.
pub fn tube_outline(tube: &Tube, segments: usize) -> Vec<Polyline> {
    let half = 0.5 * tube.length;
    let mut outlines = Vec::with_capacity(6);

    for &y in &[-half, half] {
        let mut points = Vec::with_capacity(segments + 1);
        for k in 0..=segments {
            let phi = 2.0 * std::f64::consts::PI * k as f64 / segments as f64;
            let local = Vec3::new(tube.radius * phi.cos(), y, tube.radius * phi.sin());
            points.push(tube.to_assembly(local).to_array());
        }
        outlines.push(Polyline { points });
    }

    for &(x, z) in &[
        (tube.radius, 0.0),
        (-tube.radius, 0.0),
        (0.0, tube.radius),
        (0.0, -tube.radius),
    ] {
        let a = tube.to_assembly(Vec3::new(x, -half, z)).to_array();
        let b = tube.to_assembly(Vec3::new(x, half, z)).to_array();
        outlines.push(Polyline { points: vec![a, b] });
    }

    outlines
}

/// Outlines of all three tubes.
pub fn assembly_outline(assembly: &TripletAssembly) -> Vec<Polyline> {
    assembly
        .tubes()
        .iter()
        .flat_map(|tube| tube_outline(tube, CIRCLE_SEGMENTS))
        .collect()
}
