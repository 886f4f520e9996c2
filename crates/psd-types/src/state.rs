// ─────────────────────────────────────────────────────────────────────
// SCPN PSD Triplet — Neutron State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Neutron ray state and the named extension-slot schema.
//!
//! The host simulation owns ray generation and propagation; one ray is
//! handed to the detector per invocation. Extension slots carry optional
//! per-ray outputs (split charges, detection time) and are addressed
//! through handles resolved once at detector initialization, never by
//! per-event string lookup.

/// One simulated neutron ray.
///
/// `weight` is the statistical weight: the number of real neutrons this
/// ray stands for. Detectors attenuate it instead of branching.
#[derive(Debug, Clone, PartialEq)]
pub struct Neutron {
    pub position: [f64; 3],
    /// Velocity [m/s]; the ray is `position + velocity · t` with t in
    /// seconds.
    pub velocity: [f64; 3],
    pub time: f64,
    pub spin: [f64; 3],
    pub weight: f64,
    /// Extension slots, one value per schema entry.
    pub user: Vec<f64>,
}

impl Neutron {
    pub fn new(position: [f64; 3], velocity: [f64; 3], weight: f64) -> Self {
        Neutron {
            position,
            velocity,
            time: 0.0,
            spin: [0.0; 3],
            weight,
            user: Vec::new(),
        }
    }

    /// Create a neutron whose extension vector matches `schema`.
    pub fn with_schema(
        position: [f64; 3],
        velocity: [f64; 3],
        weight: f64,
        schema: &SlotSchema,
    ) -> Self {
        Neutron {
            user: vec![0.0; schema.len()],
            ..Neutron::new(position, velocity, weight)
        }
    }

    pub fn speed(&self) -> f64 {
        let [vx, vy, vz] = self.velocity;
        (vx * vx + vy * vy + vz * vz).sqrt()
    }

    /// Snapshot of the kinematic state for later restoration.
    pub fn kinematics(&self) -> Kinematics {
        Kinematics {
            position: self.position,
            velocity: self.velocity,
            spin: self.spin,
            weight: self.weight,
        }
    }

    /// Restore a previously captured kinematic state. Extension slots and
    /// time are left as-is.
    pub fn restore(&mut self, saved: &Kinematics) {
        self.position = saved.position;
        self.velocity = saved.velocity;
        self.spin = saved.spin;
        self.weight = saved.weight;
    }

    pub fn slot(&self, handle: SlotHandle) -> f64 {
        self.user[handle.0]
    }

    pub fn set_slot(&mut self, handle: SlotHandle, value: f64) {
        self.user[handle.0] = value;
    }
}

/// Saved kinematic state of a neutron.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    pub position: [f64; 3],
    pub velocity: [f64; 3],
    pub spin: [f64; 3],
    pub weight: f64,
}

/// Handle to one named extension slot, valid for the schema that issued
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotHandle(usize);

impl SlotHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Registry of named per-neutron extension slots, built by the host
/// simulation before tracing begins.
#[derive(Debug, Clone, Default)]
pub struct SlotSchema {
    names: Vec<String>,
}

impl SlotSchema {
    pub fn new() -> Self {
        SlotSchema::default()
    }

    /// Register a slot name, returning its handle. Registering an
    /// existing name returns the existing handle.
    pub fn register(&mut self, name: &str) -> SlotHandle {
        if let Some(handle) = self.resolve(name) {
            return handle;
        }
        self.names.push(name.to_string());
        SlotHandle(self.names.len() - 1)
    }

    /// Resolve a slot name to its handle, if registered.
    pub fn resolve(&self, name: &str) -> Option<SlotHandle> {
        self.names.iter().position(|n| n == name).map(SlotHandle)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
