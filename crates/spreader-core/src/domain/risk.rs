//! Risk propagation over the infection tree
//!
//! The index case gets `ROOT_RISK`; every other person gets the risk of the
//! person who met them, scaled by the transmission factor of that meeting.

use crate::constants::{DEFAULT_MAX_TIME, DEFAULT_MIN_DISTANCE, ROOT_RISK};
use crate::domain::growth::{AllocError, Growth, try_push};
use crate::domain::node_store::NodeStore;
use crate::domain::person::Edge;
use serde::{Deserialize, Serialize};

/// Calibration constants of the transmission factor
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Minimal meaningful distance (meters)
    pub min_distance: f64,
    /// Maximal contact time taken into account
    pub max_time: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_DISTANCE,
            max_time: DEFAULT_MAX_TIME,
        }
    }
}

/// Transmission factor of a single contact
pub fn transmission_factor(edge: &Edge, calibration: &Calibration) -> f64 {
    (edge.duration * calibration.min_distance) / (edge.distance * calibration.max_time)
}

/// Compute the risk of every person reachable from `root`
///
/// Walks the tree in pre-order with an explicit stack, visiting children in
/// contact-log order. The edge set must form a tree: a person reachable by
/// several paths keeps the risk of the last path walked, and a cycle never
/// terminates.
///
/// # Panics
///
/// Panics if `root` or an edge target is not a valid slot.
pub fn propagate_risk(
    store: &mut NodeStore,
    root: usize,
    calibration: &Calibration,
) -> Result<(), AllocError> {
    let mut stack: Vec<(usize, f64)> = Vec::new();
    try_push(&mut stack, (root, ROOT_RISK), Growth::Exact, "propagation stack")?;
    let mut visited = 0usize;

    while let Some((slot, risk)) = stack.pop() {
        store[slot].risk = risk;
        visited += 1;

        // Reverse push so the first recorded contact is walked first
        let person = &store[slot];
        for edge in person.edges.iter().rev() {
            let child_risk = risk * transmission_factor(edge, calibration);
            try_push(
                &mut stack,
                (edge.target, child_risk),
                Growth::Batch(person.edges.len()),
                "propagation stack",
            )?;
        }
    }

    tracing::debug!(root, visited, "risk propagated");
    Ok(())
}
