//! Person and contact edge records

/// Directed contact edge in the infection tree
///
/// The target is a slot in the owning `NodeStore`, never a reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// Distance between the two people (meters)
    pub distance: f64,
    /// Time the two people spent together
    pub duration: f64,
    /// Store slot of the infected person
    pub target: usize,
}

impl Edge {
    /// Create a new edge
    pub fn new(distance: f64, duration: f64, target: usize) -> Self {
        Self {
            distance,
            duration,
            target,
        }
    }
}

/// Person record
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    /// Person ID
    pub id: i64,
    /// Display name
    pub name: String,
    /// Compounded transmission risk (0 until propagated)
    pub risk: f64,
    /// Outgoing edges in contact-log order
    pub edges: Vec<Edge>,
}

impl Person {
    /// Create a person with zero risk and no edges
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            id,
            name: name.into(),
            risk: 0.0,
            edges: Vec::new(),
        }
    }
}
