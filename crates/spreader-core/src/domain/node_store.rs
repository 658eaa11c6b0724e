//! Person arena
//!
//! `NodeStore` owns every person and every edge of a run. Edges refer to
//! other people by slot index, so growing the store never invalidates them.

use crate::constants::PERSON_GROWTH_BATCH;
use crate::domain::growth::{AllocError, Growth, try_push};
use crate::domain::person::{Edge, Person};

/// Growable person storage addressed by slot index
#[derive(Debug, Default)]
pub struct NodeStore {
    people: Vec<Person>,
}

impl NodeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a person and return its slot
    ///
    /// Storage grows by `PERSON_GROWTH_BATCH` slots at a time. On failure the
    /// store keeps every person appended so far.
    pub fn append(&mut self, name: impl Into<String>, id: i64) -> Result<usize, AllocError> {
        let slot = self.people.len();
        try_push(
            &mut self.people,
            Person::new(name, id),
            Growth::Batch(PERSON_GROWTH_BATCH),
            "person storage",
        )?;
        Ok(slot)
    }

    /// Attach an edge to the person at `source`, growing its list by one slot
    ///
    /// # Panics
    ///
    /// Panics if `source` is not a valid slot.
    pub fn add_edge(&mut self, source: usize, edge: Edge) -> Result<(), AllocError> {
        try_push(
            &mut self.people[source].edges,
            edge,
            Growth::Exact,
            "edge list",
        )
    }

    /// Release every person, name and edge
    pub fn release(self) {
        tracing::debug!(people = self.people.len(), "releasing node store");
        drop(self.people);
    }

    /// Number of people
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Get a person by slot
    pub fn get(&self, slot: usize) -> Option<&Person> {
        self.people.get(slot)
    }

    /// Get a person by slot, mutably
    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Person> {
        self.people.get_mut(slot)
    }

    /// Iterate over people in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Person> + '_ {
        self.people.iter()
    }

    /// Total number of edges across all people
    pub fn edge_count(&self) -> usize {
        self.people.iter().map(|p| p.edges.len()).sum()
    }
}

impl std::ops::Index<usize> for NodeStore {
    type Output = Person;

    fn index(&self, slot: usize) -> &Person {
        &self.people[slot]
    }
}

impl std::ops::IndexMut<usize> for NodeStore {
    fn index_mut(&mut self, slot: usize) -> &mut Person {
        &mut self.people[slot]
    }
}
