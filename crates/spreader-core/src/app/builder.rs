//! Infection graph construction
//!
//! Two passes over the inputs: the population fills a `NodeStore`, which is
//! then frozen and indexed by ID; the contact log attaches one edge per
//! meeting and names the root.

use crate::domain::config::ParsePolicy;
use crate::domain::growth::AllocError;
use crate::domain::id_lookup::IdIndex;
use crate::domain::node_store::NodeStore;
use crate::domain::person::Edge;
use crate::infra::contacts_io::ContactLog;
use crate::infra::population_io::population_records;
use crate::infra::record_parse::RecordError;
use std::io::BufRead;
use thiserror::Error;

#[cfg(feature = "duplicate-check")]
use rustc_hash::FxHashSet;

/// Graph building errors
#[derive(Debug, Error)]
pub enum BuildError {
    /// Population stream is unreadable or malformed
    #[error("population input: {0}")]
    Population(#[source] RecordError),

    /// Contact stream is unreadable or malformed
    #[error("contacts input: {0}")]
    Contacts(#[source] RecordError),

    /// Contact record names a person that is not in the population
    #[error("contacts line {line}: unknown person ID {id}")]
    UnknownId { line: usize, id: i64 },

    /// Root ID is not in the population
    #[error("unknown root ID {id}")]
    UnknownRoot { id: i64 },

    /// Storage could not grow
    #[error(transparent)]
    Alloc(#[from] AllocError),
}

/// Fully built infection tree
#[derive(Debug)]
pub struct ContactGraph {
    /// Every person and edge of the run
    pub store: NodeStore,
    /// ID-sorted permutation over `store`
    pub index: IdIndex,
    /// Store slot of the index case
    pub root: usize,
}

/// Result of graph building
#[derive(Debug)]
pub enum BuildOutcome {
    /// The population stream held no records
    EmptyPopulation,
    /// The contact stream held no header
    NoMeetings { population: usize },
    /// A tree rooted at the index case
    Graph(ContactGraph),
}

/// Phase 1: read every person into a new store
pub fn read_population<R: BufRead>(
    reader: R,
    policy: ParsePolicy,
) -> Result<NodeStore, BuildError> {
    let mut store = NodeStore::new();

    for record in population_records(reader, policy) {
        let record = record.map_err(BuildError::Population)?;
        store.append(record.name, record.id)?;
    }

    tracing::debug!(people = store.len(), "population read");
    Ok(store)
}

/// Log IDs that occur more than once
#[cfg(feature = "duplicate-check")]
fn warn_duplicate_ids(store: &NodeStore) {
    let mut seen = FxHashSet::default();
    for person in store.iter() {
        if !seen.insert(person.id) {
            tracing::warn!(id = person.id, name = %person.name, "duplicate person ID");
        }
    }
}

/// Phase 2: attach one edge per contact record, in log order
///
/// Returns the number of edges attached.
pub fn attach_contacts<R: BufRead>(
    store: &mut NodeStore,
    index: &IdIndex,
    mut log: ContactLog<R>,
    policy: ParsePolicy,
) -> Result<usize, BuildError> {
    let mut attached = 0;

    while let Some(record) = log.next() {
        let record = record.map_err(BuildError::Contacts)?;
        let line = log.line();

        let target = index
            .resolve(store, record.target_id, policy)
            .map_err(|u| BuildError::UnknownId { line, id: u.id })?;
        let source = index
            .resolve(store, record.source_id, policy)
            .map_err(|u| BuildError::UnknownId { line, id: u.id })?;

        store.add_edge(source, Edge::new(record.distance, record.duration, target))?;
        attached += 1;
    }

    Ok(attached)
}

/// Build the infection tree from a population and a contact stream
pub fn build_graph<P: BufRead, C: BufRead>(
    population: P,
    contacts: C,
    policy: ParsePolicy,
) -> Result<BuildOutcome, BuildError> {
    let mut store = read_population(population, policy)?;
    if store.is_empty() {
        tracing::info!("population is empty");
        return Ok(BuildOutcome::EmptyPopulation);
    }

    #[cfg(feature = "duplicate-check")]
    warn_duplicate_ids(&store);

    let index = IdIndex::build(&store)?;

    let Some(log) = ContactLog::open(contacts, policy).map_err(BuildError::Contacts)? else {
        tracing::info!(people = store.len(), "contact log is empty");
        return Ok(BuildOutcome::NoMeetings {
            population: store.len(),
        });
    };
    let root_id = log.root_id();

    let edges = attach_contacts(&mut store, &index, log, policy)?;

    let root = index
        .resolve(&store, root_id, policy)
        .map_err(|u| BuildError::UnknownRoot { id: u.id })?;

    tracing::debug!(people = store.len(), edges, root_id, "graph built");
    Ok(BuildOutcome::Graph(ContactGraph { store, index, root }))
}
