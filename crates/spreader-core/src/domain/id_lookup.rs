//! ID resolution over an ID-sorted permutation

use crate::domain::config::ParsePolicy;
use crate::domain::growth::AllocError;
use crate::domain::index_sort::{SortKey, identity_permutation, sort_indices};
use crate::domain::node_store::NodeStore;

/// Binary search `perm[start..=end]` for `id`
///
/// `perm` must be sorted ascending by ID. Returns `Ok(position)` of an exact
/// match, or `Err(lower_bound)`: the position where `id` would be inserted.
pub fn find_position(
    store: &NodeStore,
    perm: &[usize],
    id: i64,
    start: usize,
    end: usize,
) -> Result<usize, usize> {
    let mut left = start;
    let mut right = end.saturating_add(1).min(perm.len());

    while left < right {
        let mid = left + (right - left) / 2;
        let mid_id = store[perm[mid]].id;
        if mid_id == id {
            return Ok(mid);
        }
        if mid_id > id {
            right = mid;
        } else {
            left = mid + 1;
        }
    }

    Err(left)
}

/// An ID that is not present in the population
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Unresolved {
    pub id: i64,
}

/// ID-sorted permutation over a frozen `NodeStore`
#[derive(Clone, Debug)]
pub struct IdIndex {
    perm: Vec<usize>,
}

impl IdIndex {
    /// Build the index by sorting a permutation of `store` by ID
    pub fn build(store: &NodeStore) -> Result<Self, AllocError> {
        let mut perm = identity_permutation(store.len())?;
        sort_indices(store, &mut perm, SortKey::Id)?;
        Ok(Self { perm })
    }

    /// The sorted permutation
    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    /// Store slot of the person with `id`, if present
    pub fn lookup(&self, store: &NodeStore, id: i64) -> Option<usize> {
        if self.perm.is_empty() {
            return None;
        }
        find_position(store, &self.perm, id, 0, self.perm.len() - 1)
            .ok()
            .map(|pos| self.perm[pos])
    }

    /// Resolve `id` to a store slot under `policy`
    ///
    /// When `id` is missing, `Strict` reports it. `Lenient` takes the search
    /// lower bound, clamped to the last position, and uses it as a store slot
    /// directly without mapping it through the permutation.
    pub fn resolve(
        &self,
        store: &NodeStore,
        id: i64,
        policy: ParsePolicy,
    ) -> Result<usize, Unresolved> {
        if self.perm.is_empty() {
            return Err(Unresolved { id });
        }
        match find_position(store, &self.perm, id, 0, self.perm.len() - 1) {
            Ok(pos) => Ok(self.perm[pos]),
            Err(bound) if policy == ParsePolicy::Lenient => {
                let slot = bound.min(self.perm.len() - 1);
                tracing::warn!(
                    id,
                    slot,
                    fallback_id = store[slot].id,
                    "unknown ID resolved to search bound slot"
                );
                Ok(slot)
            }
            Err(_) => Err(Unresolved { id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_ids(ids: &[i64]) -> NodeStore {
        let mut store = NodeStore::new();
        for &id in ids {
            store.append(format!("id{}", id), id).unwrap();
        }
        store
    }

    #[test]
    fn test_lookup_every_present_id() {
        let ids = [50, 7, 33, 12, 90, 1, 64];
        let store = store_with_ids(&ids);
        let index = IdIndex::build(&store).unwrap();

        for (slot, &id) in ids.iter().enumerate() {
            assert_eq!(index.lookup(&store, id), Some(slot));
        }
    }

    #[test]
    fn test_lookup_missing_id() {
        let store = store_with_ids(&[10, 20, 30]);
        let index = IdIndex::build(&store).unwrap();
        assert_eq!(index.lookup(&store, 15), None);
        assert_eq!(index.lookup(&store, 0), None);
        assert_eq!(index.lookup(&store, 99), None);
    }

    #[test]
    fn test_lookup_empty_store() {
        let store = NodeStore::new();
        let index = IdIndex::build(&store).unwrap();
        assert_eq!(index.lookup(&store, 1), None);
        assert_eq!(
            index.resolve(&store, 1, ParsePolicy::Lenient),
            Err(Unresolved { id: 1 })
        );
    }

    #[test]
    fn test_find_position_lower_bound() {
        let store = store_with_ids(&[10, 20, 30]);
        let perm = vec![0, 1, 2];
        assert_eq!(find_position(&store, &perm, 20, 0, 2), Ok(1));
        assert_eq!(find_position(&store, &perm, 5, 0, 2), Err(0));
        assert_eq!(find_position(&store, &perm, 25, 0, 2), Err(2));
        assert_eq!(find_position(&store, &perm, 35, 0, 2), Err(3));
    }

    #[test]
    fn test_find_position_sub_range() {
        let store = store_with_ids(&[10, 20, 30, 40]);
        let perm = vec![0, 1, 2, 3];
        assert_eq!(find_position(&store, &perm, 10, 1, 3), Err(1));
        assert_eq!(find_position(&store, &perm, 30, 1, 2), Ok(2));
        assert_eq!(find_position(&store, &perm, 40, 0, 2), Err(3));
    }

    #[test]
    fn test_resolve_strict_rejects_missing() {
        let store = store_with_ids(&[10, 20]);
        let index = IdIndex::build(&store).unwrap();
        assert_eq!(index.resolve(&store, 20, ParsePolicy::Strict), Ok(1));
        assert_eq!(
            index.resolve(&store, 15, ParsePolicy::Strict),
            Err(Unresolved { id: 15 })
        );
    }

    #[test]
    fn test_resolve_lenient_falls_back_to_bound() {
        let store = store_with_ids(&[30, 10, 20]);
        let index = IdIndex::build(&store).unwrap();
        // perm is [1, 2, 0]; the bound is taken as a slot, not as a perm position
        assert_eq!(index.resolve(&store, 15, ParsePolicy::Lenient), Ok(1));
        assert_eq!(index.resolve(&store, 5, ParsePolicy::Lenient), Ok(0));
        assert_eq!(index.resolve(&store, 25, ParsePolicy::Lenient), Ok(2));
        // Past the end clamps to the last slot
        assert_eq!(index.resolve(&store, 99, ParsePolicy::Lenient), Ok(2));
    }

    #[test]
    fn test_resolve_lenient_present_id_goes_through_permutation() {
        let store = store_with_ids(&[30, 10, 20]);
        let index = IdIndex::build(&store).unwrap();
        assert_eq!(index.resolve(&store, 30, ParsePolicy::Lenient), Ok(0));
        assert_eq!(index.resolve(&store, 10, ParsePolicy::Lenient), Ok(1));
    }
}
