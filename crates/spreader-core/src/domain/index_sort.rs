//! Index permutation sort
//!
//! Sorting never moves people inside the `NodeStore`. Instead a permutation
//! of slot indices is reordered with a stable merge sort, and readers walk the
//! store through that permutation.

use crate::domain::growth::{AllocError, try_with_capacity};
use crate::domain::node_store::NodeStore;

/// Key a permutation is sorted by (always ascending)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// Person ID
    Id,
    /// Propagated risk
    Risk,
}

/// Create the permutation `0..len`
pub fn identity_permutation(len: usize) -> Result<Vec<usize>, AllocError> {
    let mut perm = try_with_capacity(len, "index permutation")?;
    perm.extend(0..len);
    Ok(perm)
}

/// Sort `perm` ascending by `key` over the people in `store`
///
/// Equal keys keep their relative order. On error the permutation may be
/// partially merged and must be discarded.
pub fn sort_indices(store: &NodeStore, perm: &mut [usize], key: SortKey) -> Result<(), AllocError> {
    match key {
        SortKey::Id => sort_indices_by(perm, &|a: usize, b: usize| store[a].id <= store[b].id),
        SortKey::Risk => {
            sort_indices_by(perm, &|a: usize, b: usize| store[a].risk <= store[b].risk)
        }
    }
}

/// Stable merge sort of `perm` using a non-strict "less or equal" predicate
pub fn sort_indices_by<F>(perm: &mut [usize], le: &F) -> Result<(), AllocError>
where
    F: Fn(usize, usize) -> bool,
{
    let len = perm.len();
    if len < 2 {
        return Ok(());
    }

    // Left half takes the middle element, as in a [start, middle] split
    let middle = (len - 1) / 2 + 1;
    {
        let (left, right) = perm.split_at_mut(middle);
        sort_indices_by(left, le)?;
        sort_indices_by(right, le)?;
    }
    merge(perm, middle, le)
}

/// Merge the sorted runs `perm[..middle]` and `perm[middle..]`
fn merge<F>(perm: &mut [usize], middle: usize, le: &F) -> Result<(), AllocError>
where
    F: Fn(usize, usize) -> bool,
{
    let mut left = try_with_capacity(middle, "merge buffer")?;
    left.extend_from_slice(&perm[..middle]);
    let mut right = try_with_capacity(perm.len() - middle, "merge buffer")?;
    right.extend_from_slice(&perm[middle..]);

    let (mut i, mut j, mut k) = (0, 0, 0);
    while i < left.len() && j < right.len() {
        if le(left[i], right[j]) {
            perm[k] = left[i];
            i += 1;
        } else {
            perm[k] = right[j];
            j += 1;
        }
        k += 1;
    }

    // Copy the remaining
    for &slot in &left[i..] {
        perm[k] = slot;
        k += 1;
    }
    for &slot in &right[j..] {
        perm[k] = slot;
        k += 1;
    }

    Ok(())
}
