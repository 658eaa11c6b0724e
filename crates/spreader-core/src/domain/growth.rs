//! Fallible growth for owned sequences
//!
//! Every growth point of a run goes through [`try_push`] (or
//! [`try_with_capacity`]) so that an allocation failure is reported as an
//! [`AllocError`] instead of aborting the process.

use std::collections::TryReserveError;
use thiserror::Error;

/// Storage could not be grown
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to allocate {what}: {reason}")]
pub struct AllocError {
    /// Which buffer was being grown
    pub what: &'static str,
    /// Allocator message
    pub reason: String,
}

impl AllocError {
    pub fn new(what: &'static str, err: TryReserveError) -> Self {
        Self {
            what,
            reason: err.to_string(),
        }
    }
}

/// Growth strategy used when a sequence is full
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Growth {
    /// Reserve a fixed number of extra slots
    Batch(usize),
    /// Reserve exactly one extra slot
    Exact,
}

impl Growth {
    fn additional(self) -> usize {
        match self {
            Growth::Batch(n) => n.max(1),
            Growth::Exact => 1,
        }
    }
}

/// Push `value`, growing `vec` according to `growth` when it is full
///
/// On failure `vec` is left untouched and `value` is dropped.
pub fn try_push<T>(
    vec: &mut Vec<T>,
    value: T,
    growth: Growth,
    what: &'static str,
) -> Result<(), AllocError> {
    if vec.len() == vec.capacity() {
        vec.try_reserve_exact(growth.additional())
            .map_err(|e| AllocError::new(what, e))?;
    }
    vec.push(value);
    Ok(())
}

/// Allocate an empty vector able to hold `len` elements
pub fn try_with_capacity<T>(len: usize, what: &'static str) -> Result<Vec<T>, AllocError> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(len)
        .map_err(|e| AllocError::new(what, e))?;
    Ok(vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_growth_reserves_batch() {
        let mut vec: Vec<u32> = Vec::new();
        try_push(&mut vec, 1, Growth::Batch(10), "test").unwrap();
        assert_eq!(vec, vec![1]);
        assert!(vec.capacity() >= 10);

        let cap = vec.capacity();
        for i in 2..=cap as u32 {
            try_push(&mut vec, i, Growth::Batch(10), "test").unwrap();
        }
        assert_eq!(vec.capacity(), cap);
    }

    #[test]
    fn test_exact_growth_one_slot() {
        let mut vec: Vec<u32> = Vec::new();
        for i in 0..5 {
            try_push(&mut vec, i, Growth::Exact, "test").unwrap();
        }
        assert_eq!(vec, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_zero_batch_still_grows() {
        let mut vec: Vec<u8> = Vec::new();
        try_push(&mut vec, 7, Growth::Batch(0), "test").unwrap();
        assert_eq!(vec, vec![7]);
    }

    #[test]
    fn test_with_capacity_overflow_is_error() {
        let result = try_with_capacity::<u64>(usize::MAX, "huge");
        let err = result.unwrap_err();
        assert_eq!(err.what, "huge");
    }
}
