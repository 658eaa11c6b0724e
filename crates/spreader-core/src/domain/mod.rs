//! Domain layer - Pure computational logic
//!
//! This module contains the person arena, sorting, lookup, propagation and
//! classification, without I/O dependencies.

pub mod classify;
pub mod config;
pub mod growth;
pub mod id_lookup;
pub mod index_sort;
pub mod node_store;
pub mod person;
pub mod risk;
