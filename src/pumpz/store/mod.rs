//! # Storage Layer
//!
//! The [`RecordStore`] trait owns the canonical, insertion-ordered collection of
//! records. It is the only component allowed to change the source of truth; the
//! filter, sort and pagination steps only ever borrow from it.
//!
//! ## Mutation Rules
//!
//! Exactly two operations mutate a store:
//! - `load`: replaces the whole collection (the initial dataset, or a reload)
//! - `commit_edit`: replaces one record in place, keeping its position
//!
//! Records are never inserted or deleted one by one. Both mutations are atomic
//! with respect to readers: the new collection is fully built (or the target
//! position fully resolved) before anything is written.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: the collection lives in a `Vec`, nothing is persisted.
//!
//! Getting records into a store is a separate concern, see [`fs`] for the JSON
//! dataset loader.

use crate::error::Result;
use crate::model::{Record, RecordId};

pub mod fs;
pub mod memory;

/// Abstract interface for the canonical record collection.
pub trait RecordStore {
    /// Replace the entire collection. Never fails; duplicate ids keep their first occurrence.
    fn load(&mut self, records: Vec<Record>);

    /// Get a copy of the record with this id
    fn get(&self, id: &RecordId) -> Result<Record>;

    /// Replace the record whose id matches `updated.id`, in place
    fn commit_edit(&mut self, updated: Record) -> Result<()>;

    /// All records, in insertion order
    fn records(&self) -> &[Record];

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}
