use super::RecordStore;
use crate::error::{PumpzError, Result};
use crate::model::{Record, RecordId};
use std::collections::HashSet;
use tracing::{info, warn};

/// Keeps the collection in insertion order. Does NOT persist data.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: Vec<Record>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        let mut store = Self::new();
        store.load(records);
        store
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.records.iter().position(|r| &r.id == id)
    }
}

impl RecordStore for InMemoryStore {
    fn load(&mut self, records: Vec<Record>) {
        let total = records.len();
        let mut seen = HashSet::with_capacity(total);
        let mut unique = Vec::with_capacity(total);

        for record in records {
            if seen.insert(record.id.clone()) {
                unique.push(record);
            } else {
                warn!(id = %record.id, "dropping record with duplicate id");
            }
        }

        info!(loaded = unique.len(), dropped = total - unique.len(), "records loaded");
        self.records = unique;
    }

    fn get(&self, id: &RecordId) -> Result<Record> {
        self.records
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| PumpzError::RecordNotFound(id.clone()))
    }

    fn commit_edit(&mut self, updated: Record) -> Result<()> {
        let pos = self
            .position(&updated.id)
            .ok_or_else(|| PumpzError::RecordNotFound(updated.id.clone()))?;
        info!(id = %updated.id, position = pos, "record replaced");
        self.records[pos] = updated;
        Ok(())
    }

    fn records(&self) -> &[Record] {
        &self.records
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::Column;

    pub struct StoreFixture {
        pub store: InMemoryStore,
        next_id: i64,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                next_id: 1,
            }
        }

        fn push(mut self, record: Record) -> Self {
            let mut records = self.store.records().to_vec();
            records.push(record);
            self.store.load(records);
            self.next_id += 1;
            self
        }

        /// Adds `count` pumps named "Pump 1", "Pump 2", ... with sequential ids.
        pub fn with_pumps(mut self, count: usize) -> Self {
            for _ in 0..count {
                let id = self.next_id;
                let record = Record::new(id)
                    .with(Column::Name, format!("Pump {}", id).as_str())
                    .with(Column::Type, "Centrifugal")
                    .with(Column::Block, "North")
                    .with(Column::FlowRate, id as f64);
                self = self.push(record);
            }
            self
        }

        pub fn with_pump(self, name: &str, kind: &str, block: &str) -> Self {
            let record = Record::new(self.next_id)
                .with(Column::Name, name)
                .with(Column::Type, kind)
                .with(Column::Block, block);
            self.push(record)
        }
    }
}
