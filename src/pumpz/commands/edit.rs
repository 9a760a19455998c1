//! Single-record edit sessions.
//!
//! An [`EditSession`] holds a private copy of one record. Nothing reaches the
//! store until [`EditSession::commit`]; cancelling just drops the copy.
//!
//! Field edits are stored exactly as typed, as text, even for numeric columns.
//! A later sort on that column therefore compares the edited text against the
//! remaining numbers using the mixed-type rule in [`super::sort`].

use crate::error::{PumpzError, Result};
use crate::model::{Column, FieldValue, Record, RecordId};
use crate::store::RecordStore;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(Record),
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    /// The record being edited, with any changes made so far.
    pub fn buffer(&self) -> Option<&Record> {
        match self {
            EditSession::Editing(record) => Some(record),
            EditSession::Idle => None,
        }
    }

    /// Starts editing a copy of the record `id`.
    ///
    /// An edit already in progress is discarded without being saved, but only
    /// once the new record has been found.
    pub fn begin<S: RecordStore>(&mut self, store: &S, id: &RecordId) -> Result<&Record> {
        let record = store.get(id)?;
        if let EditSession::Editing(previous) = self {
            debug!(id = %previous.id, "discarding unsaved edit");
        }
        debug!(id = %record.id, "edit started");
        *self = EditSession::Editing(record);
        match self {
            EditSession::Editing(record) => Ok(record),
            EditSession::Idle => Err(PumpzError::NoActiveEdit),
        }
    }

    /// Overwrites one field of the buffer with the raw input.
    pub fn update_field(&mut self, column: Column, raw: impl Into<String>) -> Result<()> {
        match self {
            EditSession::Editing(record) => {
                record.set(column, FieldValue::Text(raw.into()));
                Ok(())
            }
            EditSession::Idle => Err(PumpzError::NoActiveEdit),
        }
    }

    /// Writes the buffer back to the store and returns to idle.
    ///
    /// If the record has disappeared from the store the error is returned and
    /// the session keeps its buffer, so the caller can still cancel it.
    pub fn commit<S: RecordStore>(&mut self, store: &mut S) -> Result<Record> {
        let buffer = self.buffer().cloned().ok_or(PumpzError::NoActiveEdit)?;
        store.commit_edit(buffer.clone())?;
        *self = EditSession::Idle;
        Ok(buffer)
    }

    /// Drops the buffer and returns it.
    pub fn cancel(&mut self) -> Result<Record> {
        match std::mem::take(self) {
            EditSession::Editing(record) => {
                debug!(id = %record.id, "edit cancelled");
                Ok(record)
            }
            EditSession::Idle => Err(PumpzError::NoActiveEdit),
        }
    }
}
