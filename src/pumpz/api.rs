//! # API Facade
//!
//! [`PumpzApi`] is the table controller: the single entry point a UI uses to
//! drive the pump table, whatever that UI is.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Holds session state**: the search query, sort state, page state and the
//!   current edit session
//! - **Dispatches** to the command modules (filter, sort, paginate, edit, view)
//! - **Applies the page policy**: a new query or page size goes back to page 1,
//!   a new sort keeps the current page, and every change keeps the current page
//!   inside `[1, max(1, total_pages)]`
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: filtering, ordering and slicing live in `commands/*.rs`
//! - **I/O operations**: no stdout, stderr, or file access
//! - **Caching views**: [`PumpzApi::view`] derives the visible page from the
//!   store and the session state every time it is called
//!
//! ## Event Model
//!
//! Every method runs to completion before the next one is called. A UI that
//! introduces threads must funnel all calls through one owner of the facade.

use crate::commands::edit::EditSession;
use crate::commands::filter;
use crate::commands::paginate::Pagination;
use crate::commands::sort::{SortKey, SortState};
use crate::commands::view::{self, TableView, ViewParams};
use crate::config::PumpzConfig;
use crate::error::{PumpzError, Result};
use crate::model::{Column, Record, RecordId};
use crate::store::RecordStore;
use tracing::debug;

pub use crate::commands::sort::{SortDirection, SortSpec};
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

/// The main API facade for pumpz operations.
///
/// Generic over `RecordStore` to allow different storage backends.
#[derive(Debug)]
pub struct PumpzApi<S: RecordStore> {
    store: S,
    query: String,
    sort: SortState,
    pagination: Pagination,
    page_sizes: Vec<usize>,
    edit: EditSession,
}

impl<S: RecordStore> PumpzApi<S> {
    pub fn new(store: S, config: &PumpzConfig) -> Self {
        let mut api = Self {
            store,
            query: String::new(),
            sort: SortState::Unsorted,
            pagination: Pagination::new(config.default_page_size),
            page_sizes: config.page_sizes.clone(),
            edit: EditSession::new(),
        };
        api.sync_total();
        api
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the whole collection.
    pub fn load(&mut self, records: Vec<Record>) {
        self.store.load(records);
        self.sync_total();
    }

    // --- queries ---

    /// The current page of the filtered, sorted collection.
    pub fn view(&self) -> TableView {
        let spec = self.sort.spec();
        view::compute(
            self.store.records(),
            ViewParams {
                query: &self.query,
                sort: spec.as_ref(),
                page: self.pagination.current_page(),
                page_size: self.pagination.page_size(),
            },
        )
    }

    pub fn visible_rows(&self) -> Vec<Record> {
        self.view().rows
    }

    pub fn filtered_count(&self) -> usize {
        filter::apply(self.store.records(), &self.query).len()
    }

    pub fn total_count(&self) -> usize {
        self.store.len()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages()
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn page_sizes(&self) -> &[usize] {
        &self.page_sizes
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    /// Resolves user input to a record id.
    ///
    /// `7` is tried as the integer id first, then as the text id `"7"`. Quoting
    /// (`"7"`) asks for the text id only, so both stay reachable when a dataset
    /// holds each of them.
    pub fn find_id(&self, raw: &str) -> Option<RecordId> {
        let raw = raw.trim();
        let candidates = match raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
            Some(quoted) => vec![RecordId::Text(quoted.to_string())],
            None => {
                let mut ids = Vec::with_capacity(2);
                if let Ok(n) = raw.parse::<i64>() {
                    ids.push(RecordId::Int(n));
                }
                ids.push(RecordId::Text(raw.to_string()));
                ids
            }
        };

        let records = self.store.records();
        candidates
            .into_iter()
            .find(|id| records.iter().any(|r| &r.id == id))
    }

    // --- table commands ---

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.pagination.reset();
        self.sync_total();
        debug!(query = %self.query, "query changed");
    }

    /// Applies a column header click. Sorting keeps the current page.
    pub fn set_sort_column(&mut self, key: impl Into<SortKey>) -> &SortState {
        self.sort = self.sort.click(key.into());
        debug!(sort = ?self.sort, "sort changed");
        &self.sort
    }

    /// Jumps to page `n`, clamped into `[1, max(1, total_pages)]`.
    pub fn set_page(&mut self, n: i64) {
        self.sync_total();
        self.pagination.set_page(n);
    }

    /// Returns false, and stays put, on the last page.
    pub fn next_page(&mut self) -> bool {
        self.sync_total();
        self.pagination.next_page()
    }

    /// Returns false, and stays put, on the first page.
    pub fn prev_page(&mut self) -> bool {
        self.sync_total();
        self.pagination.prev_page()
    }

    pub fn set_page_size(&mut self, n: usize) -> Result<()> {
        if !self.page_sizes.contains(&n) {
            return Err(PumpzError::InvalidPageSize(n));
        }
        self.pagination.set_page_size(n);
        self.sync_total();
        Ok(())
    }

    // --- edit commands ---

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn begin_edit(&mut self, id: &RecordId) -> Result<CmdResult> {
        let discarded = self.edit.buffer().map(|r| r.id.clone());
        let record = self.edit.begin(&self.store, id)?.clone();

        let mut result = CmdResult::default();
        if let Some(previous) = discarded {
            result.add_message(CmdMessage::warning(format!(
                "Unsaved changes to pump {} were discarded",
                previous
            )));
        }
        result.add_message(CmdMessage::info(format!(
            "Editing pump {}: {}",
            record.id, record.name
        )));
        Ok(result)
    }

    pub fn update_edit_field(&mut self, column: Column, value: impl Into<String>) -> Result<()> {
        self.edit.update_field(column, value)
    }

    pub fn commit_edit(&mut self) -> Result<CmdResult> {
        let record = self.edit.commit(&mut self.store)?;
        // the edit may have moved the record out of the filtered set
        self.sync_total();
        Ok(CmdResult::default().with_message(CmdMessage::success(format!(
            "Pump updated ({}): {}",
            record.id, record.name
        ))))
    }

    pub fn cancel_edit(&mut self) -> Result<CmdResult> {
        let record = self.edit.cancel()?;
        Ok(CmdResult::default()
            .with_message(CmdMessage::info(format!("Edit of pump {} cancelled", record.id))))
    }

    fn sync_total(&mut self) {
        let filtered = self.filtered_count();
        self.pagination.set_total_items(filtered);
    }
}

/// Parses a column key, as typed by a user, for editing.
pub fn parse_column(key: &str) -> Result<Column> {
    key.parse::<Column>()
        .map_err(|_| PumpzError::UnknownColumn(key.to_string()))
}
