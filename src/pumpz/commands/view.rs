//! The derived table view.
//!
//! [`compute`] runs filter → sort → paginate over the full collection every time
//! it is called. Nothing is cached between calls, so the result can never drift
//! from the store.

use super::{filter, paginate, sort};
use crate::model::Record;
use sort::SortSpec;
use tracing::debug;

/// Everything needed to derive a view from a collection.
#[derive(Debug, Clone, Copy)]
pub struct ViewParams<'a> {
    pub query: &'a str,
    pub sort: Option<&'a SortSpec>,
    pub page: usize,
    pub page_size: usize,
}

/// One page of the filtered, sorted collection plus the counts around it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub rows: Vec<Record>,
    pub filtered_count: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }
}

pub fn compute(records: &[Record], params: ViewParams<'_>) -> TableView {
    let filtered = filter::apply(records, params.query);
    let filtered_count = filtered.len();
    let sorted = sort::apply(filtered, params.sort);

    let total_pages = paginate::total_pages(filtered_count, params.page_size);
    let requested = i64::try_from(params.page).unwrap_or(i64::MAX);
    let current_page = paginate::clamp_page(requested, total_pages);
    let rows: Vec<Record> = paginate::apply(&sorted, params.page_size, current_page)
        .iter()
        .map(|r| (*r).clone())
        .collect();

    debug!(
        query = params.query,
        filtered = filtered_count,
        page = current_page,
        rows = rows.len(),
        "view recomputed"
    );

    TableView {
        rows,
        filtered_count,
        total_count: records.len(),
        total_pages,
        current_page,
        page_size: params.page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::sort::SortDirection;
    use crate::model::Column;

    fn params<'a>(query: &'a str, sort: Option<&'a SortSpec>, page: usize, size: usize) -> ViewParams<'a> {
        ViewParams {
            query,
            sort,
            page,
            page_size: size,
        }
    }

    fn pumps(count: i64) -> Vec<Record> {
        (1..=count)
            .map(|i| Record::new(i).with(Column::Name, format!("Pump {:02}", i).as_str()))
            .collect()
    }

    #[test]
    fn pages_the_filtered_set() {
        let records = pumps(25);
        let view = compute(&records, params("", None, 3, 10));
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.rows.len(), 5);
        assert_eq!(view.filtered_count, 25);
        assert_eq!(view.total_count, 25);
    }

    #[test]
    fn counts_are_taken_after_filtering() {
        let records = pumps(25);
        let view = compute(&records, params("pump 1", None, 1, 10));
        assert_eq!(view.filtered_count, 10);
        assert_eq!(view.total_count, 25);
        assert_eq!(view.total_pages, 1);
    }

    #[test]
    fn sorts_before_paging() {
        let records = pumps(25);
        let spec = SortSpec::new(Column::Name, SortDirection::Descending);
        let view = compute(&records, params("", Some(&spec), 1, 10));
        assert_eq!(view.rows[0].id.as_int(), Some(25));
    }

    #[test]
    fn huge_page_clamps_to_last_page() {
        let records = pumps(25);
        let view = compute(&records, params("", None, usize::MAX, 10));
        assert_eq!(view.current_page, 3);
        assert_eq!(view.rows.len(), 5);
    }

    #[test]
    fn empty_collection_yields_empty_view() {
        let view = compute(&[], params("anything", None, 4, 10));
        assert!(view.is_empty());
        assert!(view.rows.is_empty());
        assert_eq!(view.total_pages, 0);
        assert_eq!(view.current_page, 1);
    }
}
