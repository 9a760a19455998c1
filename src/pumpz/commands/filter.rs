use crate::model::{Column, Record};

/// Keeps the records whose name, type or block contains `query`, ignoring case.
///
/// The result is an order-preserving subsequence of `records`. A blank query
/// (empty or whitespace only) keeps every record. Absent or non-text fields
/// never match.
pub fn apply<'a, I>(records: I, query: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let query = query.trim();
    if query.is_empty() {
        return records.into_iter().collect();
    }

    let needle = query.to_lowercase();
    records
        .into_iter()
        .filter(|record| matches(record, &needle))
        .collect()
}

fn matches(record: &Record, needle: &str) -> bool {
    Column::SEARCHABLE.iter().any(|col| {
        record
            .get(*col)
            .as_text()
            .is_some_and(|text| text.to_lowercase().contains(needle))
    })
}
