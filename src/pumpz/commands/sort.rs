//! Single-column sorting and the column-click state machine.
//!
//! ## Comparison Rule
//!
//! Values are compared by type first, then by value:
//! - numbers compare numerically (`f64::total_cmp`)
//! - text compares byte-wise, case-sensitive (`"B" < "a"`)
//! - any number sorts before any text
//! - absent values always sort last, whatever the direction
//!
//! The sort is stable: records with equal keys keep their input order in both
//! directions. Sorting by a key that is not a data column compares every pair as
//! equal, which leaves the input untouched.

use crate::model::{Column, FieldValue, Record};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction
    pub fn toggle(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// What a column header click refers to. Keys that are not data columns are kept
/// as-is so they can be displayed, but they never reorder anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Column(Column),
    Unknown(String),
}

impl SortKey {
    pub fn column(&self) -> Option<Column> {
        match self {
            SortKey::Column(c) => Some(*c),
            SortKey::Unknown(_) => None,
        }
    }
}

impl From<Column> for SortKey {
    fn from(column: Column) -> Self {
        SortKey::Column(column)
    }
}

impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        s.parse::<Column>()
            .map(SortKey::Column)
            .unwrap_or_else(|_| SortKey::Unknown(s.to_string()))
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::from(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Column(c) => write!(f, "{}", c),
            SortKey::Unknown(s) => write!(f, "{}", s),
        }
    }
}

/// The single active (key, direction) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(key: impl Into<SortKey>, direction: SortDirection) -> Self {
        Self {
            key: key.into(),
            direction,
        }
    }
}

/// Column header interaction.
///
/// Once a column has been clicked the state only ever moves between the two
/// sorted states; there is no way back to `Unsorted`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SortState {
    #[default]
    Unsorted,
    Ascending(SortKey),
    Descending(SortKey),
}

impl From<SortSpec> for SortState {
    fn from(spec: SortSpec) -> Self {
        match spec.direction {
            SortDirection::Ascending => SortState::Ascending(spec.key),
            SortDirection::Descending => SortState::Descending(spec.key),
        }
    }
}

impl SortState {
    /// Same column flips the direction; any other column starts ascending.
    pub fn click(&self, key: SortKey) -> SortState {
        match self.spec() {
            Some(current) if current.key == key => {
                SortState::from(SortSpec::new(key, current.direction.toggle()))
            }
            _ => SortState::Ascending(key),
        }
    }

    pub fn spec(&self) -> Option<SortSpec> {
        match self {
            SortState::Unsorted => None,
            SortState::Ascending(key) => Some(SortSpec::new(key.clone(), SortDirection::Ascending)),
            SortState::Descending(key) => {
                Some(SortSpec::new(key.clone(), SortDirection::Descending))
            }
        }
    }
}

/// Sorts `records` by `spec`. No spec means no reordering at all.
pub fn apply<'a>(mut records: Vec<&'a Record>, spec: Option<&SortSpec>) -> Vec<&'a Record> {
    let Some(spec) = spec else {
        return records;
    };
    let Some(column) = spec.key.column() else {
        return records;
    };

    records.sort_by(|a, b| compare_values(a.get(column), b.get(column), spec.direction));
    records
}

/// Orders two cell values for the given direction. See the module docs for the rule.
pub fn compare_values(a: &FieldValue, b: &FieldValue, direction: SortDirection) -> Ordering {
    match (a, b) {
        (FieldValue::Absent, FieldValue::Absent) => Ordering::Equal,
        (FieldValue::Absent, _) => Ordering::Greater,
        (_, FieldValue::Absent) => Ordering::Less,
        _ => {
            let ord = compare_present(a, b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

fn compare_present(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.as_str().cmp(y.as_str()),
        (FieldValue::Number(_), FieldValue::Text(_)) => Ordering::Less,
        (FieldValue::Text(_), FieldValue::Number(_)) => Ordering::Greater,
        // absent is handled by the caller
        _ => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(records: &[&Record]) -> Vec<i64> {
        records.iter().filter_map(|r| r.id.as_int()).collect()
    }

    fn sorted(records: &[Record], column: Column, direction: SortDirection) -> Vec<i64> {
        let spec = SortSpec::new(column, direction);
        ids(&apply(records.iter().collect(), Some(&spec)))
    }

    #[test]
    fn no_spec_is_identity() {
        let records = vec![
            Record::new(3).with(Column::Name, "c"),
            Record::new(1).with(Column::Name, "a"),
            Record::new(2).with(Column::Name, "b"),
        ];
        assert_eq!(ids(&apply(records.iter().collect(), None)), vec![3, 1, 2]);
    }

    #[test]
    fn ties_keep_input_order() {
        let records = vec![
            Record::new(1).with(Column::Type, "A"),
            Record::new(2).with(Column::Type, "A"),
        ];
        assert_eq!(sorted(&records, Column::Type, SortDirection::Ascending), vec![1, 2]);
        assert_eq!(sorted(&records, Column::Type, SortDirection::Descending), vec![1, 2]);
    }

    #[test]
    fn descending_reverses_distinct_values() {
        let records = vec![
            Record::new(1).with(Column::Name, "delta"),
            Record::new(2).with(Column::Name, "alpha"),
            Record::new(3).with(Column::Name, "charlie"),
            Record::new(4).with(Column::Name, "bravo"),
        ];
        let mut asc = sorted(&records, Column::Name, SortDirection::Ascending);
        let desc = sorted(&records, Column::Name, SortDirection::Descending);
        assert_eq!(asc, vec![2, 4, 3, 1]);
        asc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn numbers_compare_numerically() {
        let records = vec![
            Record::new(1).with(Column::FlowRate, 10.0),
            Record::new(2).with(Column::FlowRate, 2.0),
            Record::new(3).with(Column::FlowRate, -1.5),
        ];
        assert_eq!(sorted(&records, Column::FlowRate, SortDirection::Ascending), vec![3, 2, 1]);
    }

    #[test]
    fn text_comparison_is_case_sensitive() {
        let records = vec![
            Record::new(1).with(Column::Name, "apple"),
            Record::new(2).with(Column::Name, "Banana"),
        ];
        assert_eq!(sorted(&records, Column::Name, SortDirection::Ascending), vec![2, 1]);
    }

    #[test]
    fn absent_sorts_last_in_both_directions() {
        let records = vec![
            Record::new(1),
            Record::new(2).with(Column::Block, "B"),
            Record::new(3),
            Record::new(4).with(Column::Block, "A"),
        ];
        assert_eq!(sorted(&records, Column::Block, SortDirection::Ascending), vec![4, 2, 1, 3]);
        assert_eq!(sorted(&records, Column::Block, SortDirection::Descending), vec![2, 4, 1, 3]);
    }

    #[test]
    fn numbers_sort_before_edited_text() {
        let records = vec![
            Record::new(1).with(Column::MaxPressure, "7"),
            Record::new(2).with(Column::MaxPressure, 9.0),
        ];
        assert_eq!(sorted(&records, Column::MaxPressure, SortDirection::Ascending), vec![2, 1]);
    }

    #[test]
    fn unknown_key_does_not_reorder() {
        let records = vec![
            Record::new(2).with(Column::Name, "b"),
            Record::new(1).with(Column::Name, "a"),
        ];
        let spec = SortSpec::new(SortKey::Unknown("actions".into()), SortDirection::Ascending);
        assert_eq!(ids(&apply(records.iter().collect(), Some(&spec))), vec![2, 1]);
    }

    #[test]
    fn clicking_same_column_cycles_between_sorted_states() {
        let name = SortKey::Column(Column::Name);
        let first = SortState::Unsorted.click(name.clone());
        let second = first.click(name.clone());
        let third = second.click(name.clone());

        assert_eq!(first, SortState::Ascending(name.clone()));
        assert_eq!(second, SortState::Descending(name.clone()));
        assert_eq!(third, SortState::Ascending(name));
    }

    #[test]
    fn clicking_descending_column_flips_back_to_ascending() {
        let flow = SortKey::Column(Column::FlowRate);
        let state = SortState::Descending(flow.clone());
        assert_eq!(state.click(flow.clone()), SortState::Ascending(flow));
    }

    #[test]
    fn clicking_other_column_starts_ascending() {
        let state = SortState::Descending(SortKey::Column(Column::Name));
        assert_eq!(
            state.click(SortKey::Column(Column::Type)),
            SortState::Ascending(SortKey::Column(Column::Type))
        );
    }

    #[test]
    fn sort_key_parsing_keeps_unknown_keys() {
        assert_eq!("flowRate".parse::<SortKey>(), Ok(SortKey::Column(Column::FlowRate)));
        assert_eq!(
            "actions".parse::<SortKey>(),
            Ok(SortKey::Unknown("actions".into()))
        );
    }

    #[test]
    fn direction_toggles() {
        assert_eq!(SortDirection::Ascending.toggle(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.toggle(), SortDirection::Ascending);
    }
}
