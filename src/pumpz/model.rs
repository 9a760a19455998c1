use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Stable identifier of a record.
///
/// Datasets in the wild use both numeric and string ids, so both are accepted.
/// Any JSON number is usable: whole numbers (`2`, `2.0`) become `Int`, anything
/// else keeps its JSON text (`2.5` becomes `Text("2.5")`). Integers order
/// before strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl RecordId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordId::Int(n) => Some(*n),
            RecordId::Text(_) => None,
        }
    }
}

impl TryFrom<Value> for RecordId {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(RecordId::Text(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    return Ok(RecordId::Int(i));
                }
                let whole = n
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64);
                Ok(match whole {
                    Some(f) => RecordId::Int(f as i64),
                    None => RecordId::Text(n.to_string()),
                })
            }
            other => Err(format!("record id must be a number or a string, got {}", other)),
        }
    }
}

impl From<RecordId> for Value {
    fn from(id: RecordId) -> Self {
        match id {
            RecordId::Int(n) => Value::from(n),
            RecordId::Text(s) => Value::String(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Int(n.into())
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

/// A single cell value. Absence is distinct from an empty string or zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    #[default]
    Absent,
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

// No schema is enforced on input: booleans are kept as text, containers are dropped.
impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => n.as_f64().map_or(FieldValue::Absent, FieldValue::Number),
            Value::Bool(b) => FieldValue::Text(b.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => FieldValue::Absent,
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            FieldValue::Absent => Value::Null,
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{}", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Absent => Ok(()),
        }
    }
}

/// The data columns of a pump record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    Type,
    Block,
    Latitude,
    Longitude,
    FlowRate,
    Offset,
    CurrentPressure,
    MinPressure,
    MaxPressure,
}

impl Column {
    /// All columns, in display order.
    pub const ALL: [Column; 10] = [
        Column::Name,
        Column::Type,
        Column::Block,
        Column::Latitude,
        Column::Longitude,
        Column::FlowRate,
        Column::Offset,
        Column::CurrentPressure,
        Column::MinPressure,
        Column::MaxPressure,
    ];

    /// Columns the free-text search looks at.
    pub const SEARCHABLE: [Column; 3] = [Column::Name, Column::Type, Column::Block];

    /// The JSON key of the column.
    pub fn key(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Type => "type",
            Column::Block => "block",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
            Column::FlowRate => "flowRate",
            Column::Offset => "offset",
            Column::CurrentPressure => "currentPressure",
            Column::MinPressure => "minPressure",
            Column::MaxPressure => "maxPressure",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Name => "Pump Name",
            Column::Type => "Type",
            Column::Block => "Area/Block",
            Column::Latitude => "Latitude",
            Column::Longitude => "Longitude",
            Column::FlowRate => "Flow Rate",
            Column::Offset => "Offset",
            Column::CurrentPressure => "Current Pressure",
            Column::MinPressure => "Min Pressure",
            Column::MaxPressure => "Max Pressure",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Column {
    type Err = String;

    /// Accepts the JSON key in any case, and snake/kebab case spellings
    /// (`flowRate`, `flow_rate`, `FLOW-RATE`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Column::ALL
            .iter()
            .copied()
            .find(|col| col.key().to_lowercase() == wanted)
            .ok_or_else(|| s.to_string())
    }
}

/// One pump. The set of fields is fixed; any of them may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: RecordId,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub name: FieldValue,
    #[serde(rename = "type", default, skip_serializing_if = "FieldValue::is_absent")]
    pub kind: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub block: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub latitude: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub longitude: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub flow_rate: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub offset: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub current_pressure: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub min_pressure: FieldValue,
    #[serde(default, skip_serializing_if = "FieldValue::is_absent")]
    pub max_pressure: FieldValue,
}

impl Record {
    /// A record with every field absent.
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            name: FieldValue::Absent,
            kind: FieldValue::Absent,
            block: FieldValue::Absent,
            latitude: FieldValue::Absent,
            longitude: FieldValue::Absent,
            flow_rate: FieldValue::Absent,
            offset: FieldValue::Absent,
            current_pressure: FieldValue::Absent,
            min_pressure: FieldValue::Absent,
            max_pressure: FieldValue::Absent,
        }
    }

    pub fn with(mut self, column: Column, value: impl Into<FieldValue>) -> Self {
        self.set(column, value.into());
        self
    }

    pub fn get(&self, column: Column) -> &FieldValue {
        match column {
            Column::Name => &self.name,
            Column::Type => &self.kind,
            Column::Block => &self.block,
            Column::Latitude => &self.latitude,
            Column::Longitude => &self.longitude,
            Column::FlowRate => &self.flow_rate,
            Column::Offset => &self.offset,
            Column::CurrentPressure => &self.current_pressure,
            Column::MinPressure => &self.min_pressure,
            Column::MaxPressure => &self.max_pressure,
        }
    }

    pub fn set(&mut self, column: Column, value: FieldValue) {
        let slot = match column {
            Column::Name => &mut self.name,
            Column::Type => &mut self.kind,
            Column::Block => &mut self.block,
            Column::Latitude => &mut self.latitude,
            Column::Longitude => &mut self.longitude,
            Column::FlowRate => &mut self.flow_rate,
            Column::Offset => &mut self.offset,
            Column::CurrentPressure => &mut self.current_pressure,
            Column::MinPressure => &mut self.min_pressure,
            Column::MaxPressure => &mut self.max_pressure,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_records_with_missing_fields() {
        let json = r#"[
            {"id": 1, "name": "Main Pump", "type": "Centrifugal", "flowRate": 12.5},
            {"id": "P-2", "block": null, "extra": "ignored"}
        ]"#;
        let records: Vec<Record> = serde_json::from_str(json).unwrap();

        assert_eq!(records[0].id, RecordId::Int(1));
        assert_eq!(records[0].get(Column::Name), &FieldValue::text("Main Pump"));
        assert_eq!(records[0].get(Column::FlowRate), &FieldValue::Number(12.5));
        assert!(records[0].get(Column::Block).is_absent());

        assert_eq!(records[1].id, RecordId::Text("P-2".into()));
        assert!(records[1].get(Column::Block).is_absent());
    }

    #[test]
    fn keeps_booleans_as_text() {
        let record: Record = serde_json::from_str(r#"{"id": 3, "type": true}"#).unwrap();
        assert_eq!(record.kind, FieldValue::text("true"));
    }

    #[test]
    fn absent_fields_are_not_serialized() {
        let record = Record::new(7).with(Column::Name, "Solo");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"id":7,"name":"Solo"}"#);
    }

    #[test]
    fn column_parsing_accepts_common_spellings() {
        assert_eq!("flowRate".parse::<Column>(), Ok(Column::FlowRate));
        assert_eq!("flow_rate".parse::<Column>(), Ok(Column::FlowRate));
        assert_eq!("NAME".parse::<Column>(), Ok(Column::Name));
        assert!("actions".parse::<Column>().is_err());
    }

    #[test]
    fn any_json_number_is_a_usable_id() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[2, 2.0, 2.5, "P-2", -4]"#).unwrap();
        assert_eq!(
            ids,
            vec![
                RecordId::Int(2),
                RecordId::Int(2),
                RecordId::Text("2.5".into()),
                RecordId::Text("P-2".into()),
                RecordId::Int(-4),
            ]
        );
    }

    #[test]
    fn unusable_ids_are_rejected() {
        assert!(serde_json::from_str::<Record>(r#"{"name": "No Id"}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"id": null}"#).is_err());
        assert!(serde_json::from_str::<Record>(r#"{"id": true}"#).is_err());
    }

    #[test]
    fn number_display_drops_trailing_zero() {
        assert_eq!(FieldValue::Number(12.0).to_string(), "12");
        assert_eq!(FieldValue::Absent.to_string(), "");
    }
}
