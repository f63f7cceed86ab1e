use std::collections::BTreeMap;

use crate::utils::truncate_chars;

pub const TITLE_COLUMN: &str = "title";
pub const DESCRIPTION_COLUMN: &str = "description";
pub const ID_COLUMN: &str = "id";

/// A single typed cell carried through to the point payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Infer a value from a raw CSV cell.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return FieldValue::Null;
        }
        if let Ok(n) = raw.parse::<i64>() {
            return FieldValue::Integer(n);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => FieldValue::Float(f),
            _ => FieldValue::Text(raw.to_string()),
        }
    }
}

/// One input row of the issue export.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Absolute position of the row in the input (0-based, header excluded).
    pub index: usize,
    /// Value of the `id` column, when present.
    pub id: Option<u64>,
    pub title: String,
    pub description: String,
    /// Every other column, including the raw `id` cell.
    pub fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Point id: the `id` column, or the absolute row index when it is null.
    pub fn point_id(&self) -> u64 {
        self.id.unwrap_or(self.index as u64)
    }

    /// Text submitted for embedding, capped at `max_chars` characters.
    pub fn embedding_text(&self, max_chars: usize) -> String {
        let text = format!("{} {}", self.title, self.description);
        truncate_chars(&text, max_chars).to_string()
    }

    /// Payload stored next to the vector: all columns, title and description included.
    pub fn payload(&self) -> BTreeMap<String, FieldValue> {
        let mut payload = self.fields.clone();
        payload.insert(
            TITLE_COLUMN.to_string(),
            FieldValue::Text(self.title.clone()),
        );
        payload.insert(
            DESCRIPTION_COLUMN.to_string(),
            FieldValue::Text(self.description.clone()),
        );
        payload
    }

    /// Label used in log lines: the id when known, otherwise the row index.
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => format!("#{}", self.index),
        }
    }
}

/// Unit written to the vector store.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertPoint {
    pub id: u64,
    pub vector: Vec<f32>,
    pub payload: BTreeMap<String, FieldValue>,
}

impl UpsertPoint {
    pub fn from_record(record: &Record, vector: Vec<f32>) -> Self {
        Self {
            id: record.point_id(),
            vector,
            payload: record.payload(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: usize, id: Option<u64>) -> Record {
        let mut fields = BTreeMap::new();
        fields.insert(
            ID_COLUMN.to_string(),
            id.map_or(FieldValue::Null, |n| FieldValue::Float(n as f64)),
        );
        fields.insert("status".to_string(), FieldValue::Text("Open".to_string()));
        Record {
            index,
            id,
            title: "Crash on save".to_string(),
            description: "Stack trace attached".to_string(),
            fields,
        }
    }

    #[test]
    fn test_field_value_parse() {
        assert_eq!(FieldValue::parse(""), FieldValue::Null);
        assert_eq!(FieldValue::parse("42"), FieldValue::Integer(42));
        assert_eq!(FieldValue::parse("-7"), FieldValue::Integer(-7));
        assert_eq!(FieldValue::parse("42.0"), FieldValue::Float(42.0));
        assert_eq!(FieldValue::parse("NaN"), FieldValue::Text("NaN".to_string()));
        assert_eq!(
            FieldValue::parse("HADOOP-1"),
            FieldValue::Text("HADOOP-1".to_string())
        );
    }

    #[test]
    fn test_point_id_fallback() {
        assert_eq!(record(5, Some(42)).point_id(), 42);
        assert_eq!(record(5, None).point_id(), 5);
    }

    #[test]
    fn test_payload_contains_all_columns() {
        let payload = record(0, Some(10)).payload();
        assert_eq!(
            payload.get("title"),
            Some(&FieldValue::Text("Crash on save".to_string()))
        );
        assert_eq!(
            payload.get("description"),
            Some(&FieldValue::Text("Stack trace attached".to_string()))
        );
        assert_eq!(payload.get("id"), Some(&FieldValue::Float(10.0)));
        assert_eq!(
            payload.get("status"),
            Some(&FieldValue::Text("Open".to_string()))
        );
        assert_eq!(payload.len(), 4);
    }

    #[test]
    fn test_embedding_text() {
        let r = record(0, None);
        assert_eq!(r.embedding_text(16_000), "Crash on save Stack trace attached");
        assert_eq!(r.embedding_text(5), "Crash");

        let long = Record {
            title: "t".repeat(10_000),
            description: "d".repeat(10_000),
            ..r
        };
        assert_eq!(long.embedding_text(16_000).chars().count(), 16_000);
    }

    #[test]
    fn test_label() {
        assert_eq!(record(3, Some(99)).label(), "99");
        assert_eq!(record(3, None).label(), "#3");
    }
}
