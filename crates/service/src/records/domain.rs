use serde::Serialize;
use serde_json::Value;

pub use models::record::Record;

/// Envelope returned by the list operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
    pub last_page: i64,
    pub total_records: i64,
    pub data: Vec<Record>,
}

/// `{ "columns": [...] }`
#[derive(Debug, Clone, Serialize)]
pub struct ColumnList {
    pub columns: Vec<String>,
}

/// Column names a caller asked for, as raw JSON elements.
///
/// Only a non-empty JSON array under `columns` counts as a request;
/// anything else means "all columns".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnSelection(Option<Vec<Value>>);

impl ColumnSelection {
    pub fn all() -> Self {
        Self(None)
    }

    /// Read the `columns` field of a request body.
    pub fn from_body(body: Option<&Value>) -> Self {
        match body.and_then(|b| b.get("columns")) {
            Some(Value::Array(items)) if !items.is_empty() => Self(Some(items.clone())),
            _ => Self(None),
        }
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<Value> = names.into_iter().map(|n| Value::String(n.into())).collect();
        if items.is_empty() { Self(None) } else { Self(Some(items)) }
    }

    pub fn requested(&self) -> Option<&[Value]> {
        self.0.as_deref()
    }
}
