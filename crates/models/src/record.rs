//! Access to the `fmsca_records` table.
//!
//! Rows are schema-opaque: they come back as JSON objects keyed by column
//! name, in the order the store returns the columns.

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, FromQueryResult, JsonValue, QueryResult, Statement};
use tracing::warn;

use crate::errors::ModelError;

pub const TABLE: &str = "fmsca_records";
pub const ID_COLUMN: &str = "record_id";

/// One row of the table.
pub type Record = serde_json::Map<String, JsonValue>;

/// Column list of a page query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    /// `*`
    All,
    /// Names already checked against the schema; emitted as quoted identifiers.
    Quoted(Vec<String>),
    /// Names interpolated exactly as given.
    Verbatim(Vec<String>),
}

impl Projection {
    pub fn to_sql(&self) -> String {
        match self {
            Projection::All => "*".to_string(),
            Projection::Quoted(names) => names.iter().map(|n| quote_identifier(n)).collect::<Vec<_>>().join(", "),
            Projection::Verbatim(names) => names.join(", "),
        }
    }

    /// Requested column names, or `None` for `*`.
    pub fn names(&self) -> Option<&[String]> {
        match self {
            Projection::All => None,
            Projection::Quoted(names) | Projection::Verbatim(names) => Some(names),
        }
    }
}

/// Backtick-quote a MySQL identifier, doubling embedded backticks.
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

pub fn count_statement() -> Statement {
    Statement::from_string(DbBackend::MySql, format!("SELECT COUNT(*) AS total FROM {TABLE}"))
}

pub fn page_statement(projection: &Projection, limit: i64, offset: i64) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::MySql,
        format!("SELECT {} FROM {TABLE} LIMIT ? OFFSET ?", projection.to_sql()),
        [limit.into(), offset.into()],
    )
}

pub fn by_id_statement(id: &str) -> Statement {
    Statement::from_sql_and_values(
        DbBackend::MySql,
        format!("SELECT * FROM {TABLE} WHERE {ID_COLUMN} = ?"),
        [id.to_owned().into()],
    )
}

pub fn columns_statement() -> Statement {
    Statement::from_string(DbBackend::MySql, format!("SHOW COLUMNS FROM {TABLE}"))
}

/// Unfiltered row count.
pub async fn count(db: &DatabaseConnection) -> Result<i64, ModelError> {
    let row = db
        .query_one(count_statement())
        .await?
        .ok_or_else(|| ModelError::Db("count query returned no row".into()))?;
    Ok(row.try_get::<i64>("", "total")?)
}

/// `LIMIT limit OFFSET offset` over the projected columns, in store order.
pub async fn fetch_page(
    db: &DatabaseConnection,
    projection: &Projection,
    limit: i64,
    offset: i64,
) -> Result<Vec<Record>, ModelError> {
    let rows = db.query_all(page_statement(projection, limit, offset)).await?;
    rows.iter().map(decode_row).collect()
}

/// Zero or one row whose `record_id` equals `id`.
pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Vec<Record>, ModelError> {
    let rows = db.query_all(by_id_statement(id)).await?;
    rows.iter().map(decode_row).collect()
}

/// Column names as reported by the store, in table order.
pub async fn column_names(db: &DatabaseConnection) -> Result<Vec<String>, ModelError> {
    let rows = db.query_all(columns_statement()).await?;
    rows.iter().map(field_name).collect()
}

fn field_name(row: &QueryResult) -> Result<String, ModelError> {
    match row.try_get::<String>("", "Field") {
        Ok(name) => Ok(name),
        // some servers report SHOW COLUMNS fields as binary strings
        Err(_) => {
            let raw = row.try_get::<Vec<u8>>("", "Field")?;
            Ok(String::from_utf8_lossy(&raw).into_owned())
        }
    }
}

/// Decode one row into a JSON object holding every column the store
/// returned, in result-set order.
///
/// SeaORM's typed JSON decoding skips columns it has no mapping for
/// (YEAR, BIT, spatial types, ...); those are recovered as text, bytes or
/// numbers, and as `null` when nothing fits.
fn decode_row(row: &QueryResult) -> Result<Record, ModelError> {
    let typed = match JsonValue::from_query_result(row, "")? {
        JsonValue::Object(map) => map,
        _ => Record::new(),
    };
    Ok(merge_columns(row.column_names(), typed, |name| fallback_value(row, name)))
}

fn merge_columns<F>(names: Vec<String>, mut typed: Record, fallback: F) -> Record
where
    F: Fn(&str) -> JsonValue,
{
    let mut out = Record::new();
    for name in names {
        let value = match typed.remove(&name) {
            Some(v) => v,
            None => fallback(&name),
        };
        out.insert(name, value);
    }
    out
}

fn fallback_value(row: &QueryResult, name: &str) -> JsonValue {
    if let Ok(v) = row.try_get::<Option<String>>("", name) {
        return v.into();
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>>("", name) {
        return v.map(|b| String::from_utf8_lossy(&b).into_owned()).into();
    }
    // YEAR and BIT decode as unsigned integers
    if let Ok(v) = row.try_get::<Option<u64>>("", name) {
        return v.into();
    }
    if let Ok(v) = row.try_get::<Option<i64>>("", name) {
        return v.into();
    }
    if let Ok(v) = row.try_get::<Option<f64>>("", name) {
        return v.into();
    }
    warn!(column = %name, "column type has no JSON mapping; returning null");
    JsonValue::Null
}
