use async_trait::async_trait;
use models::record::{Projection, Record};

use crate::errors::ServiceError;

/// Store access needed by [`RecordService`](super::RecordService).
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn count(&self) -> Result<i64, ServiceError>;
    async fn page(&self, projection: &Projection, limit: i64, offset: i64) -> Result<Vec<Record>, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Vec<Record>, ServiceError>;
    async fn columns(&self) -> Result<Vec<String>, ServiceError>;
}

/// In-memory repository used by tests
#[cfg(any(test, feature = "memory"))]
pub mod memory {
    use super::*;
    use models::record::ID_COLUMN;
    use serde_json::Value;

    pub struct MemoryRecordRepository {
        columns: Vec<String>,
        rows: Vec<Record>,
        available: bool,
    }

    impl MemoryRecordRepository {
        /// Every row is expected to carry the listed columns in that order.
        pub fn new(columns: Vec<String>, rows: Vec<Record>) -> Self {
            Self { columns, rows, available: true }
        }

        /// `n` rows with `record_id` 1..=n plus `name` and `state`.
        pub fn sample(n: usize) -> Self {
            let columns = vec![ID_COLUMN.to_string(), "name".to_string(), "state".to_string()];
            let rows = (1..=n)
                .map(|i| {
                    let mut row = Record::new();
                    row.insert(ID_COLUMN.into(), Value::from(i as i64));
                    row.insert("name".into(), Value::from(format!("Carrier {i}")));
                    row.insert("state".into(), Value::from(if i % 2 == 0 { "TX" } else { "CA" }));
                    row
                })
                .collect();
            Self::new(columns, rows)
        }

        /// A store that fails every call, like a connection that never came up.
        pub fn unavailable() -> Self {
            Self { columns: Vec::new(), rows: Vec::new(), available: false }
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.available {
                Ok(())
            } else {
                Err(ServiceError::Db("Connection Error: not connected".into()))
            }
        }

        fn project(&self, row: &Record, names: &[String]) -> Result<Record, ServiceError> {
            let mut out = Record::new();
            for name in names {
                if !self.columns.contains(name) {
                    return Err(ServiceError::Db(format!("Unknown column '{name}' in 'field list'")));
                }
                out.insert(name.clone(), row.get(name).cloned().unwrap_or(Value::Null));
            }
            Ok(out)
        }
    }

    fn id_text(v: &Value) -> String {
        match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    #[async_trait]
    impl RecordRepository for MemoryRecordRepository {
        async fn count(&self) -> Result<i64, ServiceError> {
            self.check()?;
            Ok(self.rows.len() as i64)
        }

        async fn page(&self, projection: &Projection, limit: i64, offset: i64) -> Result<Vec<Record>, ServiceError> {
            self.check()?;
            let window = self
                .rows
                .iter()
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .take(usize::try_from(limit).unwrap_or(0));
            match projection.names() {
                None => Ok(window.cloned().collect()),
                Some(names) => window.map(|row| self.project(row, names)).collect(),
            }
        }

        async fn find_by_id(&self, id: &str) -> Result<Vec<Record>, ServiceError> {
            self.check()?;
            Ok(self
                .rows
                .iter()
                .filter(|row| row.get(ID_COLUMN).map(id_text).as_deref() == Some(id))
                .cloned()
                .collect())
        }

        async fn columns(&self) -> Result<Vec<String>, ServiceError> {
            self.check()?;
            Ok(self.columns.clone())
        }
    }
}
