use async_trait::async_trait;
use models::record::{self, Projection, Record};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::records::repository::RecordRepository;

/// SeaORM-backed repository over the shared MySQL connection.
pub struct SeaOrmRecordRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl RecordRepository for SeaOrmRecordRepository {
    async fn count(&self) -> Result<i64, ServiceError> {
        Ok(record::count(&self.db).await?)
    }

    async fn page(&self, projection: &Projection, limit: i64, offset: i64) -> Result<Vec<Record>, ServiceError> {
        Ok(record::fetch_page(&self.db, projection, limit, offset).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Vec<Record>, ServiceError> {
        Ok(record::find_by_id(&self.db, id).await?)
    }

    async fn columns(&self) -> Result<Vec<String>, ServiceError> {
        Ok(record::column_names(&self.db).await?)
    }
}
