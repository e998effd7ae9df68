use std::sync::Arc;

use common::pagination::PageRequest;
use configs::ColumnPolicy;
use models::record::Projection;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::records::domain::{ColumnList, ColumnSelection, Page, Record};
use crate::records::repository::RecordRepository;

/// Application service for the record table.
/// Owns pagination arithmetic and the column selection policy; every store
/// access goes through the repository.
pub struct RecordService<R: RecordRepository + ?Sized> {
    repo: Arc<R>,
    policy: ColumnPolicy,
}

impl<R: RecordRepository + ?Sized> RecordService<R> {
    pub fn new(repo: Arc<R>, policy: ColumnPolicy) -> Self {
        Self { repo, policy }
    }

    /// One page of rows plus the unfiltered total.
    ///
    /// The count runs before the page query; the two reads are not in a
    /// shared transaction.
    #[instrument(skip(self, columns), fields(page = req.page, page_size = req.page_size))]
    pub async fn list(&self, req: PageRequest, columns: &ColumnSelection) -> Result<Page, ServiceError> {
        req.validate()?;
        let offset = req.checked_offset()?;
        let projection = self.projection(columns).await?;
        debug!(projection = %projection.to_sql(), offset, "record_page_request");

        let total_records = self.repo.count().await?;
        let data = self.repo.page(&projection, req.page_size, offset).await?;
        info!(total_records, rows = data.len(), "record_page_served");

        Ok(Page {
            page: req.page,
            page_size: req.page_size,
            last_page: req.last_page(total_records),
            total_records,
            data,
        })
    }

    /// Rows whose id matches; empty when there is none.
    pub async fn get(&self, id: &str) -> Result<Vec<Record>, ServiceError> {
        let rows = self.repo.find_by_id(id).await?;
        debug!(%id, found = rows.len(), "record_lookup");
        Ok(rows)
    }

    pub async fn columns(&self) -> Result<ColumnList, ServiceError> {
        Ok(ColumnList { columns: self.repo.columns().await? })
    }

    async fn projection(&self, selection: &ColumnSelection) -> Result<Projection, ServiceError> {
        let Some(requested) = selection.requested() else {
            return Ok(Projection::All);
        };
        match self.policy {
            ColumnPolicy::Passthrough => Ok(Projection::Verbatim(requested.iter().map(verbatim_name).collect())),
            ColumnPolicy::Strict => {
                let known = self.repo.columns().await?;
                let names = requested
                    .iter()
                    .map(|item| match item {
                        Value::String(name) if known.iter().any(|k| k == name) => Ok(name.clone()),
                        Value::String(name) => Err(ServiceError::UnknownColumn(name.clone())),
                        other => Err(ServiceError::InvalidArgument(format!("column names must be strings, got {other}"))),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Projection::Quoted(names))
            }
        }
    }
}

fn verbatim_name(item: &Value) -> String {
    match item {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
