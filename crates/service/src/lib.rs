//! Service layer for the record table.
//! - `records::repository` is the store seam; SeaORM and in-memory backends implement it.
//! - `records::service` holds pagination and column-selection rules.

pub mod errors;
pub mod records;
