//! Record table: domain types, repository seam and business service.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::RecordService;
