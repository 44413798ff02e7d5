pub mod audit;
pub mod db;
pub mod repositories;

pub use audit::{AuditLog, StorageError};
