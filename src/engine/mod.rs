//! The catalog engine: record store, configuration, and the write and query
//! paths that keep every index consistent with the store.

pub mod catalog;
pub mod config;
pub mod query;
pub mod store;
pub mod write;

pub use catalog::{CatalogEngine, CatalogStats};
pub use config::CatalogConfig;
pub use query::Recommendation;
pub use store::{RecordHandle, RecordStore};
