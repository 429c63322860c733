//! Record model, ordering strategies and errors.

pub mod error;
pub mod order;
pub mod record;

pub use error::{CatalogError, CatalogResult};
pub use order::{RecordOrder, SortDirection, SortKey};
pub use record::{Record, RecordBuilder};

/// Capacity of the fixed-size store variant (the classic library limit).
pub const DEFAULT_STORE_CAPACITY: usize = 10_000;

/// Default bucket count for the title hash index. Prime.
pub const DEFAULT_HASH_BUCKETS: usize = 101;

/// Weight given to the edge between two records by the same creator.
pub const SAME_CREATOR_WEIGHT: f32 = 1.0;

/// Number of recommendations returned when the caller does not ask for a limit.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;
