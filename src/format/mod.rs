//! Flat record files: the JSON list a catalog is loaded from and saved to.
//!
//! Only records are persisted. Every index is rebuilt from the list on load.

pub mod reader;
pub mod writer;

use serde::{Deserialize, Serialize};

use crate::types::Record;

pub use reader::RecordReader;
pub use writer::RecordWriter;

/// Current record file version.
pub const FORMAT_VERSION: u32 = 1;

/// On-disk layout of a record file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFile {
    pub version: u32,
    pub records: Vec<Record>,
}
