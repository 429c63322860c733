//! Reads record files into a flat record list.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::types::error::{CatalogError, CatalogResult};
use crate::types::Record;

use super::{RecordFile, FORMAT_VERSION};

/// Accepts both the versioned envelope and a bare array of records.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnyRecordFile {
    Versioned(RecordFile),
    Bare(Vec<Record>),
}

/// Reader for record files.
pub struct RecordReader;

impl RecordReader {
    /// Read a record file from disk.
    pub fn read_from_file(path: &Path) -> CatalogResult<Vec<Record>> {
        let file = std::fs::File::open(path)?;
        let mut reader = std::io::BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Read records from any reader.
    pub fn read_from(reader: &mut impl Read) -> CatalogResult<Vec<Record>> {
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        Self::parse(&data)
    }

    /// Parse records from a JSON string.
    pub fn parse(data: &str) -> CatalogResult<Vec<Record>> {
        match serde_json::from_str::<AnyRecordFile>(data)? {
            AnyRecordFile::Versioned(file) if file.version > FORMAT_VERSION => Err(
                CatalogError::InvalidInput(format!("unsupported record file version {}", file.version)),
            ),
            AnyRecordFile::Versioned(file) => Ok(file.records),
            AnyRecordFile::Bare(records) => Ok(records),
        }
    }
}
