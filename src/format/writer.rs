//! Writes a flat record list to a record file.

use std::io::Write;
use std::path::Path;

use crate::types::error::CatalogResult;
use crate::types::Record;

use super::{RecordFile, FORMAT_VERSION};

/// Writer for record files.
pub struct RecordWriter {
    pretty: bool,
}

impl RecordWriter {
    /// Create a writer producing compact JSON.
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a writer producing indented JSON.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    /// Write records to a file, replacing it.
    pub fn write_to_file(&self, records: &[Record], path: &Path) -> CatalogResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(records, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write records to any writer.
    pub fn write_to(&self, records: &[Record], writer: &mut impl Write) -> CatalogResult<()> {
        let file = RecordFile {
            version: FORMAT_VERSION,
            records: records.to_vec(),
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &file)?;
        } else {
            serde_json::to_writer(&mut *writer, &file)?;
        }
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Default for RecordWriter {
    fn default() -> Self {
        Self::new()
    }
}
