use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::models::{JobListing, EXPORT_COLUMNS};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode record: {0}")]
    Csv(#[from] csv::Error),
}

/// Destination for a finished crawl.
pub trait RecordSink {
    fn write_all(&mut self, records: &[JobListing]) -> Result<(), ExportError>;
}

/// Writes records as CSV rows under a fixed header.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let file = File::create(path.as_ref())?;
        info!("Writing results to {:?}", path.as_ref());
        Ok(CsvSink::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(inner: W) -> Self {
        // The header is written by hand so an empty crawl still yields one.
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        CsvSink { writer }
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_all(&mut self, records: &[JobListing]) -> Result<(), ExportError> {
        self.writer.write_record(EXPORT_COLUMNS)?;
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        info!("Exported {} records", records.len());
        Ok(())
    }
}
