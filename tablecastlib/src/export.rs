//! Where CSV records go.

use std::io;

use crate::Result;

/// A destination for CSV records, one call per row
pub trait RecordSink {
    fn write_record(&mut self, record: &[String]) -> Result<()>;
}

impl<W: io::Write> RecordSink for csv::Writer<W> {
    fn write_record(&mut self, record: &[String]) -> Result<()> {
        csv::Writer::write_record(self, record)?;
        Ok(())
    }
}

/// Collects records in memory; handy in tests
impl RecordSink for Vec<Vec<String>> {
    fn write_record(&mut self, record: &[String]) -> Result<()> {
        self.push(record.to_vec());
        Ok(())
    }
}
