use crate::error::CoreResult;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

pub const MANIFEST_HEADER: [&str; 3] = ["wav_filename", "wav_filesize", "transcript"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub path: String,
    pub size: u64,
    pub transcript: String,
}

/// Streams one manifest: header on creation, then one unquoted row per call.
pub struct ManifestWriter<W: Write> {
    wtr: csv::Writer<W>,
    rows: usize,
}

impl<W: Write> ManifestWriter<W> {
    pub fn new(inner: W) -> CoreResult<Self> {
        let mut wtr = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(inner);
        wtr.write_record(MANIFEST_HEADER)?;
        Ok(Self { wtr, rows: 0 })
    }

    pub fn write_row(&mut self, row: &ManifestRow) -> CoreResult<()> {
        // Output is never quoted, so a comma in the transcript would add a column.
        let transcript = row.transcript.replace(',', "");
        let size = row.size.to_string();
        self.wtr
            .write_record([row.path.as_str(), size.as_str(), transcript.as_str()])?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> CoreResult<W> {
        self.wtr.flush()?;
        Ok(self.wtr.into_inner().map_err(|e| e.into_error())?)
    }
}
