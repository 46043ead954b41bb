//! N-Triples output

use crate::core::write_ntriples_line;
use crate::error::{Error, Result};
use crate::sink::TripleSink;
use oxigraph::model::Triple;
use std::io::{BufWriter, Write};

pub struct NTriplesSink<W: Write> {
    writer: BufWriter<W>,
    written: u64,
}

impl<W: Write> NTriplesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: BufWriter::new(writer), written: 0 }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| Error::Sink(e.error().to_string()))
    }
}

impl<W: Write + Send> TripleSink for NTriplesSink<W> {
    fn emit(&mut self, triple: Triple) -> Result<()> {
        write_ntriples_line(&mut self.writer, &triple).map_err(|e| Error::Sink(e.to_string()))?;
        self.written += 1;
        Ok(())
    }

    fn report_error(&mut self, error: &Error) {
        log::error!("Conversion failed after {} triples: {}", self.written, error);
        // keep what was produced for the rows already consumed
        if let Err(e) = self.writer.flush() {
            log::warn!("Could not flush partial output: {}", e);
        }
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| Error::Sink(e.to_string()))
    }
}
