//! Triple sinks.
//!
//! The pipeline hands every triple to a [`TripleSink`] as soon as it is produced; the
//! sink decides whether to buffer, write or persist it.

use crate::error::{Error, Result};
use oxigraph::model::Triple;

pub mod ntriples;
pub mod store;

pub use ntriples::NTriplesSink;
pub use store::StoreSink;

pub trait TripleSink: Send {
    fn emit(&mut self, triple: Triple) -> Result<()>;

    fn emit_all(&mut self, triples: Vec<Triple>) -> Result<()> {
        for triple in triples {
            self.emit(triple)?;
        }
        Ok(())
    }

    /// Called once when the run fails. Triples already emitted are kept.
    fn report_error(&mut self, error: &Error) {
        log::error!("Conversion failed: {}", error);
    }

    /// Called once after the last triple of a successful run
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects triples in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub triples: Vec<Triple>,
    pub finished: bool,
    pub errors: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripleSink for MemorySink {
    fn emit(&mut self, triple: Triple) -> Result<()> {
        self.triples.push(triple);
        Ok(())
    }

    fn report_error(&mut self, error: &Error) {
        self.errors.push(error.to_string());
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
