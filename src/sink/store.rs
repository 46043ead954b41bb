//! Sink loading triples into an in-memory Oxigraph store, for querying the cube with SPARQL

use crate::error::{Error, Result};
use crate::sink::TripleSink;
use oxigraph::model::{GraphNameRef, Triple};
use oxigraph::sparql::{QueryResults, SparqlEvaluator};
use oxigraph::store::Store;
use std::collections::HashMap;

pub struct StoreSink {
    store: Store,
}

impl StoreSink {
    pub fn new() -> Result<Self> {
        Ok(Self { store: Store::new()? })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store.is_empty()?)
    }

    /// Run a SELECT query; each solution maps variable names to their bound terms
    pub fn select(&self, query: &str) -> Result<Vec<HashMap<String, String>>> {
        let parsed = SparqlEvaluator::new()
            .parse_query(query)
            .map_err(|e| Error::Sink(format!("invalid query: {}", e)))?;
        let results = parsed
            .on_store(&self.store)
            .execute()
            .map_err(|e| Error::Sink(e.to_string()))?;

        let mut bindings = Vec::new();
        if let QueryResults::Solutions(solutions) = results {
            for solution in solutions {
                let solution = solution.map_err(|e| Error::Sink(e.to_string()))?;
                bindings.push(
                    solution
                        .iter()
                        .map(|(var, term)| (var.as_str().to_string(), term.to_string()))
                        .collect(),
                );
            }
        }
        Ok(bindings)
    }
}

impl TripleSink for StoreSink {
    fn emit(&mut self, triple: Triple) -> Result<()> {
        self.store.insert(triple.as_ref().in_graph(GraphNameRef::DefaultGraph))?;
        Ok(())
    }
}
