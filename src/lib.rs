//! # Kubus
//!
//! Kubus turns a published statistical table (a CSV resource plus its CKAN catalog
//! record) into a self-describing RDF Data Cube.
//!
//! The name is the Indonesian word for "cube". Every run produces three groups of
//! triples, in this order:
//!
//! - dataset-level descriptive triples built from the catalog record,
//! - a Data Structure Definition (DSD) inferred from the column set,
//! - one `qb:Observation` per CSV row.
//!
//! ## Features
//!
//! - Column role inference (dimension or measure) from sampled rows
//! - Typed literals for numeric cells and for year/month periods
//! - Shared `refArea` / `refPeriod` links for regional statistics
//! - Pluggable catalog sources and triple sinks
//!
//! ## Example
//!
//! ```rust
//! use kubus::schema::infer_schema;
//! use kubus::{Configuration, RowRecord, Result};
//!
//! fn example() -> Result<()> {
//!     let config = Configuration::new("jumlah-penduduk").validated()?;
//!     let first = RowRecord::from_pairs([("tahun", "2020"), ("jumlah_penduduk", "5000000")]);
//!     let schema = infer_schema(&first, &config)?;
//!     assert_eq!(schema.components.len(), 2);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]

/// Core data structures shared by every stage
pub mod core;

/// Run configuration and its file representation
pub mod config;

/// Fixed RDF vocabulary
pub mod vocab;

/// URI construction for datasets, components, observations and catalog entities
pub mod namespace;

/// Cell typing and column label humanization
pub mod typing;

/// Data Structure Definition inference
pub mod schema;

/// Metadata and observation encoders
pub mod encoding;

/// Catalog and row sources
pub mod sources;

/// Triple sinks
pub mod sink;

/// Stage sequencing for a single conversion run
pub mod pipeline;

pub mod error {
    //! Error types and result definitions

    use thiserror::Error;

    /// Result type alias for Kubus operations
    pub type Result<T> = std::result::Result<T, Error>;

    /// Main error type for Kubus
    #[derive(Error, Debug)]
    pub enum Error {
        /// Invalid or incomplete run configuration
        #[error("Configuration error: {0}")]
        Config(String),

        /// The catalog or the row stream could not be read
        #[error("Source fetch error: {0}")]
        SourceFetch(String),

        /// A constructed URI is not a valid IRI
        #[error("Invalid IRI: {0}")]
        InvalidIri(String),

        /// The sink refused or failed to persist triples
        #[error("Sink error: {0}")]
        Sink(String),

        /// The run was stopped before the row stream ended
        #[error("Run cancelled")]
        Cancelled,
    }

    impl From<reqwest::Error> for Error {
        fn from(err: reqwest::Error) -> Self {
            Error::SourceFetch(err.to_string())
        }
    }

    impl From<csv::Error> for Error {
        fn from(err: csv::Error) -> Self {
            Error::SourceFetch(err.to_string())
        }
    }

    impl From<serde_json::Error> for Error {
        fn from(err: serde_json::Error) -> Self {
            Error::SourceFetch(err.to_string())
        }
    }

    impl From<std::io::Error> for Error {
        fn from(err: std::io::Error) -> Self {
            Error::SourceFetch(err.to_string())
        }
    }

    impl From<oxigraph::model::IriParseError> for Error {
        fn from(err: oxigraph::model::IriParseError) -> Self {
            Error::InvalidIri(err.to_string())
        }
    }

    impl From<oxigraph::store::StorageError> for Error {
        fn from(err: oxigraph::store::StorageError) -> Self {
            Error::Sink(err.to_string())
        }
    }
}

// Re-export commonly used types
pub use config::Configuration;
pub use crate::core::{ColumnSpec, ComponentRole, RowRecord};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineState, RunSummary};
pub use schema::DataStructure;
pub use sink::TripleSink;
