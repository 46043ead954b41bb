//! Triple encoders for catalog metadata and CSV rows

pub mod metadata;
pub mod observation;

pub use metadata::encode_metadata;
pub use observation::{encode_observation, ObservationEncoder};
