//! Cell typing and label humanization

pub mod label;
pub mod value;

pub use label::humanize;
pub use value::{parse_decimal, type_value};
