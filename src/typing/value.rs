//! Value typing for observation cells.
//!
//! Numeric cells become canonical `xsd:decimal` literals, everything else a plain
//! literal carrying the raw text. Escaping happens when the literal is serialized.

use crate::config::Configuration;
use crate::vocab::xsd;
use oxigraph::model::{Literal, Term};
use regex::Regex;
use std::sync::LazyLock;

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)\s*$").expect("decimal pattern is valid")
});

/// Parse a cell as a decimal number.
/// Accepts surrounding whitespace, a sign and an optional fraction; rejects exponents,
/// `NaN`, infinities, empty and non-numeric text.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    if !DECIMAL.is_match(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn is_decimal(raw: &str) -> bool {
    parse_decimal(raw).is_some()
}

/// Canonical lexical form of a parsed decimal: `7`, `3.5`, `-0.25`
pub fn canonical_decimal(value: f64) -> String {
    // f64 Display never switches to exponent notation
    format!("{}", value)
}

pub fn decimal_literal(value: f64) -> Literal {
    Literal::new_typed_literal(canonical_decimal(value), xsd::DECIMAL)
}

/// Render a cell of `column` as an RDF object.
/// A configured `transform_value` hook is authoritative over the default typing.
pub fn type_value(raw: &str, column: &str, config: &Configuration) -> Term {
    if let Some(transform) = &config.transform_value {
        return transform(column, raw);
    }
    match parse_decimal(raw) {
        Some(value) => decimal_literal(value).into(),
        None => Literal::new_simple_literal(raw).into(),
    }
}
