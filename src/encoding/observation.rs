//! Observation encoding: one `qb:Observation` per CSV row.
//!
//! Encoding only reads the row, the inferred structure and the configuration, so rows
//! can be encoded in any order once their stream index is known.

use crate::config::Configuration;
use crate::core::RowRecord;
use crate::error::Result;
use crate::namespace;
use crate::schema::{
    DataStructure, MONTH_FIELD, MUNICIPAL_CODE_FIELD, PROVINCE_CODE_FIELD, YEAR_FIELD,
};
use crate::typing::type_value;
use crate::vocab::{bm, qb, rdf, xsd};
use oxigraph::model::{Literal, NamedNode, Triple};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}$").expect("year pattern is valid"));

/// Encodes rows against one structure and configuration
pub struct ObservationEncoder<'a> {
    config: &'a Configuration,
    schema: &'a DataStructure,
    dataset: NamedNode,
}

impl<'a> ObservationEncoder<'a> {
    pub fn new(config: &'a Configuration, schema: &'a DataStructure) -> Result<Self> {
        Ok(Self { config, schema, dataset: namespace::dataset_uri(config)? })
    }

    /// Triples of the row at 1-based stream position `index`
    pub fn encode(&self, row: &RowRecord, index: u64) -> Result<Vec<Triple>> {
        let subject = namespace::observation_uri(self.config, row, index)?;

        let mut triples = Vec::with_capacity(row.len() + 4);
        triples.push(Triple::new(subject.clone(), rdf::TYPE, qb::OBSERVATION.into_owned()));
        triples.push(Triple::new(subject.clone(), qb::DATA_SET_PROPERTY, self.dataset.clone()));

        match area_code(row) {
            Some(code) => {
                let area = namespace::area_uri(self.config, code)?;
                triples.push(Triple::new(subject.clone(), bm::REF_AREA, area));
            }
            None if self.schema.has_ref_area() => {
                log::debug!("Row {} has no area code, refArea omitted", index);
            }
            None => {}
        }

        match period_literal(row) {
            Some(period) => triples.push(Triple::new(subject.clone(), bm::REF_PERIOD, period)),
            None if self.schema.has_ref_period() => {
                log::debug!("Row {} has no year, refPeriod omitted", index);
            }
            None => {}
        }

        let mut seen = HashSet::new();
        for (column, raw) in row.iter() {
            if self.config.is_ignored(column) {
                continue;
            }
            // a repeated header name is one component; its first cell wins
            if !seen.insert(column) {
                continue;
            }
            let predicate = match self.schema.column(column) {
                Some(spec) => spec.predicate.clone(),
                None => namespace::predicate_uri(self.config, column)?,
            };
            triples.push(Triple::new(
                subject.clone(),
                predicate,
                type_value(raw, column, self.config),
            ));
        }

        Ok(triples)
    }
}

/// Encode one row. See [`ObservationEncoder`] for encoding many rows.
pub fn encode_observation(
    row: &RowRecord,
    index: u64,
    schema: &DataStructure,
    config: &Configuration,
) -> Result<Vec<Triple>> {
    ObservationEncoder::new(config, schema)?.encode(row, index)
}

/// Municipal code when present, else the province code
fn area_code(row: &RowRecord) -> Option<&str> {
    row.non_empty(MUNICIPAL_CODE_FIELD).or_else(|| row.non_empty(PROVINCE_CODE_FIELD))
}

/// `xsd:gYearMonth` for year + month, `xsd:gYear` for a four digit year,
/// and the raw year text for anything else.
fn period_literal(row: &RowRecord) -> Option<Literal> {
    let year = row.non_empty(YEAR_FIELD)?;
    let four_digits = YEAR.is_match(year);

    if let Some(month) = row.non_empty(MONTH_FIELD) {
        match month.parse::<u8>() {
            Ok(month @ 1..=12) if four_digits => {
                let lexical = format!("{}-{:02}", year, month);
                return Some(Literal::new_typed_literal(lexical, xsd::G_YEAR_MONTH));
            }
            _ => log::debug!("Cannot combine year {:?} with month {:?}", year, month),
        }
    }

    if four_digits {
        Some(Literal::new_typed_literal(year, xsd::G_YEAR))
    } else {
        Some(Literal::new_simple_literal(year))
    }
}
