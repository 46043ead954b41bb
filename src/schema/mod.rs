//! Data Structure Definition inference.
//!
//! The DSD is derived from the column set of the first row(s) of a stream:
//!
//! 1. A synthetic `refArea` dimension takes order 0 when an area code column exists.
//! 2. A synthetic `refPeriod` dimension takes the next slot when a year column exists.
//!    The month column folds into the same dimension.
//! 3. Every other column that is not ignored becomes a measure when its sampled values
//!    are decimal and a dimension otherwise, in first-seen order.
//!
//! Inference only looks at the sample it is given, so a column that is numeric in the
//! sample but textual further down the stream is still classified as a measure.

use crate::config::Configuration;
use crate::core::{ColumnSpec, ComponentRole, RowRecord};
use crate::error::Result;
use crate::namespace;
use crate::typing::{humanize, value::is_decimal};
use crate::vocab::{bm, owl, qb, rdf, rdfs};
use oxigraph::model::{Literal, NamedNode, NamedNodeRef, Triple};

/// Municipality (kabupaten/kota) code column
pub const MUNICIPAL_CODE_FIELD: &str = "kode_kabkota";
/// Province code column
pub const PROVINCE_CODE_FIELD: &str = "kode_provinsi";
pub const YEAR_FIELD: &str = "tahun";
pub const MONTH_FIELD: &str = "bulan";

pub const REF_AREA_COMPONENT: &str = "refArea";
pub const REF_PERIOD_COMPONENT: &str = "refPeriod";

/// The inferred structure of one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataStructure {
    pub dsd_uri: NamedNode,
    /// Components sorted by `order`
    pub components: Vec<ColumnSpec>,
}

impl DataStructure {
    /// Structure of a run that does not generate a DSD
    pub fn empty(config: &Configuration) -> Result<Self> {
        Ok(Self { dsd_uri: namespace::dsd_uri(config)?, components: Vec::new() })
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn has_ref_area(&self) -> bool {
        self.find(REF_AREA_COMPONENT).is_some_and(|c| c.synthetic)
    }

    pub fn has_ref_period(&self) -> bool {
        self.find(REF_PERIOD_COMPONENT).is_some_and(|c| c.synthetic)
    }

    /// Component built from `column`
    pub fn column(&self, column: &str) -> Option<&ColumnSpec> {
        self.components.iter().find(|c| !c.synthetic && c.name == column)
    }

    fn find(&self, name: &str) -> Option<&ColumnSpec> {
        self.components.iter().find(|c| c.name == name)
    }

    pub fn dimensions(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.components.iter().filter(|c| c.role == ComponentRole::Dimension)
    }

    pub fn measures(&self) -> impl Iterator<Item = &ColumnSpec> {
        self.components.iter().filter(|c| c.role == ComponentRole::Measure)
    }

    /// Triples describing the DSD. Empty when no component was inferred.
    pub fn triples(&self) -> Vec<Triple> {
        if self.components.is_empty() {
            return Vec::new();
        }

        let mut triples = Vec::with_capacity(1 + self.components.len() * 7);
        triples.push(Triple::new(
            self.dsd_uri.clone(),
            rdf::TYPE,
            qb::DATA_STRUCTURE_DEFINITION.into_owned(),
        ));

        for spec in &self.components {
            let link = match spec.role {
                ComponentRole::Dimension => qb::DIMENSION,
                ComponentRole::Measure => qb::MEASURE,
            };
            triples.push(Triple::new(
                spec.component.clone(),
                rdf::TYPE,
                qb::COMPONENT_SPECIFICATION.into_owned(),
            ));
            triples.push(Triple::new(self.dsd_uri.clone(), qb::COMPONENT, spec.component.clone()));
            triples.push(Triple::new(spec.component.clone(), link, spec.predicate.clone()));
            triples.push(Triple::new(spec.component.clone(), qb::ORDER, Literal::from(spec.order)));

            // refArea / refPeriod are shared properties described by the ontology
            if spec.synthetic {
                continue;
            }
            let property_types = match spec.role {
                ComponentRole::Dimension => vec![qb::DIMENSION_PROPERTY],
                ComponentRole::Measure => vec![owl::DATATYPE_PROPERTY, qb::MEASURE_PROPERTY],
            };
            for class in property_types {
                triples.push(Triple::new(spec.predicate.clone(), rdf::TYPE, class.into_owned()));
            }
            triples.push(Triple::new(
                spec.predicate.clone(),
                rdfs::LABEL,
                Literal::new_simple_literal(&spec.label),
            ));
        }
        triples
    }
}

/// Infer the DSD from the first row of a stream
pub fn infer_schema(header_row: &RowRecord, config: &Configuration) -> Result<DataStructure> {
    infer_schema_from_sample(std::slice::from_ref(header_row), config)
}

/// Infer the DSD from the first rows of a stream. The first row fixes the column set.
///
/// A column is a measure when at least one sampled value is non-empty and every
/// non-empty sampled value is decimal. With a single row this is the plain
/// "probe value parses as a decimal" rule.
pub fn infer_schema_from_sample(
    sample: &[RowRecord],
    config: &Configuration,
) -> Result<DataStructure> {
    let mut structure = DataStructure::empty(config)?;
    let Some(first) = sample.first() else {
        return Ok(structure);
    };
    if !config.generate_dsd {
        return Ok(structure);
    }

    let mut order = 0u32;

    if first.contains(MUNICIPAL_CODE_FIELD) || first.contains(PROVINCE_CODE_FIELD) {
        structure.components.push(synthetic(config, REF_AREA_COMPONENT, bm::REF_AREA, order)?);
        order += 1;
    }
    if first.contains(YEAR_FIELD) {
        structure.components.push(synthetic(config, REF_PERIOD_COMPONENT, bm::REF_PERIOD, order)?);
        order += 1;
    }

    for column in first.columns() {
        if config.is_ignored(column) {
            continue;
        }
        // duplicate header names describe one component
        if structure.column(column).is_some() {
            continue;
        }
        structure.components.push(ColumnSpec {
            name: column.clone(),
            role: classify(sample, column),
            order,
            predicate: namespace::predicate_uri(config, column)?,
            component: namespace::component_uri(config, column)?,
            label: humanize(column),
            synthetic: false,
        });
        order += 1;
    }

    log::debug!(
        "Inferred {} components ({} measures) for {}",
        structure.components.len(),
        structure.measures().count(),
        structure.dsd_uri
    );
    Ok(structure)
}

fn classify(sample: &[RowRecord], column: &str) -> ComponentRole {
    let mut values = sample
        .iter()
        .filter_map(|row| row.get(column))
        .filter(|v| !v.trim().is_empty())
        .peekable();

    if values.peek().is_none() {
        return ComponentRole::Dimension;
    }
    if values.all(is_decimal) {
        ComponentRole::Measure
    } else {
        ComponentRole::Dimension
    }
}

fn synthetic(
    config: &Configuration,
    name: &str,
    predicate: NamedNodeRef<'_>,
    order: u32,
) -> Result<ColumnSpec> {
    Ok(ColumnSpec {
        name: name.to_string(),
        role: ComponentRole::Dimension,
        order,
        predicate: predicate.into_owned(),
        component: namespace::synthetic_component_uri(config, name)?,
        label: humanize(name),
        synthetic: true,
    })
}
