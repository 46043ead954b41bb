//! Dataset-level triples built from the catalog record.
//!
//! Organization, group, tag and extra nodes are keyed by URIs derived from catalog
//! names, so encoding the same record twice yields the same triples.

use crate::config::Configuration;
use crate::core::DatasetDescriptor;
use crate::error::Result;
use crate::namespace;
use crate::vocab::{bm, dcterms, foaf, qb, rdf, rdfs, xsd};
use oxigraph::model::{Literal, NamedNode, NamedNodeRef, Term, Triple};
use regex::Regex;
use std::sync::LazyLock;

static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d+)?(Z|[+-]\d{2}:\d{2})?$")
        .expect("dateTime pattern is valid")
});

/// Extra keys whose URL value also becomes an `rdfs:seeAlso` link
const REFERENCE_KEYS: &[&str] = &["reference", "referensi"];

pub fn encode_metadata(
    descriptor: &DatasetDescriptor,
    config: &Configuration,
) -> Result<Vec<Triple>> {
    let dataset = namespace::dataset_uri(config)?;
    let mut triples = Vec::new();

    push(&mut triples, &dataset, rdf::TYPE, qb::DATA_SET.into_owned());
    push(&mut triples, &dataset, rdfs::LABEL, Literal::new_simple_literal(&descriptor.title));
    if let Some(notes) = non_blank(descriptor.notes.as_deref()) {
        push(&mut triples, &dataset, rdfs::COMMENT, Literal::new_simple_literal(notes));
    }
    push(&mut triples, &dataset, qb::STRUCTURE, namespace::dsd_uri(config)?);

    let identifier =
        if descriptor.name.is_empty() { &config.dataset_id } else { &descriptor.name };
    push(&mut triples, &dataset, dcterms::IDENTIFIER, Literal::new_simple_literal(identifier));

    if let Some(modified) = non_blank(descriptor.metadata_modified.as_deref()) {
        push(&mut triples, &dataset, dcterms::MODIFIED, date_time(modified));
    }
    if let Some(license) = license(descriptor) {
        push(&mut triples, &dataset, dcterms::LICENSE, license);
    }

    if let Some(org) = descriptor.organization.as_ref().filter(|o| !o.name.is_empty()) {
        let node = namespace::organization_uri(config, &org.name)?;
        push(&mut triples, &dataset, dcterms::PUBLISHER, node.clone());
        push(&mut triples, &node, rdf::TYPE, foaf::ORGANIZATION.into_owned());
        let label = label_of(&org.title, &org.name);
        push(&mut triples, &node, rdfs::LABEL, Literal::new_simple_literal(label));
        if let Some(description) = non_blank(org.description.as_deref()) {
            push(&mut triples, &node, rdfs::COMMENT, Literal::new_simple_literal(description));
        }
    }

    for group in descriptor.groups.iter().filter(|g| !g.name.is_empty()) {
        let node = namespace::group_uri(config, &group.name)?;
        push(&mut triples, &dataset, dcterms::SUBJECT, node.clone());
        let label = label_of(&group.title, &group.name);
        push(&mut triples, &node, rdfs::LABEL, Literal::new_simple_literal(label));
        if let Some(description) = non_blank(group.description.as_deref()) {
            push(&mut triples, &node, rdfs::COMMENT, Literal::new_simple_literal(description));
        }
    }

    for tag in descriptor.tags.iter().filter(|t| !t.name.is_empty()) {
        let node = namespace::tag_uri(config, &tag.name)?;
        let label = label_of(tag.display_name.as_deref().unwrap_or_default(), &tag.name);
        push(&mut triples, &dataset, dcterms::SUBJECT, node.clone());
        push(&mut triples, &node, rdfs::LABEL, Literal::new_simple_literal(label));
    }

    for extra in &descriptor.extras {
        let node = namespace::extra_uri(config, &extra.key)?;
        push(&mut triples, &dataset, bm::EXTRA, node.clone());
        push(&mut triples, &node, rdfs::LABEL, Literal::new_simple_literal(&extra.key));
        push(&mut triples, &node, rdf::VALUE, Literal::new_simple_literal(&extra.value));

        if REFERENCE_KEYS.contains(&namespace::slugify(&extra.key).as_str()) {
            if let Some(url) = http_url(&extra.value) {
                push(&mut triples, &dataset, rdfs::SEE_ALSO, url);
            }
        }
    }

    Ok(triples)
}

fn push(
    triples: &mut Vec<Triple>,
    subject: &NamedNode,
    predicate: NamedNodeRef<'_>,
    object: impl Into<Term>,
) {
    triples.push(Triple::new(subject.clone(), predicate, object));
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn label_of<'a>(title: &'a str, name: &'a str) -> &'a str {
    if title.trim().is_empty() {
        name
    } else {
        title
    }
}

/// CKAN timestamps carry no time zone, which `xsd:dateTime` allows
fn date_time(value: &str) -> Literal {
    if DATE_TIME.is_match(value) {
        Literal::new_typed_literal(value, xsd::DATE_TIME)
    } else {
        log::warn!("Modified date {:?} is not an ISO timestamp, kept as text", value);
        Literal::new_simple_literal(value)
    }
}

/// License URL as an IRI when it is one, else the license title
fn license(descriptor: &DatasetDescriptor) -> Option<Term> {
    if let Some(url) = non_blank(descriptor.license_url.as_deref()).and_then(http_url) {
        return Some(url.into());
    }
    non_blank(descriptor.license_title.as_deref())
        .or_else(|| non_blank(descriptor.license_id.as_deref()))
        .map(|title| Literal::new_simple_literal(title).into())
}

fn http_url(value: &str) -> Option<NamedNode> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        NamedNode::new(value).ok()
    } else {
        None
    }
}
