//! URI construction.
//!
//! Every URI the encoders emit comes from here. Names taken from data (columns, area
//! codes, catalog names) are percent-encoded so that the result is always a valid IRI
//! as long as the configured roots are.

use crate::config::Configuration;
use crate::core::RowRecord;
use crate::error::Result;
use oxigraph::model::NamedNode;
use std::borrow::Cow;

pub fn base_namespace(config: &Configuration) -> Cow<'_, str> {
    match &config.base_namespace {
        Some(base) => Cow::Borrowed(base.as_str()),
        None => Cow::Owned(format!("{}dataset/{}#", config.ckan_url, config.dataset_id)),
    }
}

pub fn dsd_namespace(config: &Configuration) -> Cow<'_, str> {
    match &config.dsd_uri {
        Some(dsd) => Cow::Borrowed(dsd.as_str()),
        None => Cow::Owned(format!("{}dsd", base_namespace(config))),
    }
}

/// The `qb:DataSet` node is the base namespace itself
pub fn dataset_uri(config: &Configuration) -> Result<NamedNode> {
    Ok(NamedNode::new(base_namespace(config))?)
}

pub fn dsd_uri(config: &Configuration) -> Result<NamedNode> {
    Ok(NamedNode::new(dsd_namespace(config))?)
}

/// `{base}{column}`
pub fn predicate_uri(config: &Configuration, column: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{}{}", base_namespace(config), segment(column)))?)
}

/// `{dsd}-{column}`
pub fn component_uri(config: &Configuration, column: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{}-{}", dsd_namespace(config), segment(column)))?)
}

/// `{dsd}/{name}` for the shared refArea / refPeriod components. Column segments are
/// percent-encoded, so this never equals a `{dsd}-{column}` URI.
pub fn synthetic_component_uri(config: &Configuration, name: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{}/{}", dsd_namespace(config), name))?)
}

/// Observation subject for the row at 1-based stream position `index`
pub fn observation_uri(config: &Configuration, row: &RowRecord, index: u64) -> Result<NamedNode> {
    match &config.generate_observation_uri {
        Some(hook) => Ok(NamedNode::new(hook(row, index))?),
        None => Ok(NamedNode::new(format!("{}_{}", base_namespace(config), index))?),
    }
}

pub fn area_uri(config: &Configuration, code: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{}{}", config.area_namespace, segment(code.trim())))?)
}

pub fn organization_uri(config: &Configuration, name: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{}organization/{}", config.ckan_url, segment(name)))?)
}

pub fn group_uri(config: &Configuration, name: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{}group/{}", config.ckan_url, segment(name)))?)
}

pub fn tag_uri(config: &Configuration, name: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{}tag/{}", config.ckan_url, segment(name)))?)
}

/// `{base}extra-{slug}` for a free-form catalog extra
pub fn extra_uri(config: &Configuration, key: &str) -> Result<NamedNode> {
    Ok(NamedNode::new(format!("{}extra-{}", base_namespace(config), slugify(key)))?)
}

/// Lower-case ASCII slug: runs of anything but letters and digits become one `-`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "_".to_string()
    } else {
        slug.to_string()
    }
}

fn segment(name: &str) -> Cow<'_, str> {
    urlencoding::encode(name)
}
