//! Run configuration.
//!
//! A [`Configuration`] is built once per run, either in code through the `with_*`
//! builders or from a JSON [`ConfigFile`], and is only read afterwards.

use crate::core::RowRecord;
use crate::error::{Error, Result};
use crate::namespace;
use crate::vocab::BPS_PLACE_NAMESPACE;
use oxigraph::model::{NamedNode, Term};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// CKAN instance used when no catalog URL is configured
pub const DEFAULT_CKAN_URL: &str = "http://data.ukp.go.id/";

/// Structural columns that never become DSD components or observation values.
/// Area and period columns still drive refArea / refPeriod.
pub const DEFAULT_IGNORED_FIELDS: &[&str] = &[
    "kode_provinsi",
    "nama_provinsi",
    "kode_kabkota",
    "nama_kabkota",
    "koordinat_provinsi",
    "koordinat_kabkota",
    "tahun",
    "bulan",
    "latitude",
    "longitude",
    "",
];

/// Builds the observation subject URI for a row and its 1-based stream index
pub type ObservationUriFn = Arc<dyn Fn(&RowRecord, u64) -> String + Send + Sync>;

/// Replaces default value typing: `(column, raw value) -> object term`
pub type TransformValueFn = Arc<dyn Fn(&str, &str) -> Term + Send + Sync>;

#[derive(Clone)]
pub struct Configuration {
    pub dataset_id: String,
    /// Root of the CKAN instance, with a trailing slash
    pub ckan_url: String,
    /// Defaults to `{ckan_url}dataset/{dataset_id}#`
    pub base_namespace: Option<String>,
    /// Defaults to `{base_namespace}dsd`
    pub dsd_uri: Option<String>,
    pub area_namespace: String,
    pub ignored_fields: BTreeSet<String>,
    pub generate_dsd: bool,
    /// Rows sampled before the DSD is inferred
    pub inference_sample_rows: usize,
    pub generate_observation_uri: Option<ObservationUriFn>,
    pub transform_value: Option<TransformValueFn>,
}

impl Configuration {
    pub fn new(dataset_id: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            ckan_url: DEFAULT_CKAN_URL.to_string(),
            base_namespace: None,
            dsd_uri: None,
            area_namespace: BPS_PLACE_NAMESPACE.to_string(),
            ignored_fields: DEFAULT_IGNORED_FIELDS.iter().map(|f| (*f).to_string()).collect(),
            generate_dsd: true,
            inference_sample_rows: 1,
            generate_observation_uri: None,
            transform_value: None,
        }
    }

    pub fn with_ckan_url(mut self, url: impl Into<String>) -> Self {
        let mut url = url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.ckan_url = url;
        self
    }

    pub fn with_base_namespace(mut self, base: impl Into<String>) -> Self {
        self.base_namespace = Some(base.into());
        self
    }

    pub fn with_dsd_uri(mut self, dsd: impl Into<String>) -> Self {
        self.dsd_uri = Some(dsd.into());
        self
    }

    pub fn with_area_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.area_namespace = namespace.into();
        self
    }

    pub fn with_ignored_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_generate_dsd(mut self, generate: bool) -> Self {
        self.generate_dsd = generate;
        self
    }

    pub fn with_inference_sample_rows(mut self, rows: usize) -> Self {
        self.inference_sample_rows = rows;
        self
    }

    pub fn with_observation_uri<F>(mut self, hook: F) -> Self
    where
        F: Fn(&RowRecord, u64) -> String + Send + Sync + 'static,
    {
        self.generate_observation_uri = Some(Arc::new(hook));
        self
    }

    pub fn with_transform_value<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &str) -> Term + Send + Sync + 'static,
    {
        self.transform_value = Some(Arc::new(hook));
        self
    }

    pub fn is_ignored(&self, column: &str) -> bool {
        self.ignored_fields.contains(column)
    }

    /// Check the configuration before any I/O happens
    pub fn validate(&self) -> Result<()> {
        if self.dataset_id.trim().is_empty() {
            return Err(Error::Config("No dataset was specified.".to_string()));
        }
        if self.inference_sample_rows == 0 {
            return Err(Error::Config("inference_sample_rows must be at least 1".to_string()));
        }
        namespace::dataset_uri(self).map_err(|e| Error::Config(e.to_string()))?;
        namespace::dsd_uri(self).map_err(|e| Error::Config(e.to_string()))?;
        NamedNode::new(self.area_namespace.as_str())
            .map_err(|e| Error::Config(format!("invalid area namespace: {}", e)))?;
        Ok(())
    }

    /// Validate and return the configuration
    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("dataset_id", &self.dataset_id)
            .field("ckan_url", &self.ckan_url)
            .field("base_namespace", &namespace::base_namespace(self))
            .field("dsd_uri", &namespace::dsd_namespace(self))
            .field("area_namespace", &self.area_namespace)
            .field("ignored_fields", &self.ignored_fields)
            .field("generate_dsd", &self.generate_dsd)
            .field("inference_sample_rows", &self.inference_sample_rows)
            .field("generate_observation_uri", &self.generate_observation_uri.is_some())
            .field("transform_value", &self.transform_value.is_some())
            .finish()
    }
}

/// JSON file representation of a [`Configuration`]. Every key is optional
/// so that command-line flags can fill in or override values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConfigFile {
    pub dataset_id: Option<String>,
    #[serde(alias = "ckanURL")]
    pub ckan_url: Option<String>,
    #[serde(alias = "base")]
    pub base_namespace: Option<String>,
    #[serde(alias = "dsd")]
    pub dsd_uri: Option<String>,
    pub area_namespace: Option<String>,
    pub ignored_fields: Option<Vec<String>>,
    #[serde(rename = "generateDSD", alias = "generateDsd")]
    pub generate_dsd: Option<bool>,
    pub inference_sample_rows: Option<usize>,
}

impl ConfigFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Turn the file into a configuration; `dataset_id` overrides the file's value
    pub fn into_configuration(self, dataset_id: Option<String>) -> Result<Configuration> {
        let dataset_id = dataset_id
            .or(self.dataset_id)
            .ok_or_else(|| Error::Config("No dataset was specified.".to_string()))?;

        let mut config = Configuration::new(dataset_id);
        if let Some(url) = self.ckan_url {
            config = config.with_ckan_url(url);
        }
        config.base_namespace = self.base_namespace;
        config.dsd_uri = self.dsd_uri;
        if let Some(area) = self.area_namespace {
            config.area_namespace = area;
        }
        if let Some(fields) = self.ignored_fields {
            config = config.with_ignored_fields(fields);
        }
        if let Some(generate) = self.generate_dsd {
            config.generate_dsd = generate;
        }
        if let Some(rows) = self.inference_sample_rows {
            config.inference_sample_rows = rows;
        }
        Ok(config)
    }
}
