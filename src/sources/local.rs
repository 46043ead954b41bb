//! Source reading a catalog record and a CSV file from disk

use crate::core::DatasetDescriptor;
use crate::error::{Error, Result};
use crate::sources::ckan::parse_package_show;
use crate::sources::{DataSource, RowStream};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs::File;

pub struct LocalSource {
    /// `package_show` response or bare package JSON; without one the record only
    /// carries the dataset id
    descriptor_path: Option<PathBuf>,
    csv_path: PathBuf,
}

impl LocalSource {
    pub fn new(descriptor_path: Option<PathBuf>, csv_path: impl Into<PathBuf>) -> Self {
        Self { descriptor_path, csv_path: csv_path.into() }
    }
}

#[async_trait]
impl DataSource for LocalSource {
    async fn fetch_catalog(&self, dataset_id: &str) -> Result<DatasetDescriptor> {
        let Some(path) = &self.descriptor_path else {
            return Ok(DatasetDescriptor {
                name: dataset_id.to_string(),
                title: dataset_id.to_string(),
                ..DatasetDescriptor::default()
            });
        };
        log::info!("Reading catalog record from {}", path.display());
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::SourceFetch(format!("cannot read {}: {}", path.display(), e))
        })?;
        parse_package_show(&text)
    }

    async fn open_rows(&self, _descriptor: &DatasetDescriptor) -> Result<RowStream> {
        log::info!("Reading CSV from {}", self.csv_path.display());
        let file = File::open(&self.csv_path).await.map_err(|e| {
            Error::SourceFetch(format!("cannot open {}: {}", self.csv_path.display(), e))
        })?;
        Ok(RowStream::from_reader(file.into_std().await))
    }
}
