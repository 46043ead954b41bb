//! Catalog and row sources.
//!
//! A [`DataSource`] supplies the two inputs of a run: the catalog record of the
//! dataset and the stream of its CSV rows.

use crate::core::DatasetDescriptor;
use crate::error::Result;
use async_trait::async_trait;

pub mod ckan;
pub mod csv_rows;
pub mod local;

pub use ckan::CkanSource;
pub use csv_rows::RowStream;
pub use local::LocalSource;

#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the catalog record of `dataset_id`
    async fn fetch_catalog(&self, dataset_id: &str) -> Result<DatasetDescriptor>;

    /// Open the row stream of the dataset's CSV resource
    async fn open_rows(&self, descriptor: &DatasetDescriptor) -> Result<RowStream>;
}

#[async_trait]
impl<S: DataSource + ?Sized> DataSource for Box<S> {
    async fn fetch_catalog(&self, dataset_id: &str) -> Result<DatasetDescriptor> {
        (**self).fetch_catalog(dataset_id).await
    }

    async fn open_rows(&self, descriptor: &DatasetDescriptor) -> Result<RowStream> {
        (**self).open_rows(descriptor).await
    }
}
