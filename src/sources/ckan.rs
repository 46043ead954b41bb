//! CKAN catalog source.
//!
//! The catalog record comes from the `package_show` action of the CKAN action API and
//! the rows from the dataset's CSV resource.

use crate::core::DatasetDescriptor;
use crate::error::{Error, Result};
use crate::sources::{DataSource, RowStream};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::io::Cursor;
use std::time::Duration;

/// Envelope of every CKAN action API response
#[derive(Debug, Deserialize)]
struct ActionResponse {
    success: bool,
    #[serde(default)]
    result: Option<DatasetDescriptor>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

pub struct CkanSource {
    ckan_url: String,
    client: Client,
}

impl CkanSource {
    pub fn new(ckan_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(ckan_url, Duration::from_secs(60))
    }

    pub fn with_timeout(ckan_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut ckan_url = ckan_url.into();
        if !ckan_url.ends_with('/') {
            ckan_url.push('/');
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("cannot build HTTP client: {}", e)))?;
        Ok(Self { ckan_url, client })
    }

    pub fn package_show_url(&self) -> String {
        format!("{}api/3/action/package_show", self.ckan_url)
    }
}

#[async_trait]
impl DataSource for CkanSource {
    async fn fetch_catalog(&self, dataset_id: &str) -> Result<DatasetDescriptor> {
        log::info!("Fetching {} from CKAN at {}", dataset_id, self.ckan_url);

        let response = self
            .client
            .get(self.package_show_url())
            .query(&[("id", dataset_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Error::SourceFetch(format!(
                "package_show failed with status {}: {}",
                status, body
            )));
        }

        parse_package_show(&response.text().await?)
    }

    async fn open_rows(&self, descriptor: &DatasetDescriptor) -> Result<RowStream> {
        let url = descriptor.csv_url().ok_or_else(|| {
            Error::SourceFetch(format!("dataset {} has no CSV resource", descriptor.name))
        })?;
        log::info!("Fetching CSV from {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(Error::SourceFetch(format!(
                "CSV download failed with status {}",
                response.status()
            )));
        }
        let body = response.bytes().await?;
        Ok(RowStream::from_reader(Cursor::new(body)))
    }
}

/// Parse a `package_show` response. A bare package object is accepted as well.
pub fn parse_package_show(text: &str) -> Result<DatasetDescriptor> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    if value.get("success").is_none() {
        return Ok(serde_json::from_value(value)?);
    }

    let response: ActionResponse = serde_json::from_value(value)?;
    match response {
        ActionResponse { success: true, result: Some(descriptor), .. } => Ok(descriptor),
        ActionResponse { error, .. } => Err(Error::SourceFetch(format!(
            "package_show returned an error: {}",
            error.map(|e| e.to_string()).unwrap_or_else(|| "no result".to_string())
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success() {
        let text = r#"{"success": true, "result": {"name": "apbd", "title": "APBD"}}"#;
        let descriptor = parse_package_show(text).unwrap();
        assert_eq!(descriptor.name, "apbd");
        assert_eq!(descriptor.title, "APBD");
    }

    #[test]
    fn test_parse_failure() {
        let text = r#"{"success": false, "error": {"message": "Not found", "__type": "Not Found Error"}}"#;
        let err = parse_package_show(text).unwrap_err();
        assert!(err.to_string().contains("Not found"));
    }

    #[test]
    fn test_parse_bare_package() {
        let descriptor = parse_package_show(r#"{"name": "apbd", "title": "APBD"}"#).unwrap();
        assert_eq!(descriptor.title, "APBD");
    }

    #[test]
    fn test_package_show_url() {
        let source = CkanSource::new("http://data.ukp.go.id").unwrap();
        assert_eq!(source.package_show_url(), "http://data.ukp.go.id/api/3/action/package_show");
    }
}
