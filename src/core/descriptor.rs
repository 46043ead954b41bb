//! Catalog record of a dataset, in the shape returned by CKAN's `package_show` action.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetDescriptor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub notes: Option<String>,
    pub license_id: Option<String>,
    pub license_title: Option<String>,
    pub license_url: Option<String>,
    pub metadata_modified: Option<String>,
    pub organization: Option<Organization>,
    pub groups: Vec<Group>,
    pub tags: Vec<Tag>,
    pub extras: Vec<Extra>,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organization {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Group {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tag {
    pub name: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extra {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    pub url: String,
    pub format: Option<String>,
    pub name: Option<String>,
}

impl DatasetDescriptor {
    /// URL of the CSV resource: the first resource whose format is CSV, else the first resource
    pub fn csv_url(&self) -> Option<&str> {
        self.resources
            .iter()
            .find(|r| r.format.as_deref().is_some_and(|f| f.eq_ignore_ascii_case("csv")))
            .or_else(|| self.resources.first())
            .map(|r| r.url.as_str())
            .filter(|url| !url.is_empty())
    }
}
