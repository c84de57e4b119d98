//! Raw records exactly as the catalog service serializes them
//! (capitalized field names, `null` for empty collections), and their
//! translation into the canonical shapes in [`crate::models`].

use crate::models::AssetDetail;
use crate::models::AssetSummary;
use crate::models::Resource;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAssetDescription {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "Subclass")]
    pub subclass: String,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

impl From<WireAssetDescription> for AssetSummary {
    fn from(raw: WireAssetDescription) -> Self {
        Self {
            name: raw.name,
            class: raw.class,
            subclass: raw.subclass,
            description: raw.description.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireResource {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Class")]
    pub class: String,
    #[serde(rename = "URI")]
    pub uri: String,
}

impl From<WireResource> for Resource {
    fn from(raw: WireResource) -> Self {
        Self {
            name: raw.name,
            class: raw.class,
            uri: raw.uri,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireAssetData {
    #[serde(rename = "Data", alias = "Description", default)]
    pub data: Option<WireAssetDescription>,
    #[serde(rename = "Attributes", default)]
    pub attributes: Option<BTreeMap<String, String>>,
    #[serde(rename = "Version")]
    pub version: i64,
    #[serde(rename = "Thumbnail", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "Linked", default)]
    pub linked: Option<Vec<WireAssetDescription>>,
    #[serde(rename = "Resources", default)]
    pub resources: Option<Vec<WireResource>>,
}

impl TryFrom<WireAssetData> for AssetDetail {
    type Error = String;

    fn try_from(raw: WireAssetData) -> Result<Self, Self::Error> {
        let description = raw
            .data
            .ok_or_else(|| "asset record has no `Data` description".to_string())?;
        Ok(Self {
            description: description.into(),
            version: raw.version,
            thumbnail: raw.thumbnail.filter(|thumb| !thumb.is_empty()),
            attributes: raw.attributes.unwrap_or_default(),
            resources: raw
                .resources
                .unwrap_or_default()
                .into_iter()
                .map(Resource::from)
                .collect(),
            linked: raw
                .linked
                .unwrap_or_default()
                .into_iter()
                .map(AssetSummary::from)
                .collect(),
        })
    }
}

/// `suggest` answers with bare collection names or with full records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum WireSuggestion {
    Term(String),
    Record(WireAssetDescription),
}

impl WireSuggestion {
    pub fn into_term(self) -> String {
        match self {
            WireSuggestion::Term(term) => term,
            WireSuggestion::Record(record) => record.name,
        }
    }
}
