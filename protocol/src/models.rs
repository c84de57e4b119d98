use std::collections::BTreeMap;
use std::fmt;

/// Short description of an asset, enough to identify it and fill one table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetSummary {
    pub name: String,
    pub class: String,
    pub subclass: String,
    pub description: String,
}

impl AssetSummary {
    pub fn key(&self) -> AssetKey {
        AssetKey {
            name: self.name.clone(),
            class: self.class.clone(),
            subclass: self.subclass.clone(),
        }
    }
}

/// Identity of an asset: `(name, class, subclass)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetKey {
    pub name: String,
    pub class: String,
    pub subclass: String,
}

impl AssetKey {
    pub fn segments(&self) -> [&str; 3] {
        [&self.name, &self.class, &self.subclass]
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.name, self.class, self.subclass)
    }
}

/// Something attached to an asset (a file, a link, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    pub class: String,
    pub uri: String,
}

/// Full record for one asset as shown in the detail panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetDetail {
    pub description: AssetSummary,
    pub version: i64,
    pub thumbnail: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub resources: Vec<Resource>,
    pub linked: Vec<AssetSummary>,
}

/// One chunk of query results as returned by a single search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub rows: Vec<AssetSummary>,
}

impl Page {
    pub fn new(index: usize, rows: Vec<AssetSummary>) -> Self {
        Self { index, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
