mod config;
mod http;

pub use config::ClientConfig;
pub use http::HttpCatalogClient;

use async_trait::async_trait;
use catalog_protocol::AssetDetail;
use catalog_protocol::AssetKey;
use catalog_protocol::AssetSummary;
use catalog_protocol::CatalogError;
use catalog_protocol::Query;

/// The remote catalog as seen by the browser.
///
/// Implementations translate each call into exactly one service request.
/// They do not cache and do not retry: a failure is reported once and the
/// caller decides what to do with it.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Seed terms to browse before the user has typed anything.
    async fn suggest(&self) -> Result<Vec<String>, CatalogError>;

    /// One page of assets matching `query`.
    async fn search(&self, query: &Query, page: usize) -> Result<Vec<AssetSummary>, CatalogError>;

    /// Full record for a single asset.
    async fn fetch(&self, key: &AssetKey) -> Result<AssetDetail, CatalogError>;
}
