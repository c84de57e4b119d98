use crate::CatalogClient;
use crate::ClientConfig;
use anyhow::Result;
use anyhow::anyhow;
use async_trait::async_trait;
use catalog_protocol::AssetDetail;
use catalog_protocol::AssetKey;
use catalog_protocol::AssetSummary;
use catalog_protocol::CatalogError;
use catalog_protocol::Query;
use catalog_protocol::wire::WireAssetData;
use catalog_protocol::wire::WireAssetDescription;
use catalog_protocol::wire::WireSuggestion;
use percent_encoding::NON_ALPHANUMERIC;
use percent_encoding::utf8_percent_encode;
use reqwest::header::ACCEPT;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::de::DeserializeOwned;
use tracing::debug;

const OP_SUGGEST: &str = "suggest";
const OP_SEARCH: &str = "search";
const OP_FETCH: &str = "fetch";

/// [`CatalogClient`] backed by the catalog service's JSON HTTP API.
#[derive(Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    api_root: String,
    search_route: String,
}

impl HttpCatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate().map_err(|err| anyhow!(err))?;
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;
        Ok(Self {
            http,
            api_root: config.api_root(),
            search_route: config.search_route.trim_matches('/').to_string(),
        })
    }

    fn suggest_url(&self) -> String {
        format!("{}/{OP_SUGGEST}", self.api_root)
    }

    fn search_url(&self, query: &Query, page: usize) -> String {
        format!(
            "{}/{}/{page}/{}",
            self.api_root,
            self.search_route,
            encode_segments(query.terms().iter().map(String::as_str))
        )
    }

    fn fetch_url(&self, key: &AssetKey) -> String {
        format!(
            "{}/{OP_FETCH}/{}",
            self.api_root,
            encode_segments(key.segments())
        )
    }

    /// Transport or body-level failures are `FetchFailed`; a well-formed JSON
    /// body of the wrong shape is `MalformedResponse`.
    async fn get_json<T>(&self, operation: &'static str, url: String) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
    {
        debug!(operation, %url, "catalog request");
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| CatalogError::fetch_failed(operation, err))?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(CatalogError::fetch_failed(
                operation,
                format!("{status} - {}", body.trim()),
            ));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| CatalogError::fetch_failed(operation, err))?;
        let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|err| {
            CatalogError::fetch_failed(operation, format!("response is not JSON: {err}"))
        })?;
        serde_json::from_value(value).map_err(|err| CatalogError::malformed(operation, err))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn suggest(&self) -> Result<Vec<String>, CatalogError> {
        let raw: Vec<WireSuggestion> = self.get_json(OP_SUGGEST, self.suggest_url()).await?;
        Ok(raw.into_iter().map(WireSuggestion::into_term).collect())
    }

    async fn search(&self, query: &Query, page: usize) -> Result<Vec<AssetSummary>, CatalogError> {
        // The service answers `null` for a page past the end of the results.
        let raw: Option<Vec<WireAssetDescription>> =
            self.get_json(OP_SEARCH, self.search_url(query, page)).await?;
        let rows: Vec<AssetSummary> = raw
            .unwrap_or_default()
            .into_iter()
            .map(AssetSummary::from)
            .collect();
        debug!(%query, page, rows = rows.len(), "search page received");
        Ok(rows)
    }

    async fn fetch(&self, key: &AssetKey) -> Result<AssetDetail, CatalogError> {
        let raw: WireAssetData = self.get_json(OP_FETCH, self.fetch_url(key)).await?;
        AssetDetail::try_from(raw).map_err(|err| CatalogError::malformed(OP_FETCH, err))
    }
}

fn encode_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .map(|segment| utf8_percent_encode(segment, NON_ALPHANUMERIC).to_string())
        .collect::<Vec<_>>()
        .join("/")
}
