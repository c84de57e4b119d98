use catalog_protocol::AssetDetail;
use catalog_protocol::AssetSummary;
use catalog_protocol::CatalogError;
use catalog_protocol::Query;

/// Results of background work, delivered back to the event loop.
#[derive(Debug)]
pub(crate) enum AppEvent {
    /// First window of a freshly issued query.
    QueryLoaded {
        query: Query,
        rows: Vec<AssetSummary>,
    },

    /// The query could not be loaded; the table is empty now.
    QueryFailed(CatalogError),

    /// The window of `query` moved.
    Scrolled {
        query: Query,
        rows: Vec<AssetSummary>,
    },

    /// The window stayed where it was.
    ScrollFailed(CatalogError),

    DetailLoaded(AssetDetail),

    DetailFailed(CatalogError),
}
