//! Shared vocabulary for the catalog browser: the canonical asset shapes,
//! the capitalized wire records the catalog service speaks, query
//! sanitation, and the error taxonomy every layer reports through.

mod error;
pub mod models;
pub mod query;
pub mod wire;

pub use error::CatalogError;
pub use models::AssetDetail;
pub use models::AssetKey;
pub use models::AssetSummary;
pub use models::Page;
pub use models::Resource;
pub use query::Query;
pub use query::sanitize;
