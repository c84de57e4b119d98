//! Windowed paging over a remote asset catalog.
//!
//! A [`QuerySession`] owns the active query and a single live cache of
//! fetched pages. Scrolling moves a `[first, last)` row window across that
//! cache; pages are fetched on demand through the injected
//! [`catalog_client::CatalogClient`] and evicted once they fall out of reach.

mod config;
mod detail;
mod page_cache;
mod session;
mod window;

pub use config::PagerConfig;
pub use detail::DetailBrowser;
pub use detail::NavigationStack;
pub use page_cache::PageCache;
pub use session::QuerySession;
pub use session::SessionSnapshot;
pub use window::ScrollDirection;
pub use window::ScrollPlan;
pub use window::Window;
pub use window::WindowController;
