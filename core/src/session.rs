//! The active query and its page cache.

use crate::PageCache;
use crate::PagerConfig;
use crate::ScrollDirection;
use crate::Window;
use crate::WindowController;
use catalog_client::CatalogClient;
use catalog_protocol::AssetSummary;
use catalog_protocol::CatalogError;
use catalog_protocol::Page;
use catalog_protocol::Query;
use catalog_protocol::sanitize;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tracing::debug;
use tracing::info;
use tracing::warn;

/// Everything that belongs to one issued query. Replaced wholesale when the
/// next query lands.
struct CacheState {
    query: Query,
    generation: u64,
    pages: PageCache,
    window: WindowController,
}

impl CacheState {
    /// Commits `window`, reads its rows, and drops every page the resulting
    /// window no longer reads from.
    fn settle(&mut self, window: Window) -> Vec<AssetSummary> {
        self.window.commit(window);
        let rows = self.window.current_rows(&self.pages);
        let keep = self.window.pages();
        for index in self.pages.indices() {
            if !keep.contains(&index) && self.pages.evict(index).is_some() {
                debug!(page = index, "page evicted");
            }
        }
        rows
    }
}

/// Consistent view of the session, read under a single lock.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub query: Option<Query>,
    pub rows: Vec<AssetSummary>,
    pub window: Window,
    pub page_size: Option<usize>,
    pub resident_pages: Vec<usize>,
}

/// Drives paging for the active query against a [`CatalogClient`].
///
/// The cache state sits behind a std mutex that is never held across a
/// fetch. Scroll transitions are serialized by `scroll_gate`; query
/// replacement does not wait for them and instead bumps `generation`, which
/// makes every in-flight completion of the old query report
/// [`CatalogError::QuerySuperseded`] without touching state.
pub struct QuerySession {
    client: Arc<dyn CatalogClient>,
    config: PagerConfig,
    generation: AtomicU64,
    state: Mutex<Option<CacheState>>,
    scroll_gate: tokio::sync::Mutex<()>,
}

impl QuerySession {
    pub fn new(client: Arc<dyn CatalogClient>, config: PagerConfig) -> Self {
        Self {
            client,
            config,
            generation: AtomicU64::new(0),
            state: Mutex::new(None),
            scroll_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Replaces the active query and returns the rows of its first window.
    ///
    /// A failed first page still discards the previous query's state.
    pub async fn issue(&self, query: Query) -> Result<Vec<AssetSummary>, CatalogError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        info!(%query, generation, "issuing query");
        let fetched = self.client.search(&query, 0).await;

        let mut state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(%query, generation, "first page arrived for a replaced query");
            return Err(CatalogError::QuerySuperseded);
        }
        let rows = match fetched {
            Ok(rows) => rows,
            Err(err) => {
                warn!(%query, "first page failed: {err}");
                *state = None;
                return Err(err);
            }
        };

        let page = Page::new(0, rows);
        let mut window = WindowController::new(&self.config, page.len());
        debug!(page_size = window.page_size(), window = %window.window(), "query seeded");
        let mut pages = PageCache::new();
        pages.put(page);
        let rows = window.current_rows(&pages);
        *state = Some(CacheState {
            query,
            generation,
            pages,
            window,
        });
        Ok(rows)
    }

    /// Sanitizes free text typed by the user and issues it.
    pub async fn issue_text(&self, raw: &str) -> Result<Vec<AssetSummary>, CatalogError> {
        let query = sanitize(raw)?;
        self.issue(query).await
    }

    /// Issues the first suggested term as the opening query. Returns
    /// `Ok(None)` when the service has no suggestions.
    pub async fn seed(&self) -> Result<Option<(Query, Vec<AssetSummary>)>, CatalogError> {
        let suggestions = self.client.suggest().await?;
        let Some(first) = suggestions.into_iter().next() else {
            debug!("no suggestions to seed from");
            return Ok(None);
        };
        let query = Query::from_terms([first])?;
        let rows = self.issue(query.clone()).await?;
        Ok(Some((query, rows)))
    }

    /// Moves the window one step and returns the rows it now covers.
    ///
    /// On a fetch failure the window stays where it was.
    pub async fn scroll(
        &self,
        direction: ScrollDirection,
    ) -> Result<Vec<AssetSummary>, CatalogError> {
        self.scroll_with_query(direction)
            .await
            .map(|(_, rows)| rows)
    }

    /// Like [`QuerySession::scroll`], also naming the query the rows belong
    /// to so callers can tell them apart from a newer query's.
    pub async fn scroll_with_query(
        &self,
        direction: ScrollDirection,
    ) -> Result<(Query, Vec<AssetSummary>), CatalogError> {
        let _gate = self.scroll_gate.lock().await;

        let (generation, query, plan, missing) = {
            let mut guard = self.lock();
            let Some(state) = guard.as_mut() else {
                return Err(CatalogError::NoActiveQuery);
            };
            if state.generation != self.generation.load(Ordering::SeqCst) {
                return Err(CatalogError::QuerySuperseded);
            }
            let plan = state.window.plan_scroll(direction);
            if let Some(evicted) = plan
                .droppable_page
                .and_then(|index| state.pages.evict(index))
            {
                debug!(page = evicted.index, "page evicted");
            }
            let missing: Vec<usize> = plan
                .pages()
                .filter(|index| !state.pages.contains(*index))
                .collect();
            if missing.is_empty() {
                let rows = state.settle(plan.candidate);
                return Ok((state.query.clone(), rows));
            }
            (state.generation, state.query.clone(), plan, missing)
        };

        // Pages are fetched in order; the first failure stops the rest.
        let mut fetched = Vec::with_capacity(missing.len());
        let mut failure = None;
        for index in missing {
            if self.generation.load(Ordering::SeqCst) != generation {
                break;
            }
            debug!(%query, page = index, "fetching page");
            match self.client.search(&query, index).await {
                Ok(rows) => fetched.push(Page::new(index, rows)),
                Err(err) => {
                    warn!(%query, page = index, "page fetch failed: {err}");
                    failure = Some(err);
                    break;
                }
            }
        }

        let mut guard = self.lock();
        let state = match guard.as_mut() {
            Some(state)
                if state.generation == generation
                    && self.generation.load(Ordering::SeqCst) == generation =>
            {
                state
            }
            _ => {
                debug!(%query, window = %plan.candidate, "dropping stale pages");
                return Err(CatalogError::QuerySuperseded);
            }
        };
        for page in fetched {
            state.pages.put(page);
        }
        if let Some(err) = failure {
            return Err(err);
        }
        let rows = state.settle(plan.candidate);
        Ok((query, rows))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let mut guard = self.lock();
        match guard.as_mut() {
            Some(state) => SessionSnapshot {
                query: Some(state.query.clone()),
                rows: state.window.current_rows(&state.pages),
                window: state.window.window(),
                page_size: Some(state.window.page_size()),
                resident_pages: state.pages.indices(),
            },
            None => SessionSnapshot::default(),
        }
    }

    pub fn current_rows(&self) -> Vec<AssetSummary> {
        let mut guard = self.lock();
        guard
            .as_mut()
            .map(|state| state.window.current_rows(&state.pages))
            .unwrap_or_default()
    }

    pub fn window(&self) -> Option<Window> {
        self.lock().as_ref().map(|state| state.window.window())
    }

    pub fn query(&self) -> Option<Query> {
        self.lock().as_ref().map(|state| state.query.clone())
    }

    pub fn resident_pages(&self) -> Vec<usize> {
        self.lock()
            .as_ref()
            .map(|state| state.pages.indices())
            .unwrap_or_default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<CacheState>> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
