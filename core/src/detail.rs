use catalog_client::CatalogClient;
use catalog_protocol::AssetDetail;
use catalog_protocol::AssetSummary;
use catalog_protocol::CatalogError;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use tracing::debug;
use tracing::warn;

/// Assets the user followed links away from, most recent last.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavigationStack {
    entries: Vec<AssetSummary>,
}

impl NavigationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, summary: AssetSummary) {
        self.entries.push(summary);
    }

    pub fn pop(&mut self) -> Option<AssetSummary> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&AssetSummary> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Default)]
struct DetailState {
    current: Option<AssetDetail>,
    history: NavigationStack,
}

/// Full-detail panel for one asset at a time, with link history.
///
/// Detail fetches bypass the page cache. Each request bumps a generation so
/// a slow response for an asset the user already moved away from is
/// dropped with [`CatalogError::QuerySuperseded`]. Failed fetches leave the
/// displayed asset and the history untouched.
pub struct DetailBrowser {
    client: Arc<dyn CatalogClient>,
    generation: AtomicU64,
    state: Mutex<DetailState>,
}

impl DetailBrowser {
    pub fn new(client: Arc<dyn CatalogClient>) -> Self {
        Self {
            client,
            generation: AtomicU64::new(0),
            state: Mutex::new(DetailState::default()),
        }
    }

    /// Displays `summary`, typically a row picked from the table.
    pub async fn show(&self, summary: &AssetSummary) -> Result<AssetDetail, CatalogError> {
        let (generation, detail) = self.fetch(summary).await;
        let mut state = self.settle(generation)?;
        let detail = detail?;
        state.current = Some(detail.clone());
        Ok(detail)
    }

    /// Displays `link`, remembering the current asset so [`Self::back`]
    /// can return to it.
    pub async fn follow_link(&self, link: &AssetSummary) -> Result<AssetDetail, CatalogError> {
        let (generation, detail) = self.fetch(link).await;
        let mut state = self.settle(generation)?;
        let detail = detail?;
        if let Some(previous) = state.current.take() {
            state.history.push(previous.description);
        }
        state.current = Some(detail.clone());
        Ok(detail)
    }

    /// Returns to the asset displayed before the last followed link.
    /// `Ok(None)` when there is nothing to go back to.
    pub async fn back(&self) -> Result<Option<AssetDetail>, CatalogError> {
        let Some(target) = self.lock().history.peek().cloned() else {
            return Ok(None);
        };
        let (generation, detail) = self.fetch(&target).await;
        let mut state = self.settle(generation)?;
        let detail = detail?;
        state.history.pop();
        state.current = Some(detail.clone());
        Ok(Some(detail))
    }

    pub fn can_go_back(&self) -> bool {
        !self.lock().history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.lock().history.len()
    }

    pub fn current(&self) -> Option<AssetDetail> {
        self.lock().current.clone()
    }

    async fn fetch(&self, summary: &AssetSummary) -> (u64, Result<AssetDetail, CatalogError>) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let key = summary.key();
        debug!(%key, generation, "fetching asset detail");
        let detail = self.client.fetch(&key).await;
        if let Err(err) = &detail {
            warn!(%key, "detail fetch failed: {err}");
        }
        (generation, detail)
    }

    /// Locks the state if `generation` is still the latest request.
    fn settle(&self, generation: u64) -> Result<MutexGuard<'_, DetailState>, CatalogError> {
        let state = self.lock();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "dropping superseded detail response");
            return Err(CatalogError::QuerySuperseded);
        }
        Ok(state)
    }

    fn lock(&self) -> MutexGuard<'_, DetailState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
