//! Pool manager: fetches pages and walks the cursor through them.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::instrument;
use whatmovie_api::backend::MovieApi;

use crate::controller::SelectionController;
use crate::criteria::{FilterCriteria, search_addon};
use crate::error::PickerError;
use crate::movie::normalize_movies;
use crate::pool::MoviePool;
use crate::selection::SelectionEvent;
use crate::state::PickerState;

/// Drives [`PickerState`] through fetches, cursor moves and filter changes.
///
/// The manager owns the receiving end of the selection event channel.
/// Events from the controller are applied on [`pump`](Self::pump), which
/// every top-level operation calls before returning; lookups that resolve
/// later are picked up by the next `pump` or by [`settle`](Self::settle).
#[derive(Debug)]
pub struct PoolManager<A> {
    /// Backend API.
    api: Arc<A>,
    /// Selection controller publishing into `events`.
    controller: SelectionController<A>,
    /// Receiving end of the selection event channel.
    events: UnboundedReceiver<SelectionEvent>,
}

impl<A> PoolManager<A>
where
    A: MovieApi + Send + Sync + 'static,
{
    /// Creates a manager over `api`.
    #[must_use]
    pub fn new(api: Arc<A>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller: SelectionController::new(Arc::clone(&api), tx),
            api,
            events: rx,
        }
    }

    /// Fetches the popular feed into a fresh pool and selects its first movie.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Transport`] if the request fails or the feed is
    /// empty. The error is also stored in `state`; the pool is left as it was.
    #[instrument(skip_all)]
    pub async fn load_popular(&mut self, state: &mut PickerState) -> Result<(), PickerError> {
        state.error = None;
        let response = match self.api.popular().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("popular fetch failed: {err:#}");
                return fail(state, PickerError::Transport);
            }
        };

        let Some(pool) = MoviePool::new(normalize_movies(&response.results)) else {
            tracing::warn!("popular feed returned no movies");
            return fail(state, PickerError::Transport);
        };
        state.pages.set_total(response.total_pages.unwrap_or(1));
        tracing::debug!(
            movies = pool.len(),
            total_pages = state.pages.total_pages(),
            "popular page loaded"
        );
        self.install(state, pool);
        Ok(())
    }

    /// Searches with `criteria` at the current page and selects the first hit.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::NoResults`] when the search matched nothing and
    /// [`PickerError::Transport`] when the request failed. The error is also
    /// stored in `state`; the pool is left as it was.
    #[instrument(skip_all, fields(page = state.pages.page()))]
    pub async fn load_filtered(
        &mut self,
        state: &mut PickerState,
        criteria: &FilterCriteria,
    ) -> Result<(), PickerError> {
        state.error = None;
        let addon = search_addon(criteria, state.pages.page());
        let response = match self.api.search(&addon).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(url_addon = %addon, "search failed: {err:#}");
                return fail(state, PickerError::Transport);
            }
        };

        let Some(pool) = MoviePool::new(normalize_movies(&response.results)) else {
            tracing::info!(url_addon = %addon, "search matched no movies");
            return fail(state, PickerError::NoResults);
        };
        state.pages.set_total(response.total_pages);
        tracing::debug!(
            movies = pool.len(),
            total_pages = state.pages.total_pages(),
            "search page loaded"
        );
        self.install(state, pool);
        Ok(())
    }

    /// Moves to the next movie on the current page and selects it.
    ///
    /// Selecting a movie clears any stored error.
    /// At the end of the page the pool is discarded and the page counter
    /// moves on (wrapping to 1 after the last page); nothing is selected
    /// and `false` is returned. Without a pool this is a no-op.
    pub fn advance(&mut self, state: &mut PickerState) -> bool {
        let Some(pool) = state.pool.as_mut() else {
            return false;
        };
        if pool.step() {
            state.error = None;
            let cursor = pool.cursor();
            self.controller.select(pool, cursor);
            self.pump(state);
            return true;
        }

        state.pool = None;
        state.pages.advance();
        tracing::debug!(next_page = state.pages.page(), "page exhausted");
        false
    }

    /// One press of "generate": always ends with a movie selected or an error.
    ///
    /// Advances through the current pool, fetching the next page with the
    /// stored criteria when there is no pool or the pool runs out.
    ///
    /// # Errors
    ///
    /// Same as [`load_filtered`](Self::load_filtered).
    pub async fn generate(&mut self, state: &mut PickerState) -> Result<(), PickerError> {
        if state.pool.is_some() && self.advance(state) {
            return Ok(());
        }
        let criteria = state.criteria.clone();
        self.load_filtered(state, &criteria).await
    }

    /// Applies a filter, fetching only if it differs from the stored one.
    ///
    /// Unchanged criteria with a pool re-select the movie under the current
    /// cursor. Otherwise the criteria are stored, the page goes back to 1
    /// and a fresh search runs.
    ///
    /// # Errors
    ///
    /// Same as [`load_filtered`](Self::load_filtered).
    #[instrument(skip_all, fields(criteria = %criteria))]
    pub async fn apply_filter(
        &mut self,
        state: &mut PickerState,
        criteria: FilterCriteria,
    ) -> Result<(), PickerError> {
        if let Some(pool) = state.pool.as_ref().filter(|_| state.criteria == criteria) {
            tracing::debug!(cursor = pool.cursor(), "criteria unchanged; re-selecting");
            state.error = None;
            self.controller.select(pool, pool.cursor());
            self.pump(state);
            return Ok(());
        }

        state.criteria = criteria;
        state.pool = None;
        state.pages.reset();
        let criteria = state.criteria.clone();
        self.load_filtered(state, &criteria).await
    }

    /// Applies every selection event received so far. Returns how many.
    pub fn pump(&mut self, state: &mut PickerState) -> usize {
        let mut applied: usize = 0;
        while let Ok(event) = self.events.try_recv() {
            state.apply(event);
            applied = applied.saturating_add(1);
        }
        applied
    }

    /// Waits for outstanding lookups and applies their results.
    pub async fn settle(&mut self, state: &mut PickerState) {
        self.controller.settle().await;
        self.pump(state);
    }

    /// Returns `true` while runtime or trailer lookups are in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.controller.pending() > 0
    }

    /// Replaces the pool and selects its first movie.
    fn install(&mut self, state: &mut PickerState, pool: MoviePool) {
        state.error = None;
        let pool = state.pool.insert(pool);
        self.controller.select(pool, 0);
        self.pump(state);
    }
}

/// Records `error` in the state and returns it.
fn fail(state: &mut PickerState, error: PickerError) -> Result<(), PickerError> {
    state.error = Some(error);
    Err(error)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use whatmovie_api::backend::{PopularResponse, SearchResponse, TrailerResponse};

    use super::*;
    use crate::testing::MockApi;

    fn manager(api: MockApi) -> (Arc<MockApi>, PoolManager<MockApi>) {
        let api = Arc::new(api);
        let manager = PoolManager::new(Arc::clone(&api));
        (api, manager)
    }

    fn selected_id(state: &PickerState) -> u64 {
        state.selection().movie.as_ref().unwrap().id
    }

    #[tokio::test]
    async fn test_load_popular_selects_first_movie() {
        // Arrange
        let (api, mut manager) = manager(MockApi::healthy(20, 1));
        let mut state = PickerState::default();

        // Act
        manager.load_popular(&mut state).await.unwrap();
        manager.settle(&mut state).await;

        // Assert
        assert_eq!(state.pool().unwrap().len(), 20);
        assert_eq!(state.cursor(), 0);
        assert_eq!(selected_id(&state), 1);
        assert_eq!(state.selection().runtime_minutes, Some(120));
        assert_eq!(state.selection().trailer_key.as_deref(), Some("trailer-key"));
        assert_eq!(state.pages().total_pages(), 1);
        assert_eq!(api.fetches(), vec![String::from("popular")]);
    }

    #[tokio::test]
    async fn test_three_advances_walk_pool_without_refetch() {
        // Arrange
        let (api, mut manager) = manager(MockApi::healthy(20, 1));
        let mut state = PickerState::default();
        manager.load_popular(&mut state).await.unwrap();

        // Act
        let mut seen = Vec::new();
        for _ in 0..3 {
            assert!(manager.advance(&mut state));
            seen.push(selected_id(&state));
        }
        manager.settle(&mut state).await;

        // Assert
        assert_eq!(seen, vec![2, 3, 4]);
        assert_eq!(state.cursor(), 3);
        assert_eq!(api.fetches(), vec![String::from("popular")]);
    }

    #[tokio::test]
    async fn test_advance_past_last_movie_moves_to_next_page() {
        // Arrange
        let (_, mut manager) = manager(MockApi::healthy(3, 5));
        let mut state = PickerState::default();
        manager.generate(&mut state).await.unwrap();
        manager.advance(&mut state);
        manager.advance(&mut state);
        assert_eq!(state.cursor(), 2);

        // Act
        let selected = manager.advance(&mut state);

        // Assert
        assert!(!selected);
        assert!(state.pool().is_none());
        assert_eq!(state.cursor(), 0);
        assert_eq!(state.pages().page(), 2);
    }

    #[tokio::test]
    async fn test_advance_past_last_page_wraps_to_first() {
        // Arrange
        let (_, mut manager) = manager(MockApi::healthy(1, 1));
        let mut state = PickerState::default();
        manager.generate(&mut state).await.unwrap();

        // Act
        let selected = manager.advance(&mut state);

        // Assert
        assert!(!selected);
        assert!(state.pool().is_none());
        assert_eq!(state.pages().page(), 1);
    }

    #[tokio::test]
    async fn test_advance_without_pool_is_noop() {
        // Arrange
        let (api, mut manager) = manager(MockApi::healthy(3, 1));
        let mut state = PickerState::default();

        // Act
        let selected = manager.advance(&mut state);

        // Assert
        assert!(!selected);
        assert_eq!(state.pages().page(), 1);
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_generate_fetches_next_page_when_exhausted() {
        // Arrange
        let (api, mut manager) = manager(MockApi::healthy(2, 3));
        let mut state = PickerState::new("genres=18".parse().unwrap());

        // Act
        manager.generate(&mut state).await.unwrap();
        manager.generate(&mut state).await.unwrap();
        manager.generate(&mut state).await.unwrap();
        manager.settle(&mut state).await;

        // Assert
        assert_eq!(
            api.fetches(),
            vec![
                String::from("search:&with_genres=18"),
                String::from("search:&with_genres=18&page=2"),
            ]
        );
        assert_eq!(state.pages().page(), 2);
        assert_eq!(state.cursor(), 0);
        assert_eq!(selected_id(&state), 101);
    }

    #[tokio::test]
    async fn test_unchanged_filter_reselects_without_fetch() {
        // Arrange
        let (api, mut manager) = manager(MockApi::healthy(5, 1));
        let mut state = PickerState::default();
        let criteria: FilterCriteria = "from=1990 rating=7.5".parse().unwrap();
        manager.apply_filter(&mut state, criteria.clone()).await.unwrap();
        manager.advance(&mut state);
        manager.settle(&mut state).await;

        // Act
        manager.apply_filter(&mut state, criteria).await.unwrap();
        manager.settle(&mut state).await;

        // Assert
        assert_eq!(api.fetches().len(), 1);
        assert_eq!(state.cursor(), 1);
        assert_eq!(selected_id(&state), 102);
    }

    #[tokio::test]
    async fn test_changed_filter_resets_page_and_refetches() {
        // Arrange
        let (api, mut manager) = manager(MockApi::healthy(1, 4));
        let mut state = PickerState::default();
        manager
            .apply_filter(&mut state, "genres=28".parse().unwrap())
            .await
            .unwrap();
        manager.generate(&mut state).await.unwrap();
        assert_eq!(state.pages().page(), 2);

        // Act
        manager
            .apply_filter(&mut state, "genres=35".parse().unwrap())
            .await
            .unwrap();

        // Assert
        assert_eq!(state.pages().page(), 1);
        assert_eq!(
            api.fetches(),
            vec![
                String::from("search:&with_genres=28"),
                String::from("search:&with_genres=28&page=2"),
                String::from("search:&with_genres=35"),
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_filtered_search_is_no_results() {
        // Arrange
        let (api, mut manager) = manager(MockApi {
            search: Some(SearchResponse {
                results: Vec::new(),
                total_pages: 0,
            }),
            ..MockApi::healthy(1, 1)
        });
        let mut state = PickerState::default();

        // Act
        let result = manager
            .apply_filter(&mut state, "rating=7.5".parse().unwrap())
            .await;

        // Assert
        assert_eq!(result, Err(PickerError::NoResults));
        assert_eq!(state.error(), Some(PickerError::NoResults));
        assert_eq!(
            state.error().unwrap().to_string(),
            "Sorry, no movies were found."
        );
        assert_eq!(
            api.fetches(),
            vec![String::from("search:&vote_average.gte=7.5")]
        );
    }

    #[tokio::test]
    async fn test_failed_search_is_transport_and_keeps_pool() {
        // Arrange
        let (api, mut manager) = manager(MockApi::healthy(3, 1));
        let mut state = PickerState::default();
        manager.load_popular(&mut state).await.unwrap();
        let api_failing = Arc::new(MockApi {
            search: None,
            ..MockApi::healthy(3, 1)
        });
        let mut failing = PoolManager::new(Arc::clone(&api_failing));

        // Act
        let result = failing
            .load_filtered(&mut state, &FilterCriteria::default())
            .await;

        // Assert
        assert_eq!(result, Err(PickerError::Transport));
        assert_eq!(state.error(), Some(PickerError::Transport));
        assert_eq!(state.pool().unwrap().len(), 3);
        assert_eq!(api.fetches().len(), 1);
    }

    #[tokio::test]
    async fn test_next_movie_clears_stale_error() {
        // Arrange
        let api = Arc::new(MockApi {
            search: None,
            ..MockApi::healthy(3, 1)
        });
        let mut manager = PoolManager::new(Arc::clone(&api));
        let mut state = PickerState::default();
        manager.load_popular(&mut state).await.unwrap();
        let _ = manager
            .load_filtered(&mut state, &FilterCriteria::default())
            .await;
        assert_eq!(state.error(), Some(PickerError::Transport));

        // Act
        let result = manager.generate(&mut state).await;

        // Assert
        assert_eq!(result, Ok(()));
        assert_eq!(selected_id(&state), 2);
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_reselect_on_unchanged_filter_clears_error() {
        // Arrange
        let api = Arc::new(MockApi {
            search: None,
            ..MockApi::healthy(3, 1)
        });
        let mut manager = PoolManager::new(Arc::clone(&api));
        let mut state = PickerState::default();
        manager.load_popular(&mut state).await.unwrap();
        let _ = manager
            .load_filtered(&mut state, &FilterCriteria::default())
            .await;

        // Act
        let result = manager
            .apply_filter(&mut state, FilterCriteria::default())
            .await;

        // Assert
        assert_eq!(result, Ok(()));
        assert_eq!(selected_id(&state), 1);
        assert_eq!(state.error(), None);
        assert_eq!(
            api.fetches(),
            vec![String::from("popular"), String::from("search:")]
        );
    }

    #[tokio::test]
    async fn test_empty_popular_feed_is_transport() {
        // Arrange
        let (_, mut manager) = manager(MockApi {
            popular: Some(PopularResponse {
                results: Vec::new(),
                total_pages: None,
            }),
            ..MockApi::healthy(1, 1)
        });
        let mut state = PickerState::default();

        // Act
        let result = manager.load_popular(&mut state).await;

        // Assert
        assert_eq!(result, Err(PickerError::Transport));
        assert!(state.pool().is_none());
        assert!(state.selection().movie.is_none());
    }

    #[tokio::test]
    async fn test_popular_records_total_pages() {
        // Arrange
        let (_, mut manager) = manager(MockApi {
            popular: Some(PopularResponse {
                results: crate::testing::provider_movies(1, 2),
                total_pages: Some(500),
            }),
            ..MockApi::healthy(1, 1)
        });
        let mut state = PickerState::default();

        // Act
        manager.load_popular(&mut state).await.unwrap();

        // Assert
        assert_eq!(state.pages().total_pages(), 500);
    }

    #[tokio::test]
    async fn test_error_cleared_by_next_fetch() {
        // Arrange
        let (_, mut manager) = manager(MockApi {
            popular: None,
            ..MockApi::healthy(2, 1)
        });
        let mut state = PickerState::default();
        let _ = manager.load_popular(&mut state).await;
        assert_eq!(state.error(), Some(PickerError::Transport));

        // Act
        manager.generate(&mut state).await.unwrap();

        // Assert
        assert!(state.error().is_none());
        assert_eq!(selected_id(&state), 101);
    }

    #[tokio::test]
    async fn test_empty_trailer_leaves_movie_and_runtime() {
        // Arrange
        let (_, mut manager) = manager(MockApi {
            trailer: Some(TrailerResponse {
                results: Vec::new(),
            }),
            ..MockApi::healthy(2, 1)
        });
        let mut state = PickerState::default();

        // Act
        manager.load_popular(&mut state).await.unwrap();
        manager.settle(&mut state).await;

        // Assert
        assert_eq!(selected_id(&state), 1);
        assert_eq!(state.selection().runtime_minutes, Some(120));
        assert!(state.selection().trailer_key.is_none());
        assert!(state.error().is_none());
    }

    #[tokio::test]
    async fn test_runtime_failure_is_absent_without_error() {
        // Arrange
        let (_, mut manager) = manager(MockApi {
            runtime: None,
            ..MockApi::healthy(2, 1)
        });
        let mut state = PickerState::default();

        // Act
        manager.load_popular(&mut state).await.unwrap();
        manager.settle(&mut state).await;

        // Assert
        assert_eq!(selected_id(&state), 1);
        assert!(state.selection().runtime_minutes.is_none());
        assert_eq!(state.selection().trailer_key.as_deref(), Some("trailer-key"));
        assert!(state.error().is_none());
        assert!(!manager.is_busy());
    }
}
