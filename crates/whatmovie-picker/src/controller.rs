//! Selection controller.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::instrument;
use whatmovie_api::backend::MovieApi;

use crate::pool::MoviePool;
use crate::selection::SelectionEvent;

/// Picks a movie out of the pool and enriches it with runtime and trailer.
///
/// Every update leaves through the event channel; the owner of the
/// [`PickerState`](crate::PickerState) drains it and applies the events.
/// Lookups run as tasks on the current runtime and are never cancelled, so
/// a slow lookup for an earlier movie may still land after a newer pick.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SelectionController<A> {
    /// Backend API.
    api: Arc<A>,
    /// Sender for selection events.
    events: UnboundedSender<SelectionEvent>,
    /// Lookup tasks not yet awaited.
    pending: Vec<JoinHandle<()>>,
}

impl<A> SelectionController<A>
where
    A: MovieApi + Send + Sync + 'static,
{
    /// Creates a controller publishing to `events`.
    #[must_use]
    pub const fn new(api: Arc<A>, events: UnboundedSender<SelectionEvent>) -> Self {
        Self {
            api,
            events,
            pending: Vec::new(),
        }
    }

    /// Selects `pool[index]` and fires both lookups concurrently.
    ///
    /// `NewMovie` is published before either lookup starts. Returns `false`
    /// if `index` is out of range.
    pub fn select(&mut self, pool: &MoviePool, index: usize) -> bool {
        let Some(movie) = pool.get(index) else {
            tracing::warn!(index, len = pool.len(), "selection index out of range");
            return false;
        };
        let movie_id = movie.id;
        tracing::debug!(movie_id, index, title = %movie.title, "movie selected");
        publish(&self.events, SelectionEvent::NewMovie(movie.clone()));
        self.spawn_lookups(movie_id);
        true
    }

    /// Spawns the runtime and trailer lookups for `movie_id`.
    fn spawn_lookups(&mut self, movie_id: u64) {
        self.pending.retain(|handle| !handle.is_finished());

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        self.pending.push(tokio::spawn(async move {
            let event = fetch_runtime(api.as_ref(), movie_id).await;
            publish(&events, event);
        }));

        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        self.pending.push(tokio::spawn(async move {
            let event = fetch_trailer(api.as_ref(), movie_id).await;
            publish(&events, event);
        }));
    }

    /// Returns the number of lookup tasks still running.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    /// Waits for every lookup spawned so far.
    pub async fn settle(&mut self) {
        let handles: Vec<_> = self.pending.drain(..).collect();
        for result in futures::future::join_all(handles).await {
            if let Err(err) = result {
                tracing::warn!("lookup task failed: {err}");
            }
        }
    }
}

/// Sends an event, tolerating a dropped receiver.
fn publish(events: &UnboundedSender<SelectionEvent>, event: SelectionEvent) {
    if events.send(event).is_err() {
        tracing::debug!("selection receiver dropped; event discarded");
    }
}

/// Looks up the runtime of a movie.
///
/// Never fails: any error becomes `NewRuntime(None)`.
#[instrument(skip(api))]
pub async fn fetch_runtime<A: MovieApi>(api: &A, movie_id: u64) -> SelectionEvent {
    match api.runtime(movie_id).await {
        Ok(response) => SelectionEvent::NewRuntime(response.runtime),
        Err(err) => {
            tracing::warn!("runtime lookup failed: {err:#}");
            SelectionEvent::NewRuntime(None)
        }
    }
}

/// Looks up the first trailer key of a movie.
///
/// Never fails: errors and empty lists become `NewTrailer(None)`.
#[instrument(skip(api))]
pub async fn fetch_trailer<A: MovieApi>(api: &A, movie_id: u64) -> SelectionEvent {
    match api.trailer(movie_id).await {
        Ok(response) => SelectionEvent::NewTrailer(response.first_key().map(String::from)),
        Err(err) => {
            tracing::warn!("trailer lookup failed: {err:#}");
            SelectionEvent::NewTrailer(None)
        }
    }
}
