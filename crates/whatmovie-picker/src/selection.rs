//! Selection record and its reducer.

use crate::movie::MovieSummary;

/// The movie on screen plus its independently resolved enrichments.
///
/// `None` in `runtime_minutes` or `trailer_key` is a settled state (the
/// lookup failed or found nothing), not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    /// Selected movie.
    pub movie: Option<MovieSummary>,
    /// Runtime in minutes.
    pub runtime_minutes: Option<u32>,
    /// `YouTube` key of the first trailer.
    pub trailer_key: Option<String>,
}

/// A single update to the selection.
///
/// Each variant replaces exactly one field; `Reset` clears everything.
#[derive(Debug, Clone, PartialEq)]
#[allow(clippy::module_name_repetitions)]
pub enum SelectionEvent {
    /// A new movie was chosen from the pool.
    NewMovie(MovieSummary),
    /// The runtime lookup resolved.
    NewRuntime(Option<u32>),
    /// The trailer lookup resolved.
    NewTrailer(Option<String>),
    /// Back to the empty selection.
    Reset,
}

impl Selection {
    /// Produces the next selection from an event.
    ///
    /// `NewMovie` keeps the previous runtime and trailer until their own
    /// events arrive, so a new movie may briefly show stale enrichments.
    #[must_use]
    pub fn reduce(self, event: SelectionEvent) -> Self {
        match event {
            SelectionEvent::NewMovie(movie) => Self {
                movie: Some(movie),
                ..self
            },
            SelectionEvent::NewRuntime(runtime_minutes) => Self {
                runtime_minutes,
                ..self
            },
            SelectionEvent::NewTrailer(trailer_key) => Self {
                trailer_key,
                ..self
            },
            SelectionEvent::Reset => Self::default(),
        }
    }
}
