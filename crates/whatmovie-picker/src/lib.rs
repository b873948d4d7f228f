//! Movie selection state machine for whatmovie.
//!
//! The [`PoolManager`] fetches pages of movies into a [`MoviePool`] and
//! walks a cursor through them; the [`SelectionController`] turns the
//! record under the cursor into a [`Selection`] and enriches it with
//! runtime and trailer lookups. All mutable state lives in one
//! [`PickerState`] owned by the caller.

/// Selection controller (movie choice plus runtime/trailer lookups).
pub mod controller;
/// Filter criteria and query fragment building.
pub mod criteria;
/// Presentation helpers for rendering a selection.
pub mod display;
/// User-visible fetch errors.
pub mod error;
/// Static TMDB genre table.
pub mod genres;
/// Pool manager (popular/filtered fetches, cursor and page bookkeeping).
pub mod manager;
/// Normalized movie record.
pub mod movie;
/// In-memory page of movies and the page cursor.
pub mod pool;
/// Selection record and its reducer.
pub mod selection;
/// Explicit state container.
pub mod state;

#[cfg(test)]
mod testing;

pub use controller::{SelectionController, fetch_runtime, fetch_trailer};
pub use criteria::{CriteriaError, FilterCriteria, MinRating, search_addon};
pub use display::MovieCard;
pub use error::PickerError;
pub use manager::PoolManager;
pub use movie::MovieSummary;
pub use pool::{MoviePool, PageCursor};
pub use selection::{Selection, SelectionEvent};
pub use state::PickerState;
