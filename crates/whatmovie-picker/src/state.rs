//! Explicit state container for the picker.

use crate::criteria::FilterCriteria;
use crate::error::PickerError;
use crate::pool::{MoviePool, PageCursor};
use crate::selection::{Selection, SelectionEvent};

/// Everything the picker remembers between UI actions.
///
/// Passed by `&mut` into the pool manager; nothing is global.
#[derive(Debug, Clone, Default)]
#[allow(clippy::module_name_repetitions)]
pub struct PickerState {
    /// Current page of movies (`None` until fetched or after exhaustion).
    pub(crate) pool: Option<MoviePool>,
    /// Page bookkeeping across fetches.
    pub(crate) pages: PageCursor,
    /// Last applied filter.
    pub(crate) criteria: FilterCriteria,
    /// Message for the last failed top-level fetch.
    pub(crate) error: Option<PickerError>,
    /// Movie on screen plus enrichments.
    pub(crate) selection: Selection,
}

impl PickerState {
    /// Creates an empty state with initial filter criteria.
    #[must_use]
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    /// Returns to the freshly constructed state, keeping the criteria.
    pub fn reset(&mut self) {
        let criteria = std::mem::take(&mut self.criteria);
        *self = Self::new(criteria);
    }

    /// Returns the current pool.
    #[must_use]
    pub const fn pool(&self) -> Option<&MoviePool> {
        self.pool.as_ref()
    }

    /// Returns the cursor into the current pool (0 without a pool).
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.pool.as_ref().map_or(0, MoviePool::cursor)
    }

    /// Returns the page bookkeeping.
    #[must_use]
    pub const fn pages(&self) -> PageCursor {
        self.pages
    }

    /// Returns the applied filter.
    #[must_use]
    pub const fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Returns the error of the last top-level fetch.
    #[must_use]
    pub const fn error(&self) -> Option<PickerError> {
        self.error
    }

    /// Returns the current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Applies a selection event through the reducer.
    pub fn apply(&mut self, event: SelectionEvent) {
        let selection = std::mem::take(&mut self.selection);
        self.selection = selection.reduce(event);
    }
}
