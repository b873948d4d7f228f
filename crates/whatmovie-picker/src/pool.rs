//! In-memory movie page and page bookkeeping.

use crate::movie::MovieSummary;

/// The current page of candidate movies and a cursor into it.
///
/// A pool is never empty, so the cursor always points at a movie.
#[derive(Debug, Clone)]
pub struct MoviePool {
    /// Movies on the page, in provider order.
    movies: Vec<MovieSummary>,
    /// Zero-based cursor.
    cursor: usize,
}

impl MoviePool {
    /// Creates a pool with the cursor on the first movie.
    ///
    /// Returns `None` for an empty page.
    #[must_use]
    pub fn new(movies: Vec<MovieSummary>) -> Option<Self> {
        if movies.is_empty() {
            return None;
        }
        Some(Self { movies, cursor: 0 })
    }

    /// Returns the cursor position.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the number of movies on the page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Returns all movies on the page.
    #[must_use]
    pub fn movies(&self) -> &[MovieSummary] {
        &self.movies
    }

    /// Returns the movie at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&MovieSummary> {
        self.movies.get(index)
    }

    /// Returns the movie under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&MovieSummary> {
        self.get(self.cursor)
    }

    /// Returns `true` if the cursor can move forward on this page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.cursor.saturating_add(1) < self.movies.len()
    }

    /// Moves the cursor forward. Returns `false` at the end of the page.
    pub fn step(&mut self) -> bool {
        if self.has_next() {
            self.cursor = self.cursor.saturating_add(1);
            true
        } else {
            false
        }
    }
}

/// 1-based page number with the known total page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Current page.
    page: u32,
    /// Total pages reported by the last fetch (at least 1).
    total_pages: u32,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCursor {
    /// Starts on page 1 of 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }

    /// Returns the current page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the known total page count.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Records the total page count. Zero (unknown) counts as one page.
    pub fn set_total(&mut self, total_pages: u32) {
        self.total_pages = total_pages.max(1);
    }

    /// Moves to the next page, wrapping to page 1 after the last one.
    pub const fn advance(&mut self) {
        self.page = if self.page < self.total_pages {
            self.page.saturating_add(1)
        } else {
            1
        };
    }

    /// Returns to page 1.
    pub const fn reset(&mut self) {
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::testing::movies;

    #[test]
    fn test_empty_page_is_not_a_pool() {
        // Arrange & Act & Assert
        assert!(MoviePool::new(Vec::new()).is_none());
    }

    #[test]
    fn test_new_pool_starts_at_zero() {
        // Arrange & Act
        let pool = MoviePool::new(movies(3)).unwrap();

        // Assert
        assert_eq!(pool.cursor(), 0);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.current().unwrap().id, 1);
    }

    #[test]
    fn test_step_until_end() {
        // Arrange
        let mut pool = MoviePool::new(movies(3)).unwrap();

        // Act & Assert
        assert!(pool.step());
        assert_eq!(pool.current().unwrap().id, 2);
        assert!(pool.step());
        assert_eq!(pool.cursor(), 2);
        assert!(!pool.has_next());
        assert!(!pool.step());
        assert_eq!(pool.cursor(), 2);
    }

    #[test]
    fn test_single_movie_pool_has_no_next() {
        // Arrange
        let mut pool = MoviePool::new(movies(1)).unwrap();

        // Act & Assert
        assert!(!pool.has_next());
        assert!(!pool.step());
        assert_eq!(pool.current().unwrap().id, 1);
    }

    #[test]
    fn test_page_cursor_advances_and_wraps() {
        // Arrange
        let mut pages = PageCursor::new();
        pages.set_total(3);

        // Act & Assert
        pages.advance();
        assert_eq!(pages.page(), 2);
        pages.advance();
        assert_eq!(pages.page(), 3);
        pages.advance();
        assert_eq!(pages.page(), 1);
    }

    #[test]
    fn test_unknown_total_wraps_immediately() {
        // Arrange
        let mut pages = PageCursor::new();
        pages.set_total(0);

        // Act
        pages.advance();

        // Assert
        assert_eq!(pages.total_pages(), 1);
        assert_eq!(pages.page(), 1);
    }

    #[test]
    fn test_page_cursor_reset() {
        // Arrange
        let mut pages = PageCursor::new();
        pages.set_total(10);
        pages.advance();
        pages.advance();

        // Act
        pages.reset();

        // Assert
        assert_eq!(pages.page(), 1);
        assert_eq!(pages.total_pages(), 10);
    }
}
