//! User-visible fetch errors.

/// Why a top-level fetch produced no movie.
///
/// The `Display` text is what the user sees; transport details are only
/// logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum PickerError {
    /// Network failure, non-success status, undecodable or empty popular feed.
    #[error("Something went wrong!")]
    Transport,
    /// The filtered search succeeded but matched nothing.
    #[error("Sorry, no movies were found.")]
    NoResults,
}
