//! API client library for whatmovie.
//!
//! Provides a client for the backend proxy that wraps the TMDB movie API.

/// Backend proxy client.
pub mod backend;
