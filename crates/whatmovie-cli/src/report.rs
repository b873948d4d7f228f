//! Plain-text output for the one-shot subcommands.
//!
//! Everything is emitted as `tracing` events at `info` so it shares the
//! subscriber (and the optional OTLP export) with the rest of the binary.

use whatmovie_picker::display::{rating_badge, release_year, runtime_label};
use whatmovie_picker::genres::GENRES;
use whatmovie_picker::{MovieCard, MovieSummary};

/// Logs a movie page as a table.
pub fn log_movies(movies: &[MovieSummary], total_pages: Option<u32>) {
    tracing::info!("ID\tYear\tRating\tTitle");
    for movie in movies {
        tracing::info!(
            "{}\t{}\t{}\t{}",
            movie.id,
            release_year(&movie.release_date).unwrap_or("-"),
            rating_badge(movie.rating_average).unwrap_or_else(|| String::from("-")),
            movie.title
        );
    }
    match total_pages {
        Some(pages) => tracing::info!("Total: {} movies (page of {})", movies.len(), pages),
        None => tracing::info!("Total: {} movies", movies.len()),
    }
}

/// Logs a selected movie.
pub fn log_card(card: &MovieCard) {
    tracing::info!("{}", card.heading());
    let details = card.details();
    if !details.is_empty() {
        tracing::info!("{}", details);
    }
    if !card.description.is_empty() {
        tracing::info!("{}", card.description);
    }
    if let Some(ref poster) = card.poster_url {
        tracing::info!("Poster: {}", poster);
    }
    if let Some(ref trailer) = card.trailer_url {
        tracing::info!("Trailer: {}", trailer);
    }
}

/// Logs a runtime lookup result.
pub fn log_runtime(movie_id: u64, runtime_minutes: Option<u32>) {
    match runtime_label(runtime_minutes) {
        Some(label) => tracing::info!("{}: {} ({} min)", movie_id, label, runtime_minutes.unwrap_or(0)),
        None => tracing::info!("{}: runtime unknown", movie_id),
    }
}

/// Logs the genre table.
pub fn log_genres() {
    tracing::info!("ID\tGenre");
    for (id, name) in GENRES {
        tracing::info!("{}\t{}", id, name);
    }
}
