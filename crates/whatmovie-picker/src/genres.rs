//! TMDB movie genre table.

/// TMDB movie genre IDs and their English names.
pub const GENRES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Science Fiction"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

/// Returns the name of a genre ID.
#[must_use]
pub fn genre_name(id: u32) -> Option<&'static str> {
    GENRES
        .iter()
        .find_map(|&(gid, name)| (gid == id).then_some(name))
}
