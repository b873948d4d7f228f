//! Filter criteria, their textual form, and query fragment building.

use std::fmt;
use std::fmt::Write as _;
use std::str::FromStr;

/// Smallest accepted four-digit year.
const MIN_YEAR: u32 = 1000;

/// Largest accepted four-digit year.
const MAX_YEAR: u32 = 9999;

/// Invalid filter input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[allow(clippy::module_name_repetitions)]
pub enum CriteriaError {
    /// Year is not a four-digit number.
    #[error("invalid year '{0}': expected four digits")]
    InvalidYear(String),
    /// `from` is later than `to`.
    #[error("invalid year range: {from} is after {to}")]
    InvertedYearRange {
        /// Lower bound as given.
        from: u32,
        /// Upper bound as given.
        to: u32,
    },
    /// Rating is not a number in 0-10.
    #[error("invalid rating '{0}': expected a number between 0 and 10")]
    InvalidRating(String),
    /// Genre list contains a non-numeric ID.
    #[error("invalid genre id '{0}'")]
    InvalidGenre(String),
    /// Token is not `key=value`.
    #[error("malformed filter token '{0}': expected key=value")]
    MalformedToken(String),
    /// Unknown `key` in `key=value`.
    #[error("unknown filter key '{0}' (expected from, to, rating, genres)")]
    UnknownKey(String),
}

/// Minimum vote average, held in tenths so it always has exactly one
/// fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinRating(u8);

impl MinRating {
    /// Largest value in tenths (10.0).
    pub const MAX_TENTHS: u8 = 100;

    /// Creates a rating from tenths (`75` is 7.5).
    ///
    /// # Errors
    ///
    /// Returns an error if `tenths` exceeds 100.
    pub fn from_tenths(tenths: u8) -> Result<Self, CriteriaError> {
        if tenths > Self::MAX_TENTHS {
            return Err(CriteriaError::InvalidRating(format!(
                "{}.{}",
                tenths / 10,
                tenths % 10
            )));
        }
        Ok(Self(tenths))
    }

    /// Returns the rating in tenths.
    #[must_use]
    pub const fn tenths(self) -> u8 {
        self.0
    }

    /// Returns the rating as a float.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.0) / 10.0
    }
}

impl FromStr for MinRating {
    type Err = CriteriaError;

    /// Parses a decimal and rounds it to one fractional digit.
    #[allow(
        clippy::as_conversions,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CriteriaError::InvalidRating(String::from(s));
        let value: f64 = s.trim().parse().map_err(|_| invalid())?;
        if !value.is_finite() || !(0.0..=10.0).contains(&value) {
            return Err(invalid());
        }
        // In range 0..=100 after the check above.
        let tenths = (value * 10.0).round() as u8;
        Self::from_tenths(tenths)
    }
}

impl fmt::Display for MinRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Filter applied to the discover search.
///
/// Two criteria are the same filter exactly when all four fields are equal.
/// Fields are only set through [`FilterCriteria::new`] or parsing, so an
/// empty genre list is always stored as no genre filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct FilterCriteria {
    /// Earliest release year (inclusive, from January 1st).
    year_from: Option<u32>,
    /// Latest release year (January 1st of that year).
    year_to: Option<u32>,
    /// Minimum vote average.
    min_rating: Option<MinRating>,
    /// Genre IDs (never an empty list).
    genre_ids: Option<Vec<u32>>,
}

impl FilterCriteria {
    /// Builds validated criteria.
    ///
    /// An empty genre list is treated as no genre filter.
    ///
    /// # Errors
    ///
    /// Returns an error if a year is not four digits or `year_from` is
    /// after `year_to`.
    pub fn new(
        year_from: Option<u32>,
        year_to: Option<u32>,
        min_rating: Option<MinRating>,
        genre_ids: Vec<u32>,
    ) -> Result<Self, CriteriaError> {
        for year in [year_from, year_to].into_iter().flatten() {
            validate_year(year)?;
        }
        if let (Some(from), Some(to)) = (year_from, year_to)
            && from > to
        {
            return Err(CriteriaError::InvertedYearRange { from, to });
        }
        Ok(Self {
            year_from,
            year_to,
            min_rating,
            genre_ids: if genre_ids.is_empty() {
                None
            } else {
                Some(genre_ids)
            },
        })
    }

    /// Earliest release year.
    #[must_use]
    pub const fn year_from(&self) -> Option<u32> {
        self.year_from
    }

    /// Latest release year.
    #[must_use]
    pub const fn year_to(&self) -> Option<u32> {
        self.year_to
    }

    /// Minimum vote average.
    #[must_use]
    pub const fn min_rating(&self) -> Option<MinRating> {
        self.min_rating
    }

    /// Genre IDs, `None` when no genre filter is set.
    #[must_use]
    pub fn genre_ids(&self) -> Option<&[u32]> {
        self.genre_ids.as_deref()
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.year_from.is_none()
            && self.year_to.is_none()
            && self.min_rating.is_none()
            && self.genre_ids.is_none()
    }

    /// Builds the discover query fragment.
    ///
    /// Field order is release-date range, rating, genres. Empty criteria
    /// yield an empty string, which the backend treats as unfiltered.
    #[must_use]
    pub fn query_fragment(&self) -> String {
        let mut fragment = String::new();

        if self.year_from.is_some() || self.year_to.is_some() {
            fragment.push_str("&primary_release_date.gte=");
            if let Some(from) = self.year_from {
                let _ = write!(fragment, "{from}-01-01");
            }
            fragment.push_str("&primary_release_date.lte=");
            if let Some(to) = self.year_to {
                let _ = write!(fragment, "{to}-01-01");
            }
        }

        if let Some(rating) = self.min_rating {
            let _ = write!(fragment, "&vote_average.gte={rating}");
        }

        if let Some(ref genres) = self.genre_ids {
            fragment.push_str("&with_genres=");
            fragment.push_str(&join_ids(genres));
        }

        fragment
    }
}

/// Builds the `urlAddon` for a search request: the criteria fragment,
/// followed by `&page=N` for pages after the first.
#[must_use]
pub fn search_addon(criteria: &FilterCriteria, page: u32) -> String {
    let mut addon = criteria.query_fragment();
    if page > 1 {
        let _ = write!(addon, "&page={page}");
    }
    addon
}

impl FromStr for FilterCriteria {
    type Err = CriteriaError;

    /// Parses `from=1990 to=1999 rating=7.5 genres=28,12`.
    ///
    /// Any subset and order of keys is accepted; blank input is the empty
    /// filter. A repeated key overrides the earlier one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut year_from = None;
        let mut year_to = None;
        let mut min_rating = None;
        let mut genre_ids = Vec::new();

        for token in s.split_whitespace() {
            let (key, value) = token
                .split_once('=')
                .ok_or_else(|| CriteriaError::MalformedToken(String::from(token)))?;
            match key {
                "from" => year_from = parse_optional(value, parse_year)?,
                "to" => year_to = parse_optional(value, parse_year)?,
                "rating" => min_rating = parse_optional(value, str::parse::<MinRating>)?,
                "genres" => genre_ids = parse_genres(value)?,
                other => return Err(CriteriaError::UnknownKey(String::from(other))),
            }
        }

        Self::new(year_from, year_to, min_rating, genre_ids)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(from) = self.year_from {
            parts.push(format!("from={from}"));
        }
        if let Some(to) = self.year_to {
            parts.push(format!("to={to}"));
        }
        if let Some(rating) = self.min_rating {
            parts.push(format!("rating={rating}"));
        }
        if let Some(ref genres) = self.genre_ids {
            parts.push(format!("genres={}", join_ids(genres)));
        }
        f.write_str(&parts.join(" "))
    }
}

/// Joins IDs with commas, keeping their order.
fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Rejects years outside the four-digit range.
fn validate_year(year: u32) -> Result<u32, CriteriaError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(CriteriaError::InvalidYear(year.to_string()))
    }
}

/// Parses a four-digit year.
fn parse_year(s: &str) -> Result<u32, CriteriaError> {
    let year: u32 = s
        .parse()
        .map_err(|_| CriteriaError::InvalidYear(String::from(s)))?;
    validate_year(year)
}

/// Parses a comma-separated genre ID list (empty items are skipped).
fn parse_genres(s: &str) -> Result<Vec<u32>, CriteriaError> {
    s.split(',')
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse()
                .map_err(|_| CriteriaError::InvalidGenre(String::from(item)))
        })
        .collect()
}

/// Treats an empty value (`rating=`) as "not set".
fn parse_optional<T>(
    value: &str,
    parse: impl Fn(&str) -> Result<T, CriteriaError>,
) -> Result<Option<T>, CriteriaError> {
    if value.is_empty() {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}
