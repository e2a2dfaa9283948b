//! Book domain model.
//!
//! # Responsibility
//! - Define the persisted book record and its closed genre set.
//! - Turn raw driver input into validated records.
//!
//! # Invariants
//! - `title` is never empty. Whitespace is kept as typed.
//! - `year` is non-negative by construction (`u32`).
//! - `genre` is one of the fixed `Genre` variants; wire names are stable.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Closed genre set for catalog entries.
///
/// Adding a genre is a compile-time change; the serialized names below are
/// part of the persisted file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Mystery,
    #[serde(rename = "Sci-Fi")]
    SciFi,
}

impl Genre {
    /// All genres in picker order.
    pub const ALL: [Genre; 4] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::SciFi,
    ];

    /// Returns the stable wire/display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Mystery => "Mystery",
            Genre::SciFi => "Sci-Fi",
        }
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = BookValidationError;

    /// Parses an exact wire name. Matching is case-sensitive.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == value)
            .ok_or_else(|| BookValidationError::UnknownGenre(value.to_string()))
    }
}

/// Field-level validation failures for book records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    /// Title is the empty string.
    EmptyTitle,
    /// Publication year below zero.
    NegativeYear(i64),
    /// Publication year does not fit the stored range.
    YearOutOfRange(i64),
    /// Genre name outside the closed set.
    UnknownGenre(String),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "book title cannot be empty"),
            Self::NegativeYear(year) => {
                write!(f, "publication year must be >= 0, got {year}")
            }
            Self::YearOutOfRange(year) => {
                write!(f, "publication year {year} is out of range")
            }
            Self::UnknownGenre(value) => write!(
                f,
                "unknown genre `{value}`; expected Fiction|Non-Fiction|Mystery|Sci-Fi"
            ),
        }
    }
}

impl BookValidationError {
    /// Stable tag for logs; never includes the rejected value.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "empty_title",
            Self::NegativeYear(_) => "negative_year",
            Self::YearOutOfRange(_) => "year_out_of_range",
            Self::UnknownGenre(_) => "unknown_genre",
        }
    }
}

impl Error for BookValidationError {}

/// One catalog record.
///
/// Decoding goes through [`Book::validate`], so a stored record with an
/// empty title is rejected instead of loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookWire")]
pub struct Book {
    /// Removal and search key. Duplicates are allowed.
    pub title: String,
    pub author: String,
    pub year: u32,
    pub genre: Genre,
    pub read: bool,
}

impl Book {
    /// Creates a validated book.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: u32,
        genre: Genre,
        read: bool,
    ) -> Result<Self, BookValidationError> {
        let book = Self {
            title: title.into(),
            author: author.into(),
            year,
            genre,
            read,
        };
        book.validate()?;
        Ok(book)
    }

    /// Checks invariants that the type system does not cover.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Human label for the read flag.
    pub fn read_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.read_label()
        )
    }
}

// Mirrors `Book` field-for-field; exists only to route decoding through
// validation.
#[derive(Deserialize)]
struct BookWire {
    title: String,
    author: String,
    year: u32,
    genre: Genre,
    read: bool,
}

impl TryFrom<BookWire> for Book {
    type Error = BookValidationError;

    fn try_from(wire: BookWire) -> Result<Self, Self::Error> {
        Book::new(wire.title, wire.author, wire.year, wire.genre, wire.read)
    }
}

/// Unvalidated add request as supplied by a UI driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub genre: String,
    pub read: bool,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i64,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
        }
    }

    /// Validates every field and builds the stored record.
    ///
    /// # Errors
    /// - `NegativeYear` / `YearOutOfRange` for years outside `0..=u32::MAX`.
    /// - `UnknownGenre` for names outside the closed set.
    /// - `EmptyTitle` for an empty title.
    pub fn into_book(self) -> Result<Book, BookValidationError> {
        if self.year < 0 {
            return Err(BookValidationError::NegativeYear(self.year));
        }
        let year =
            u32::try_from(self.year).map_err(|_| BookValidationError::YearOutOfRange(self.year))?;
        let genre = self.genre.parse::<Genre>()?;
        Book::new(self.title, self.author, year, genre, self.read)
    }
}
