#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Keyword and date queries over events.
//!
//! A query is written as a literal of quoted strings, integers, `[...]`
//! lists and `(...)` tuples, e.g. `["musica", ("jazz", "blues")]`. It is
//! parsed once into an [`Expr`] tree whose leaves are [`KeywordLeaf`] or
//! [`DateLeaf`] values, then evaluated per event:
//!
//! * a list matches when **all** of its items match,
//! * a tuple matches when **any** of its items matches,
//! * a date tuple shaped `("dd/mm/yyyy", low, high)` is a day range
//!   around that date.
//!
//! Leaves that cannot be interpreted never match.

pub mod date;
pub mod expr;
pub mod keyword;
pub mod literal;

pub use date::{DateLeaf, matches_dates};
pub use expr::Expr;
pub use keyword::{KeywordLeaf, matches_keywords};
pub use literal::{Literal, QueryParseError};

use cerca_models::Event;

/// Keyword and date constraints applied to each event.
///
/// An absent expression accepts every event.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub keywords: Option<Expr<KeywordLeaf>>,
    pub dates: Option<Expr<DateLeaf>>,
}

impl EventFilter {
    /// Parses the textual keyword and date queries.
    ///
    /// # Errors
    ///
    /// Returns [`QueryParseError`] if either text is not a valid literal.
    pub fn parse(keywords: Option<&str>, dates: Option<&str>) -> Result<Self, QueryParseError> {
        Ok(Self {
            keywords: keywords.map(keyword::parse_keywords).transpose()?,
            dates: dates.map(date::parse_dates).transpose()?,
        })
    }

    /// Whether `event` satisfies both the keyword and the date query.
    #[must_use]
    pub fn accepts(&self, event: &Event) -> bool {
        self.keywords
            .as_ref()
            .is_none_or(|expr| matches_keywords(event, expr))
            && self
                .dates
                .as_ref()
                .is_none_or(|expr| matches_dates(event, expr))
    }
}
