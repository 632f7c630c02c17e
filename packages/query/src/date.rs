//! Date queries over the event's next occurrence.

use cerca_models::{Event, normalize_text, parsing::parse_date};
use chrono::NaiveDate;

use crate::expr::Expr;
use crate::literal::{Literal, QueryParseError, parse_literal};

/// A single date term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLeaf {
    /// Matches events on exactly this day.
    On(NaiveDate),
    /// Matches events between `low` and `high` days from `anchor`,
    /// inclusive. The offsets may be given in either order.
    Within {
        anchor: NaiveDate,
        low: i64,
        high: i64,
    },
    /// A term that is not a usable date. Never matches.
    Unrecognized(String),
}

impl DateLeaf {
    /// Whether `date` satisfies this term.
    #[must_use]
    pub fn matches_date(&self, date: NaiveDate) -> bool {
        match self {
            Self::On(day) => date == *day,
            Self::Within { anchor, low, high } => {
                let delta_days = (date - *anchor).num_days();
                (*low.min(high)..=*low.max(high)).contains(&delta_days)
            }
            Self::Unrecognized(_) => false,
        }
    }

    /// Whether the event's date satisfies this term. Events without a date
    /// never match.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        event.date.is_some_and(|date| self.matches_date(date))
    }
}

/// Evaluates a date query against `event`.
#[must_use]
pub fn matches_dates(event: &Event, expr: &Expr<DateLeaf>) -> bool {
    expr.evaluate(&|leaf: &DateLeaf| leaf.matches(event))
}

fn date_leaf(text: &str) -> DateLeaf {
    parse_date(text).map_or_else(
        || {
            log::warn!("Ignoring invalid query date {text:?}");
            DateLeaf::Unrecognized(text.to_string())
        },
        DateLeaf::On,
    )
}

/// A range offset: an integer, or a string holding one such as `'-5'`.
fn day_offset(literal: &Literal) -> Option<i64> {
    match literal {
        Literal::Int(n) => Some(*n),
        Literal::Str(text) => text.trim().parse().ok(),
        Literal::List(_) | Literal::Tuple(_) => None,
    }
}

/// Interprets a literal as a date query.
///
/// A string is an exact date and a `(date, low, high)` tuple is a range;
/// any other tuple is a disjunction and a list is a conjunction. Range
/// offsets may be integers or integer strings.
#[must_use]
pub fn dates_from_literal(literal: &Literal) -> Expr<DateLeaf> {
    match literal {
        Literal::Str(text) => Expr::Leaf(date_leaf(text)),
        Literal::Tuple(items) => match items.as_slice() {
            [Literal::Str(anchor), low, high]
                if day_offset(low).is_some() && day_offset(high).is_some() =>
            {
                Expr::Leaf(match (date_leaf(anchor), day_offset(low), day_offset(high)) {
                    (DateLeaf::On(anchor), Some(low), Some(high)) => {
                        DateLeaf::Within { anchor, low, high }
                    }
                    (leaf, ..) => leaf,
                })
            }
            _ => Expr::Any(items.iter().map(dates_from_literal).collect()),
        },
        Literal::List(items) => Expr::All(items.iter().map(dates_from_literal).collect()),
        Literal::Int(n) => {
            log::warn!("Ignoring bare number {n} in date query");
            Expr::Leaf(DateLeaf::Unrecognized(n.to_string()))
        }
    }
}

/// Normalizes and parses a textual date query.
///
/// # Errors
///
/// Returns [`QueryParseError`] if the text is not a valid literal.
pub fn parse_dates(text: &str) -> Result<Expr<DateLeaf>, QueryParseError> {
    parse_literal(&normalize_text(text)).map(|lit| dates_from_literal(&lit))
}
