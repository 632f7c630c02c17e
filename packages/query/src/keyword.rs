//! Keyword queries over event names and institutions.

use cerca_models::{Event, normalize_text};
use regex::Regex;

use crate::expr::Expr;
use crate::literal::{Literal, QueryParseError, parse_literal};

/// A single keyword term.
#[derive(Debug, Clone)]
pub enum KeywordLeaf {
    /// Regular expression searched for in the event's name or institution.
    Pattern(Regex),
    /// A term that is not a usable pattern. Never matches.
    Unrecognized(String),
}

impl KeywordLeaf {
    /// Builds a pattern leaf, falling back to [`Self::Unrecognized`] when
    /// `pattern` is not a valid regular expression.
    #[must_use]
    pub fn pattern(pattern: &str) -> Self {
        match Regex::new(pattern) {
            Ok(re) => Self::Pattern(re),
            Err(e) => {
                log::warn!("Ignoring invalid keyword pattern {pattern:?}: {e}");
                Self::Unrecognized(pattern.to_string())
            }
        }
    }

    /// Whether this term occurs in the event's name or institution.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(&event.name) || re.is_match(&event.institution),
            Self::Unrecognized(_) => false,
        }
    }
}

/// Evaluates a keyword query against `event`.
#[must_use]
pub fn matches_keywords(event: &Event, expr: &Expr<KeywordLeaf>) -> bool {
    expr.evaluate(&|leaf: &KeywordLeaf| leaf.matches(event))
}

/// Interprets a literal as a keyword query: strings are patterns, lists
/// are conjunctions and tuples are disjunctions.
#[must_use]
pub fn keywords_from_literal(literal: &Literal) -> Expr<KeywordLeaf> {
    match literal {
        Literal::Str(pattern) => Expr::Leaf(KeywordLeaf::pattern(pattern)),
        Literal::List(items) => Expr::All(items.iter().map(keywords_from_literal).collect()),
        Literal::Tuple(items) => Expr::Any(items.iter().map(keywords_from_literal).collect()),
        Literal::Int(n) => {
            log::warn!("Ignoring non-text keyword {n}");
            Expr::Leaf(KeywordLeaf::Unrecognized(n.to_string()))
        }
    }
}

/// Normalizes and parses a textual keyword query.
///
/// # Errors
///
/// Returns [`QueryParseError`] if the text is not a valid literal.
pub fn parse_keywords(text: &str) -> Result<Expr<KeywordLeaf>, QueryParseError> {
    parse_literal(&normalize_text(text)).map(|lit| keywords_from_literal(&lit))
}
