#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Typed records for the three public feeds.
//!
//! Every feed item arrives as a [`RawRecord`] (field name to optional
//! text). This crate coerces those fields into [`Event`], [`Station`] and
//! [`Parking`] values. Missing fields fall back to empty or zero defaults;
//! a field that is present but malformed makes that single record fail
//! with an [`EntityError`] so the rest of the batch is unaffected.

pub mod normalize;
pub mod parsing;

mod event;
mod facility;
mod record;

pub use event::{Event, build_events};
pub use facility::{Parking, Station, build_parkings, build_stations};
pub use normalize::normalize_text;
pub use record::RawRecord;

/// Errors raised while coercing a single raw record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    /// A numeric field held text that is not a number.
    #[error("Field '{field}' is not a number: {value:?}")]
    InvalidNumber {
        /// Name of the offending field.
        field: String,
        /// Raw text found in the feed.
        value: String,
    },

    /// An identifier field held a negative or fractional number.
    #[error("Field '{field}' is not a valid identifier: {value:?}")]
    InvalidId {
        /// Name of the offending field.
        field: String,
        /// Raw text found in the feed.
        value: String,
    },

    /// A date field did not match `dd/mm/yyyy`.
    #[error("Field '{field}' is not a dd/mm/yyyy date: {value:?}")]
    InvalidDate {
        /// Name of the offending field.
        field: String,
        /// Raw text found in the feed.
        value: String,
    },
}
