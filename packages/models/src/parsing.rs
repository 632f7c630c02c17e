//! Field coercion shared by every record type.
//!
//! Absent or empty fields coerce to a default (`0`, `false`, `None`).
//! Present-but-malformed fields are reported as [`EntityError`].

use chrono::NaiveDate;

use crate::{EntityError, RawRecord};

/// Date format used by the feeds and by date queries.
pub const FEED_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses a `dd/mm/yyyy` date. Surrounding whitespace is ignored.
#[must_use]
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), FEED_DATE_FORMAT).ok()
}

/// Reads `field` as a finite number, or `0.0` when the field is missing.
///
/// # Errors
///
/// Returns [`EntityError::InvalidNumber`] if the text is not a finite number.
pub fn parse_number(record: &RawRecord, field: &str) -> Result<f64, EntityError> {
    let Some(raw) = record.get(field) else {
        return Ok(0.0);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EntityError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Reads `field` as a non-negative integral identifier, or `0` when the
/// field is missing. Values such as `"12.0"` are accepted.
///
/// # Errors
///
/// Returns [`EntityError::InvalidNumber`] for non-numeric text and
/// [`EntityError::InvalidId`] for negative or fractional values.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_id(record: &RawRecord, field: &str) -> Result<u64, EntityError> {
    let Some(raw) = record.get(field) else {
        return Ok(0);
    };
    if let Ok(id) = raw.trim().parse::<u64>() {
        return Ok(id);
    }
    let value = parse_number(record, field)?;
    if value < 0.0 || value.fract() != 0.0 || value > u64::MAX as f64 {
        return Err(EntityError::InvalidId {
            field: field.to_string(),
            value: raw.to_string(),
        });
    }
    Ok(value as u64)
}

/// Reads `field` as a `dd/mm/yyyy` date, or `None` when the field is missing.
///
/// # Errors
///
/// Returns [`EntityError::InvalidDate`] if the text is not a valid date.
pub fn parse_feed_date(record: &RawRecord, field: &str) -> Result<Option<NaiveDate>, EntityError> {
    let Some(raw) = record.get(field) else {
        return Ok(None);
    };
    parse_date(raw)
        .map(Some)
        .ok_or_else(|| EntityError::InvalidDate {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Reads `field` as a count and reports whether it is strictly positive.
/// A missing field counts as zero.
///
/// # Errors
///
/// Returns [`EntityError::InvalidNumber`] if the text is not a number.
pub fn parse_positive(record: &RawRecord, field: &str) -> Result<bool, EntityError> {
    Ok(parse_number(record, field)? > 0.0)
}
