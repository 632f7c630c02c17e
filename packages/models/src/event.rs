use cerca_geo::{Located, Point};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_text;
use crate::parsing::{parse_feed_date, parse_number};
use crate::{EntityError, RawRecord};

/// A cultural event from the agenda feed.
///
/// Text fields are stored normalized (see [`normalize_text`]). A latitude or
/// longitude of `0.0` means the feed did not provide one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub latitude: f64,
    pub longitude: f64,
    /// Next date the event takes place.
    pub date: Option<NaiveDate>,
    /// Free-text start time (e.g. "de 10 a 14 h").
    pub time: String,
    pub name: String,
    pub address: String,
    /// Name of the hosting institution or venue.
    pub institution: String,
}

impl Event {
    pub const FIELD_LATITUDE: &'static str = "gmapx";
    pub const FIELD_LONGITUDE: &'static str = "gmapy";
    pub const FIELD_DATE: &'static str = "proxdate";
    pub const FIELD_TIME: &'static str = "proxhour";
    pub const FIELD_NAME: &'static str = "name";
    pub const FIELD_ADDRESS: &'static str = "address";
    pub const FIELD_INSTITUTION: &'static str = "institutionname";

    /// Builds an event from a raw agenda item.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] if a coordinate or the date is present but
    /// malformed.
    pub fn from_record(record: &RawRecord) -> Result<Self, EntityError> {
        let text = |field: &str| record.get(field).map(normalize_text).unwrap_or_default();

        Ok(Self {
            latitude: parse_number(record, Self::FIELD_LATITUDE)?,
            longitude: parse_number(record, Self::FIELD_LONGITUDE)?,
            date: parse_feed_date(record, Self::FIELD_DATE)?,
            time: text(Self::FIELD_TIME),
            name: text(Self::FIELD_NAME),
            address: text(Self::FIELD_ADDRESS),
            institution: text(Self::FIELD_INSTITUTION),
        })
    }

    /// Returns `true` when every required field is populated.
    ///
    /// Coordinates must be non-zero and the date, time, name, address and
    /// institution must all be present.
    #[must_use]
    pub fn validate(&self) -> bool {
        let missing = if self.latitude == 0.0 {
            Some("latitude")
        } else if self.longitude == 0.0 {
            Some("longitude")
        } else if self.date.is_none() {
            Some("date")
        } else if self.name.is_empty() {
            Some("name")
        } else if self.time.is_empty() {
            Some("time")
        } else if self.address.is_empty() {
            Some("address")
        } else if self.institution.is_empty() {
            Some("institution")
        } else {
            None
        };

        if let Some(field) = missing {
            log::debug!("Invalid event {:?}: missing {field}", self.name);
            return false;
        }
        true
    }
}

impl Located for Event {
    fn position(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// Builds the valid events of an agenda feed, preserving feed order.
///
/// Items without a latitude or date element are skipped outright, as are
/// items with malformed fields and events that fail [`Event::validate`].
#[must_use]
pub fn build_events(records: &[RawRecord]) -> Vec<Event> {
    let events: Vec<Event> = records
        .iter()
        .filter(|r| r.has(Event::FIELD_LATITUDE) && r.has(Event::FIELD_DATE))
        .filter_map(|r| match Event::from_record(r) {
            Ok(event) => Some(event),
            Err(e) => {
                log::warn!("Skipping malformed event: {e}");
                None
            }
        })
        .filter(Event::validate)
        .collect();

    log::debug!("Built {} valid events from {} items", events.len(), records.len());

    events
}
