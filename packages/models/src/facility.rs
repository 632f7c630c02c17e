use cerca_geo::{Located, Point};
use serde::{Deserialize, Serialize};

use crate::parsing::{parse_id, parse_number, parse_positive};
use crate::{EntityError, RawRecord};

/// A bike-share station from the Bicing feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// At least one free dock to leave a bike.
    pub has_free_slots: bool,
    /// At least one bike ready to be taken.
    pub has_bikes: bool,
}

impl Station {
    /// Builds a station from a raw `<station>` element.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] if a numeric field is present but malformed.
    pub fn from_record(record: &RawRecord) -> Result<Self, EntityError> {
        Ok(Self {
            id: parse_id(record, "id")?,
            latitude: parse_number(record, "lat")?,
            longitude: parse_number(record, "long")?,
            has_free_slots: parse_positive(record, "slots")?,
            has_bikes: parse_positive(record, "bikes")?,
        })
    }

    #[must_use]
    pub const fn has_free_slots(&self) -> bool {
        self.has_free_slots
    }

    #[must_use]
    pub const fn has_bikes(&self) -> bool {
        self.has_bikes
    }
}

impl Located for Station {
    fn position(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// A public parking lot from the parkings feed.
///
/// An `id` of `0` marks an entry that is not an actual parking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parking {
    pub id: u64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Parking {
    /// Builds a parking from a raw parkings feed item.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError`] if a numeric field is present but malformed.
    pub fn from_record(record: &RawRecord) -> Result<Self, EntityError> {
        Ok(Self {
            id: parse_id(record, "id")?,
            latitude: parse_number(record, "gmapx")?,
            longitude: parse_number(record, "gmapy")?,
        })
    }

    /// Whether this entry is a real parking (non-zero id).
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.id != 0
    }
}

impl Located for Parking {
    fn position(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

fn build_all<T>(
    records: &[RawRecord],
    kind: &str,
    from_record: fn(&RawRecord) -> Result<T, EntityError>,
) -> Vec<T> {
    records
        .iter()
        .filter_map(|r| {
            from_record(r)
                .inspect_err(|e| log::warn!("Skipping malformed {kind}: {e}"))
                .ok()
        })
        .collect()
}

/// Builds every well-formed station, preserving feed order.
#[must_use]
pub fn build_stations(records: &[RawRecord]) -> Vec<Station> {
    build_all(records, "station", Station::from_record)
}

/// Builds every well-formed parking, preserving feed order.
#[must_use]
pub fn build_parkings(records: &[RawRecord]) -> Vec<Parking> {
    build_all(records, "parking", Parking::from_record)
}
