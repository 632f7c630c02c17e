#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Event report assembly.
//!
//! Turns the three raw feeds into report rows: valid events that pass the
//! [`EventFilter`], each paired with the nearest stations that have free
//! slots, the nearest stations that have bikes, and the nearest real
//! parkings. [`html::render_html`] formats the rows as an HTML table.

pub mod html;

use cerca_models::{Event, Parking, RawRecord, Station, build_events, build_parkings, build_stations};
use cerca_proximity::{Nearby, ProximityPolicy, nearest};
use cerca_query::EventFilter;
use serde::Serialize;

/// One event and the facilities around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub event: Event,
    /// Nearest stations with at least one free dock.
    pub free_slot_stations: Vec<Nearby<Station>>,
    /// Nearest stations with at least one bike.
    pub bike_stations: Vec<Nearby<Station>>,
    /// Nearest parkings with a real identifier.
    pub parkings: Vec<Nearby<Parking>>,
}

fn owned<T: Clone>(found: Vec<Nearby<&T>>) -> Vec<Nearby<T>> {
    found.into_iter().map(Nearby::cloned).collect()
}

/// Pairs each event with its nearby facilities, keeping event order.
#[must_use]
pub fn assemble(
    events: Vec<Event>,
    stations: &[Station],
    parkings: &[Parking],
    policy: &ProximityPolicy,
) -> Vec<ReportRow> {
    events
        .into_iter()
        .map(|event| ReportRow {
            free_slot_stations: owned(nearest(&event, stations, policy, Station::has_free_slots)),
            bike_stations: owned(nearest(&event, stations, policy, Station::has_bikes)),
            parkings: owned(nearest(&event, parkings, policy, Parking::is_available)),
            event,
        })
        .collect()
}

/// Builds entities from the raw feeds, filters the events and assembles
/// the report rows.
///
/// Empty feeds produce an empty report.
#[must_use]
pub fn build_report(
    event_records: &[RawRecord],
    station_records: &[RawRecord],
    parking_records: &[RawRecord],
    filter: &EventFilter,
    policy: &ProximityPolicy,
) -> Vec<ReportRow> {
    let events = build_events(event_records);
    let valid_count = events.len();
    let events: Vec<Event> = events.into_iter().filter(|e| filter.accepts(e)).collect();
    let stations = build_stations(station_records);
    let parkings = build_parkings(parking_records);

    log::info!(
        "{} of {valid_count} valid events match the query ({} stations, {} parkings)",
        events.len(),
        stations.len(),
        parkings.len()
    );

    assemble(events, &stations, &parkings, policy)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_record(name: &str, lat: &str, lon: &str) -> RawRecord {
        [
            ("gmapx", lat),
            ("gmapy", lon),
            ("proxdate", "10/03/2017"),
            ("proxhour", "19.00 h"),
            ("name", name),
            ("address", "carrer major 1"),
            ("institutionname", "sala apolo"),
        ]
        .into_iter()
        .collect()
    }

    fn station_record(id: &str, lat: &str, lon: &str, slots: &str, bikes: &str) -> RawRecord {
        [
            ("id", id),
            ("lat", lat),
            ("long", lon),
            ("slots", slots),
            ("bikes", bikes),
        ]
        .into_iter()
        .collect()
    }

    fn parking_record(id: &str, lat: &str, lon: &str) -> RawRecord {
        [("id", id), ("gmapx", lat), ("gmapy", lon)].into_iter().collect()
    }

    #[test]
    fn builds_rows_in_feed_order() {
        let events = vec![
            event_record("Jazz Night", "41.3800", "2.1700"),
            event_record("Poetry Reading", "41.3900", "2.1700"),
            event_record("Invalid", "0", "2.1700"),
            event_record("Jazz Matinee", "41.4000", "2.1700"),
        ];
        let stations = vec![
            station_record("1", "41.3810", "2.1700", "3", "0"),
            station_record("2", "41.3820", "2.1700", "0", "4"),
            station_record("3", "42.5000", "2.1700", "5", "5"),
        ];
        let parkings = vec![
            parking_record("0", "41.3800", "2.1700"),
            parking_record("77", "41.3850", "2.1700"),
        ];
        let filter = EventFilter::parse(Some("'jazz'"), None).unwrap();

        let rows = build_report(
            &events,
            &stations,
            &parkings,
            &filter,
            &ProximityPolicy::default(),
        );

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].event.name, "jazz night");
        assert_eq!(rows[1].event.name, "jazz matinee");

        let first = &rows[0];
        let ids = |v: &[Nearby<Station>]| v.iter().map(|n| n.item.id).collect::<Vec<_>>();
        assert_eq!(ids(&first.free_slot_stations), vec![1]);
        assert_eq!(ids(&first.bike_stations), vec![2]);
        assert_eq!(first.parkings.len(), 1);
        assert_eq!(first.parkings[0].item.id, 77);
    }

    #[test]
    fn empty_feeds_produce_empty_report() {
        let rows = build_report(
            &[],
            &[],
            &[],
            &EventFilter::default(),
            &ProximityPolicy::default(),
        );
        assert!(rows.is_empty());
    }

    #[test]
    fn events_without_facilities_still_appear() {
        let events = vec![event_record("Jazz Night", "41.38", "2.17")];
        let rows = build_report(
            &events,
            &[],
            &[],
            &EventFilter::default(),
            &ProximityPolicy::default(),
        );
        assert_eq!(rows.len(), 1);
        assert!(rows[0].free_slot_stations.is_empty());
        assert!(rows[0].bike_stations.is_empty());
        assert!(rows[0].parkings.is_empty());
    }
}
