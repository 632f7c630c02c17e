#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Radius-bounded nearest-K search.
//!
//! Given an origin and a candidate set, [`nearest`] keeps the candidates
//! that pass a predicate and lie strictly closer than
//! [`ProximityPolicy::max_km`], orders them by great-circle distance and
//! returns at most [`ProximityPolicy::top_k`] of them.

use cerca_geo::{Located, distance_between};
use serde::Serialize;

/// Search radius used when none is configured.
pub const DEFAULT_MAX_KM: f64 = 5.0;

/// Result count used when none is configured.
pub const DEFAULT_TOP_K: usize = 5;

/// How far and how many results a proximity search returns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityPolicy {
    /// Candidates at or beyond this distance are excluded.
    pub max_km: f64,
    /// Maximum number of candidates returned.
    pub top_k: usize,
}

impl Default for ProximityPolicy {
    fn default() -> Self {
        Self {
            max_km: DEFAULT_MAX_KM,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// A candidate together with its distance from the search origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nearby<T> {
    pub item: T,
    pub distance_km: f64,
}

impl<T: Clone> Nearby<&T> {
    /// Detaches the result from the candidate slice.
    #[must_use]
    pub fn cloned(self) -> Nearby<T> {
        Nearby {
            item: self.item.clone(),
            distance_km: self.distance_km,
        }
    }
}

/// Returns the candidates nearest to `origin` that satisfy `predicate`.
///
/// Results are sorted by ascending distance; candidates at equal distance
/// keep their input order. Returns an empty vector when nothing qualifies.
pub fn nearest<'a, O, C, P>(
    origin: &O,
    candidates: &'a [C],
    policy: &ProximityPolicy,
    predicate: P,
) -> Vec<Nearby<&'a C>>
where
    O: Located + ?Sized,
    C: Located,
    P: Fn(&C) -> bool,
{
    let from = origin.position();

    let mut found: Vec<Nearby<&C>> = candidates
        .iter()
        .filter(|c| predicate(*c))
        .map(|c| Nearby {
            item: c,
            distance_km: distance_between(from, c.position()),
        })
        .filter(|n| n.distance_km < policy.max_km)
        .collect();

    found.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    found.truncate(policy.top_k);

    log::trace!(
        "{} of {} candidates within {} km",
        found.len(),
        candidates.len(),
        policy.max_km
    );

    found
}

#[cfg(test)]
mod tests {
    use cerca_geo::{EARTH_RADIUS_KM, Point};
    use cerca_models::{Parking, Station};

    use super::*;

    const ORIGIN_LAT: f64 = 41.38;
    const ORIGIN_LON: f64 = 2.17;

    fn origin() -> Point<f64> {
        Point::new(ORIGIN_LON, ORIGIN_LAT)
    }

    /// Latitude `km` kilometers due north of the origin.
    fn lat_north(km: f64) -> f64 {
        ORIGIN_LAT + (km / EARTH_RADIUS_KM).to_degrees()
    }

    fn station(id: u64, km_north: f64, slots: bool, bikes: bool) -> Station {
        Station {
            id,
            latitude: lat_north(km_north),
            longitude: ORIGIN_LON,
            has_free_slots: slots,
            has_bikes: bikes,
        }
    }

    fn ids(found: &[Nearby<&Station>]) -> Vec<u64> {
        found.iter().map(|n| n.item.id).collect()
    }

    #[test]
    fn keeps_candidates_under_radius_in_ascending_order() {
        let stations = vec![
            station(4, 6.0, true, true),
            station(2, 3.0, true, true),
            station(3, 4.9, true, true),
            station(1, 1.2, true, true),
        ];
        let found = nearest(&origin(), &stations, &ProximityPolicy::default(), |_| true);
        assert_eq!(ids(&found), vec![1, 2, 3]);
        assert!((found[0].distance_km - 1.2).abs() < 1e-6);
        assert!((found[2].distance_km - 4.9).abs() < 1e-6);
    }

    #[test]
    fn applies_predicate() {
        let stations = vec![
            station(1, 0.5, false, true),
            station(2, 1.0, true, false),
            station(3, 1.5, true, true),
        ];
        let policy = ProximityPolicy::default();
        assert_eq!(
            ids(&nearest(&origin(), &stations, &policy, Station::has_free_slots)),
            vec![2, 3]
        );
        assert_eq!(
            ids(&nearest(&origin(), &stations, &policy, Station::has_bikes)),
            vec![1, 3]
        );
    }

    #[test]
    fn truncates_to_top_k() {
        let stations: Vec<Station> = (1..=8u32)
            .rev()
            .map(|i| station(u64::from(i), f64::from(i) * 0.3, true, true))
            .collect();
        let policy = ProximityPolicy {
            max_km: 5.0,
            top_k: 5,
        };
        let found = nearest(&origin(), &stations, &policy, |_| true);
        assert_eq!(ids(&found), vec![1, 2, 3, 4, 5]);
        assert!(found.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
    }

    #[test]
    fn radius_is_strict() {
        let stations = vec![station(1, 2.0, true, true)];
        let policy = ProximityPolicy {
            max_km: distance_between(origin(), stations[0].position()),
            top_k: 5,
        };
        assert!(nearest(&origin(), &stations, &policy, |_| true).is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let stations = vec![
            station(7, 1.0, true, true),
            station(3, 1.0, true, true),
            station(5, 1.0, true, true),
        ];
        let found = nearest(&origin(), &stations, &ProximityPolicy::default(), |_| true);
        assert_eq!(ids(&found), vec![7, 3, 5]);
    }

    #[test]
    fn placeholder_parkings_are_never_returned() {
        let parkings = vec![
            Parking {
                id: 0,
                latitude: ORIGIN_LAT,
                longitude: ORIGIN_LON,
            },
            Parking {
                id: 12,
                latitude: lat_north(2.0),
                longitude: ORIGIN_LON,
            },
        ];
        let found = nearest(
            &origin(),
            &parkings,
            &ProximityPolicy::default(),
            Parking::is_available,
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].item.id, 12);
    }

    #[test]
    fn empty_or_zero_k_returns_nothing() {
        let none: Vec<Station> = Vec::new();
        assert!(nearest(&origin(), &none, &ProximityPolicy::default(), |_| true).is_empty());

        let stations = vec![station(1, 1.0, true, true)];
        let policy = ProximityPolicy {
            max_km: 5.0,
            top_k: 0,
        };
        assert!(nearest(&origin(), &stations, &policy, |_| true).is_empty());
    }

    #[test]
    fn cloned_detaches_from_slice() {
        let stations = vec![station(9, 1.0, true, true)];
        let owned: Vec<Nearby<Station>> =
            nearest(&origin(), &stations, &ProximityPolicy::default(), |_| true)
                .into_iter()
                .map(Nearby::cloned)
                .collect();
        drop(stations);
        assert_eq!(owned[0].item.id, 9);
    }
}
