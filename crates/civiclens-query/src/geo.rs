//! Proximity queries over issue locations.

use std::cmp::Ordering;

use civiclens_core::GeoPoint;
use civiclens_store::StateStore;

/// Rough meters per degree of latitude, for the bounding-box prefilter.
const METERS_PER_DEGREE_LAT: f64 = 111_000.0;

/// Widens the prefilter window so the exact distance check is the only
/// thing that decides membership.
const WINDOW_SLACK: f64 = 1.25;

/// Errors from a proximity backend.
#[derive(Debug, thiserror::Error)]
pub enum GeoQueryError {
    #[error("proximity backend unavailable: {0}")]
    Unavailable(String),
}

/// An issue found inside a query radius.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyIssue {
    pub issue_id: String,
    pub title: String,
    pub distance_meters: f64,
}

/// The proximity seam.
///
/// Creation-time duplicate detection depends on this and fails closed when
/// the source errors, so fallible backends must report outages rather than
/// answer with partial rows.
pub trait ProximitySource {
    fn issues_within(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<NearbyIssue>, GeoQueryError>;
}

#[derive(Debug, Clone)]
struct IndexedIssue {
    issue_id: String,
    title: String,
    location: GeoPoint,
}

/// In-memory proximity index hydrated from canonical state.
///
/// Radius queries prefilter with a latitude/longitude degree window, then
/// refine with the exact metric distance. Results order by distance with
/// issue id as the tie-break.
#[derive(Debug, Clone, Default)]
pub struct GeoIndex {
    rows: Vec<IndexedIssue>,
}

impl GeoIndex {
    /// Hydrate the index from canonical memory state.
    pub fn hydrate(store: &StateStore) -> Self {
        let rows = store
            .issues()
            .map(|issue| IndexedIssue {
                issue_id: issue.id.clone(),
                title: issue.title.clone(),
                location: issue.location(),
            })
            .collect();
        GeoIndex { rows }
    }
}

impl ProximitySource for GeoIndex {
    /// The in-memory index itself cannot fail; the `Result` belongs to the
    /// seam so backends with real outage modes fit behind it.
    fn issues_within(
        &self,
        center: GeoPoint,
        radius_meters: f64,
    ) -> Result<Vec<NearbyIssue>, GeoQueryError> {
        let lat_delta = (radius_meters / METERS_PER_DEGREE_LAT) * WINDOW_SLACK;
        // One longitude degree shrinks with latitude; clamp the cosine away
        // from zero so polar centers degrade to a full-longitude window.
        let lng_scale = center.latitude.to_radians().cos().abs().max(1e-6);
        let lng_delta = (radius_meters / (METERS_PER_DEGREE_LAT * lng_scale)) * WINDOW_SLACK;

        let mut hits: Vec<NearbyIssue> = self
            .rows
            .iter()
            .filter(|row| {
                (row.location.latitude - center.latitude).abs() <= lat_delta
                    && (row.location.longitude - center.longitude).abs() <= lng_delta
            })
            .filter_map(|row| {
                let distance_meters = center.distance_meters(&row.location);
                (distance_meters <= radius_meters).then(|| NearbyIssue {
                    issue_id: row.issue_id.clone(),
                    title: row.title.clone(),
                    distance_meters,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance_meters
                .partial_cmp(&b.distance_meters)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.issue_id.cmp(&b.issue_id))
        });
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use civiclens_store::Issue;

    fn store_with_issues(points: &[(&str, f64, f64)]) -> StateStore {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mut store = StateStore::default();
        for (title, lat, lng) in points {
            store.upsert_issue(Issue::new(
                *title,
                "Fixture description text.",
                "roads",
                "user-1",
                GeoPoint::new(*lat, *lng),
                now,
            ));
        }
        store
    }

    #[test]
    fn finds_only_issues_inside_the_radius() {
        let store = store_with_issues(&[
            ("near", 40.7129, -74.0061),
            ("far", 40.7228, -74.0060),
        ]);
        let index = GeoIndex::hydrate(&store);

        let hits = index
            .issues_within(GeoPoint::new(40.7128, -74.0060), 100.0)
            .expect("in-memory query succeeds");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "near");
        assert!(hits[0].distance_meters < 100.0);
    }

    #[test]
    fn orders_hits_nearest_first() {
        let store = store_with_issues(&[
            ("second", 40.7133, -74.0060),
            ("first", 40.7129, -74.0060),
        ]);
        let index = GeoIndex::hydrate(&store);

        let hits = index
            .issues_within(GeoPoint::new(40.7128, -74.0060), 150.0)
            .expect("in-memory query succeeds");

        let titles: Vec<&str> = hits.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn prefilter_keeps_points_near_the_radius_boundary() {
        // ~99 m due north of the center.
        let store = store_with_issues(&[("edge", 40.71369, -74.0060)]);
        let index = GeoIndex::hydrate(&store);

        let hits = index
            .issues_within(GeoPoint::new(40.7128, -74.0060), 100.0)
            .expect("in-memory query succeeds");
        assert_eq!(hits.len(), 1, "boundary point must survive the prefilter");
    }

    #[test]
    fn longitude_window_accounts_for_latitude() {
        // At latitude 80 a thousandth of a longitude degree is ~19 m.
        let store = store_with_issues(&[("polar", 80.0, 20.001)]);
        let index = GeoIndex::hydrate(&store);

        let hits = index
            .issues_within(GeoPoint::new(80.0, 20.0), 100.0)
            .expect("in-memory query succeeds");
        assert_eq!(hits.len(), 1);
        assert!(hits[0].distance_meters < 30.0);
    }
}
