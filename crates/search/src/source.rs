//! Candidate-loading collaborator seam.

use crate::error::Result;
use crate::route::RideCandidate;
use chrono::NaiveDate;
use std::future::Future;

/// Supplies the rides a search considers.
///
/// Called once per search. Failures abort the search as
/// [`SearchError::CandidateSource`](crate::SearchError::CandidateSource).
pub trait CandidateSource: Sync {
    /// Rides departing on `date`, or every ride when no date is given.
    fn load(&self, date: Option<NaiveDate>) -> impl Future<Output = Result<Vec<RideCandidate>>> + Send;
}

/// Rides held in memory, filtered by departure date.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRides {
    rides: Vec<RideCandidate>,
}

impl InMemoryRides {
    /// A source over `rides`.
    pub fn new(rides: Vec<RideCandidate>) -> Self {
        Self { rides }
    }

    /// Number of rides held.
    pub fn len(&self) -> usize {
        self.rides.len()
    }

    /// True when no rides are held.
    pub fn is_empty(&self) -> bool {
        self.rides.is_empty()
    }

    /// Rides matching `date`. Rides without a declared date match any date.
    pub fn on(&self, date: Option<NaiveDate>) -> Vec<RideCandidate> {
        self.rides
            .iter()
            .filter(|ride| {
                date.is_none_or(|day| ride.details.departure_date.is_none_or(|departs| departs == day))
            })
            .cloned()
            .collect()
    }
}

impl CandidateSource for InMemoryRides {
    fn load(&self, date: Option<NaiveDate>) -> impl Future<Output = Result<Vec<RideCandidate>>> + Send {
        std::future::ready(Ok(self.on(date)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::{RideDetails, Route};

    fn ride(id: &str, date: Option<NaiveDate>) -> RideCandidate {
        RideCandidate::new(id, Route::fixed(vec![], 1000.0, 50.0)).with_details(RideDetails {
            departure_date: date,
            ..RideDetails::default()
        })
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_date_filter() {
        let source = InMemoryRides::new(vec![
            ride("a", Some(day(1))),
            ride("b", Some(day(2))),
            ride("c", None),
        ]);

        let ids = |rides: Vec<RideCandidate>| rides.into_iter().map(|r| r.ride_id).collect::<Vec<_>>();
        assert_eq!(ids(source.on(Some(day(1)))), vec!["a", "c"]);
        assert_eq!(ids(source.on(None)), vec!["a", "b", "c"]);
        assert_eq!(ids(source.on(Some(day(9)))), vec!["c"]);
    }

    #[tokio::test]
    async fn test_load_resolves_immediately() {
        let source = InMemoryRides::new(vec![ride("a", Some(day(1)))]);
        let rides = source.load(Some(day(1))).await.unwrap();
        assert_eq!(rides.len(), 1);
    }
}
