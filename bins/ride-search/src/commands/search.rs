//! Search command - match posted rides against a journey

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use owo_colors::OwoColorize;
use rideshare_core::config::{EngineConfig, OtherResults};
use rideshare_core::error::{Error as CoreError, ErrorReport};
use rideshare_geo::GeoPoint;
use rideshare_search::{
    search, Amenity, CancellationToken, InMemoryRides, SearchCandidate, SearchFilters, SearchOptions,
    SearchOutcome, SearchQuery, StaticGeocoder, VehicleType,
};
use rideshare_telemetry::{metrics, Event, Timer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::fixtures;
use crate::output::{format_duration, format_fare, format_km, Status};

const CONNECTED_METRIC: &str = "search.connected";
const OTHER_METRIC: &str = "search.other";
const ISSUES_METRIC: &str = "search.issues";
const DURATION_METRIC: &str = "search.duration_ms";
const RESULTS_GAUGE: &str = "search.results";

/// Arguments for `ride-search search`
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Posted rides (JSON array)
    #[arg(long)]
    rides: PathBuf,

    /// Gazetteer used to resolve place names (JSON array)
    #[arg(long)]
    places: PathBuf,

    /// Where the passenger boards
    #[arg(long)]
    from: String,

    /// Where the passenger alights
    #[arg(long)]
    to: String,

    /// Travel date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Seats wanted; also prices a booking quote
    #[arg(long)]
    seats: Option<u32>,

    /// Highest acceptable fare per seat
    #[arg(long)]
    max_fare: Option<f64>,

    /// Required vehicle type (hatchback, sedan, suv, muv, bike)
    #[arg(long, value_parser = parse_keyword::<VehicleType>)]
    vehicle: Option<VehicleType>,

    /// Required amenity; repeat for several
    #[arg(long = "amenity", value_parser = parse_keyword::<Amenity>)]
    amenities: Vec<Amenity>,

    /// Anchor tolerance in meters, overriding the configuration
    #[arg(long)]
    tolerance: Option<f64>,

    /// Unmatched rides policy (keep-all, same-city-pair, drop)
    #[arg(long, value_parser = parse_keyword::<OtherResults>)]
    other: Option<OtherResults>,

    /// Classify on a single thread
    #[arg(long)]
    sequential: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print collected metrics to stderr
    #[arg(long)]
    metrics: bool,
}

impl SearchArgs {
    fn query(&self) -> SearchQuery {
        let mut filters = SearchFilters::new();
        if let Some(seats) = self.seats {
            filters = filters.with_min_seats(seats);
        }
        if let Some(max_fare) = self.max_fare {
            filters = filters.with_max_fare(max_fare);
        }
        if let Some(vehicle) = self.vehicle {
            filters = filters.with_vehicle_type(vehicle);
        }
        for amenity in &self.amenities {
            filters = filters.with_amenity(*amenity);
        }

        let query = SearchQuery::new(&self.from, &self.to).with_filters(filters);
        match self.date {
            Some(date) => query.on(date),
            None => query,
        }
    }

    fn options(&self, engine: &EngineConfig) -> SearchOptions {
        let mut options = SearchOptions::from(engine);
        if let Some(tolerance) = self.tolerance {
            options = options.with_tolerance(tolerance);
        }
        if let Some(policy) = self.other {
            options = options.with_other_results(policy);
        }
        if self.sequential {
            options = options.with_parallel(false);
        }
        options
    }
}

/// Parse a snake_case or kebab-case keyword into one of the serde enums
fn parse_keyword<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    let keyword = raw.trim().to_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(keyword)).map_err(|_| format!("unknown value '{raw}'"))
}

/// JSON output for a search
#[derive(Debug, Serialize)]
struct JsonSearchOutput<'a> {
    origin: GeoPoint,
    destination: GeoPoint,
    connected: usize,
    results: &'a [SearchCandidate],
    issues: Vec<ErrorReport>,
    duration_ms: u64,
}

/// Run search command
pub async fn run(args: SearchArgs, engine: &EngineConfig) -> Result<()> {
    let rides = fixtures::load_rides(&args.rides)?;
    let places = fixtures::load_places(&args.places)?;
    tracing::debug!(rides = rides.len(), places = places.len(), "Fixtures loaded");

    let geocoder = StaticGeocoder::new(places);
    let source = InMemoryRides::new(rides);
    let query = args.query();
    let options = args.options(engine);

    let cancel = CancellationToken::new();
    let interrupt = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let timer = Timer::start(DURATION_METRIC);
    let result = search(&query, &geocoder, &source, &options, &cancel).await;
    let elapsed = timer.stop();
    interrupt.abort();

    let outcome = result.map_err(CoreError::from)?;
    record_metrics(&outcome);
    Event::new(
        "search.completed",
        serde_json::json!({
            "from": query.origin_text,
            "to": query.destination_text,
            "connected": outcome.connected_count(),
            "results": outcome.results.len(),
            "issues": outcome.issues.len(),
        }),
    )
    .log();

    if args.json {
        let output = JsonSearchOutput {
            origin: outcome.origin,
            destination: outcome.destination,
            connected: outcome.connected_count(),
            results: &outcome.results,
            issues: outcome.issues.iter().map(|issue| issue.report()).collect(),
            duration_ms: elapsed.as_millis() as u64,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_outcome(&query, &outcome, &engine.fare.currency, elapsed);
    }

    if args.metrics {
        eprintln!("{}", serde_json::to_string_pretty(&metrics().export_json())?);
    }

    Ok(())
}

fn record_metrics(outcome: &SearchOutcome) {
    let connected = outcome.connected_count();
    let registry = metrics();
    registry.increment_by(CONNECTED_METRIC, connected as u64);
    registry.increment_by(OTHER_METRIC, (outcome.results.len() - connected) as u64);
    registry.increment_by(ISSUES_METRIC, outcome.issues.len() as u64);
    registry.gauge(RESULTS_GAUGE, outcome.results.len() as u64);
}

fn print_outcome(query: &SearchQuery, outcome: &SearchOutcome, currency: &str, elapsed: Duration) {
    Status::header(&format!("Rides from {} to {}", query.origin_text, query.destination_text));
    println!(
        "  {} {}  {} {}",
        "from".dimmed(),
        outcome.origin,
        "to".dimmed(),
        outcome.destination
    );

    let connected: Vec<_> = outcome.connected().collect();
    if connected.is_empty() {
        Status::info("No ride covers this journey");
    } else {
        Status::subheader("Connected");
        for (rank, candidate) in connected.iter().enumerate() {
            print_connected(rank + 1, candidate, currency);
        }
    }

    let others: Vec<_> = outcome.others().collect();
    if !others.is_empty() {
        Status::subheader("Other rides");
        for candidate in others {
            let details = &candidate.ride.details;
            println!(
                "  {:<20} {} → {}  {}",
                candidate.ride_id().dimmed(),
                details.origin_city,
                details.destination_city,
                format_fare(candidate.ride.route.base_fare_per_seat, currency).dimmed()
            );
        }
    }

    for issue in &outcome.issues {
        Status::warning(&format!("ride {} skipped: {}", issue.ride_id, issue.error));
    }

    println!();
    Status::success(&format!(
        "{} connected, {} other in {}",
        connected.len(),
        outcome.results.len() - connected.len(),
        format_duration(elapsed)
    ));
}

fn print_connected(rank: usize, candidate: &SearchCandidate, currency: &str) {
    let fare = candidate
        .segment_fare
        .map(|fare| format_fare(fare, currency))
        .unwrap_or_default();
    let distance = candidate
        .route_match
        .as_ref()
        .map(|m| format_km(m.segment_distance_meters))
        .unwrap_or_default();

    println!(
        "  {:>2}. {:<20} {:>10} per seat  {:>9}  quality {:.2}",
        rank,
        candidate.ride_id().cyan(),
        fare.green(),
        distance,
        candidate.match_quality
    );

    if let Some(quote) = &candidate.quote {
        println!(
            "      {} seat(s): {} + fee {} + GST {} = {}",
            quote.seats,
            format_fare(quote.subtotal, currency),
            format_fare(quote.platform_fee, currency),
            format_fare(quote.gst, currency),
            format_fare(quote.total, currency).bold()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keyword() {
        assert_eq!(parse_keyword::<VehicleType>("SUV").unwrap(), VehicleType::Suv);
        assert_eq!(
            parse_keyword::<Amenity>("air-conditioning").unwrap(),
            Amenity::AirConditioning
        );
        assert_eq!(
            parse_keyword::<OtherResults>("same_city_pair").unwrap(),
            OtherResults::SameCityPair
        );
        assert!(parse_keyword::<VehicleType>("rickshaw").is_err());
    }
}
