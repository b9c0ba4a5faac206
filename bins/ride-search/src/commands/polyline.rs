//! Polyline decode and encode commands

use anyhow::Result;
use owo_colors::OwoColorize;
use rideshare_core::error::Error as CoreError;
use rideshare_geo::{decode_with_precision, encode_with_precision, path_length_meters, GeoPoint};
use rideshare_search::SearchError;

use crate::output::format_km;

/// Run the decode command
pub fn decode(encoded: &str, precision: u32, json: bool) -> Result<()> {
    rideshare_telemetry::timed_span!("polyline.decode", precision);
    let points = decode_with_precision(encoded, precision).map_err(into_core)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    let places = precision as usize;
    for point in &points {
        println!("{:.*},{:.*}", places, point.lat, places, point.lng);
    }
    eprintln!(
        "{}",
        format!("{} points, {}", points.len(), format_km(path_length_meters(&points))).dimmed()
    );
    Ok(())
}

/// Run the encode command
pub fn encode(raw_points: &[String], precision: u32) -> Result<()> {
    rideshare_telemetry::timed_span!("polyline.encode", precision);
    let points = raw_points
        .iter()
        .map(|raw| parse_point(raw))
        .collect::<Result<Vec<_>, _>>()?;

    let encoded = encode_with_precision(&points, precision).map_err(into_core)?;
    println!("{encoded}");
    Ok(())
}

/// Parse `lat,lng` into a validated point
fn parse_point(raw: &str) -> Result<GeoPoint, CoreError> {
    let invalid = || CoreError::validation(format!("'{raw}' is not a lat,lng pair"));

    let (lat, lng) = raw.split_once(',').ok_or_else(invalid)?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid())?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid())?;

    GeoPoint::new(lat, lng).validated().map_err(into_core)
}

fn into_core(err: rideshare_geo::GeoError) -> CoreError {
    SearchError::from(err).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rideshare_core::ErrorCode;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("12.97, 77.59").unwrap(), GeoPoint::new(12.97, 77.59));
        assert_eq!(parse_point("-33.9,18.4").unwrap(), GeoPoint::new(-33.9, 18.4));
    }

    #[test]
    fn test_parse_point_rejects_garbage() {
        assert_eq!(parse_point("12.97").unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(parse_point("north,east").unwrap_err().code, ErrorCode::ValidationError);
        assert_eq!(parse_point("95.0,10.0").unwrap_err().code, ErrorCode::InvalidInput);
    }
}
