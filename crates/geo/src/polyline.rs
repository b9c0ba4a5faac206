//! Encoded polyline codec.
//!
//! Routes are exchanged as delta-encoded polylines: each coordinate is scaled
//! by `10^precision`, rounded, stored as the difference from the previous
//! coordinate, zig-zag encoded, and written as 5-bit chunks offset into the
//! printable range `?`..=`~`. Latitude precedes longitude in every pair.
//!
//! The routing provider emits precision 5; some providers use 6.

use crate::error::DecodeFailure;
use crate::{GeoError, GeoPoint, Result};

/// Default number of decimal places carried by an encoded polyline.
pub const DEFAULT_PRECISION: u32 = 5;

const MAX_PRECISION: u32 = 10;
const CHUNK_BITS: u32 = 5;
const CHUNK_MASK: u64 = 0x1f;
const CONTINUATION: u64 = 0x20;
const ASCII_OFFSET: u8 = 63;
const ASCII_MAX: u8 = b'~';

/// Decodes a polyline at the default precision.
///
/// # Example
/// ```
/// use rideshare_geo::polyline::decode;
///
/// let points = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();
/// assert_eq!(points.len(), 3);
/// assert!((points[0].lat - 38.5).abs() < 1e-9);
/// assert!((points[0].lng + 120.2).abs() < 1e-9);
/// ```
pub fn decode(encoded: &str) -> Result<Vec<GeoPoint>> {
    decode_with_precision(encoded, DEFAULT_PRECISION)
}

/// Decodes a polyline written with `precision` decimal places.
///
/// The empty string decodes to an empty sequence.
pub fn decode_with_precision(encoded: &str, precision: u32) -> Result<Vec<GeoPoint>> {
    let factor = scale_factor(precision)?;
    let bytes = encoded.as_bytes();

    let mut points = Vec::with_capacity(bytes.len() / 4);
    let mut position = 0;
    let mut lat = 0i64;
    let mut lng = 0i64;

    while position < bytes.len() {
        let lat_start = position;
        let (d_lat, next) = read_value(bytes, lat_start)?;
        if next >= bytes.len() {
            return Err(GeoError::decode(next, DecodeFailure::TruncatedPair));
        }
        let lng_start = next;
        let (d_lng, next) = read_value(bytes, lng_start)?;
        position = next;

        lat = lat
            .checked_add(d_lat)
            .ok_or_else(|| GeoError::decode(lat_start, DecodeFailure::Overflow))?;
        lng = lng
            .checked_add(d_lng)
            .ok_or_else(|| GeoError::decode(lng_start, DecodeFailure::Overflow))?;
        points.push(GeoPoint::new(lat as f64 / factor, lng as f64 / factor));
    }

    Ok(points)
}

/// Encodes points at the default precision.
///
/// ```
/// use rideshare_geo::{polyline::encode, GeoPoint};
///
/// let points = [
///     GeoPoint::new(38.5, -120.2),
///     GeoPoint::new(40.7, -120.95),
///     GeoPoint::new(43.252, -126.453),
/// ];
/// assert_eq!(encode(&points), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// ```
pub fn encode(points: &[GeoPoint]) -> String {
    encode_scaled(points, 10f64.powi(DEFAULT_PRECISION as i32))
}

/// Encodes points with `precision` decimal places.
pub fn encode_with_precision(points: &[GeoPoint], precision: u32) -> Result<String> {
    Ok(encode_scaled(points, scale_factor(precision)?))
}

fn encode_scaled(points: &[GeoPoint], factor: f64) -> String {
    let mut out = String::with_capacity(points.len() * 8);
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for point in points {
        let lat = (point.lat * factor).round() as i64;
        let lng = (point.lng * factor).round() as i64;

        write_value(lat - prev_lat, &mut out);
        write_value(lng - prev_lng, &mut out);

        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

fn scale_factor(precision: u32) -> Result<f64> {
    if precision > MAX_PRECISION {
        return Err(GeoError::InvalidPrecision(precision));
    }
    Ok(10f64.powi(precision as i32))
}

/// Reads one zig-zag encoded value starting at `start`.
///
/// Returns the signed value and the offset just past it.
fn read_value(bytes: &[u8], start: usize) -> Result<(i64, usize)> {
    let mut result = 0u64;
    let mut shift = 0u32;
    let mut position = start;

    loop {
        let Some(&byte) = bytes.get(position) else {
            return Err(GeoError::decode(position, DecodeFailure::UnterminatedValue));
        };
        if !(ASCII_OFFSET..=ASCII_MAX).contains(&byte) {
            return Err(GeoError::decode(position, DecodeFailure::InvalidByte(byte)));
        }
        if shift >= 60 {
            return Err(GeoError::decode(position, DecodeFailure::Overflow));
        }

        let chunk = u64::from(byte - ASCII_OFFSET);
        result |= (chunk & CHUNK_MASK) << shift;
        shift += CHUNK_BITS;
        position += 1;

        if chunk & CONTINUATION == 0 {
            break;
        }
    }

    let value = if result & 1 == 1 {
        !(result >> 1) as i64
    } else {
        (result >> 1) as i64
    };

    Ok((value, position))
}

fn write_value(value: i64, out: &mut String) {
    let mut v = (value << 1) as u64;
    if value < 0 {
        v = !v;
    }

    while v >= CONTINUATION {
        out.push(char::from((CONTINUATION | (v & CHUNK_MASK)) as u8 + ASCII_OFFSET));
        v >>= CHUNK_BITS;
    }
    out.push(char::from(v as u8 + ASCII_OFFSET));
}
