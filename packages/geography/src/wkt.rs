//! Well-known-text point encoding used by the report store.

use air_map_geography_models::Coordinates;
use thiserror::Error;

/// Errors from [`parse_point`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WktError {
    /// The text was not of the form `POINT(lng lat)`.
    #[error("Malformed WKT point: {0}")]
    Malformed(String),
}

/// Encodes a position as `POINT(lng lat)`.
#[must_use]
pub fn point(coords: Coordinates) -> String {
    format!("POINT({} {})", coords.lng, coords.lat)
}

/// Parses `POINT(lng lat)` back into a position.
///
/// The keyword is case-insensitive and surrounding whitespace is ignored.
///
/// # Errors
///
/// * [`WktError::Malformed`] if the text is not a two-coordinate point
pub fn parse_point(text: &str) -> Result<Coordinates, WktError> {
    let malformed = || WktError::Malformed(text.to_string());
    let trimmed = text.trim();

    let body = trimmed
        .get(..5)
        .filter(|kw| kw.eq_ignore_ascii_case("POINT"))
        .map(|_| trimmed[5..].trim_start())
        .and_then(|rest| rest.strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(malformed)?;

    let mut parts = body.split_whitespace();
    let lng = parts.next().and_then(|v| v.parse::<f64>().ok());
    let lat = parts.next().and_then(|v| v.parse::<f64>().ok());

    match (lng, lat, parts.next()) {
        (Some(lng), Some(lat), None) => Ok(Coordinates::new(lat, lng)),
        _ => Err(malformed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_longitude_first() {
        assert_eq!(
            point(Coordinates::new(28.6139, 77.209)),
            "POINT(77.209 28.6139)"
        );
    }

    #[test]
    fn parses_encoded_point() {
        let parsed = parse_point("POINT(77.209 28.6139)").unwrap();
        assert!((parsed.lat - 28.6139).abs() < 1e-12);
        assert!((parsed.lng - 77.209).abs() < 1e-12);
    }

    #[test]
    fn tolerates_spacing_and_case() {
        let parsed = parse_point("  point ( 75.5   30.25 ) ").unwrap();
        assert!((parsed.lng - 75.5).abs() < 1e-12);
        assert!((parsed.lat - 30.25).abs() < 1e-12);
    }

    #[test]
    fn rejects_other_geometries() {
        assert!(parse_point("LINESTRING(1 2, 3 4)").is_err());
        assert!(parse_point("POINT(1)").is_err());
        assert!(parse_point("POINT(1 2 3)").is_err());
        assert!(parse_point("POINT(a b)").is_err());
        assert!(parse_point("").is_err());
    }
}
