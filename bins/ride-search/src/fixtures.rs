//! JSON fixture loading

use rideshare_core::error::{Error, Result, ResultExt};
use rideshare_search::{Place, RideCandidate};
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::Path;

/// Posted rides: a JSON array of ride candidates
pub fn load_rides(path: &Path) -> Result<Vec<RideCandidate>> {
    read_json(path)
}

/// Gazetteer: a JSON array of `{name, lat, lng}`
pub fn load_places(path: &Path) -> Result<Vec<Place>> {
    read_json(path)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::file_not_found(path),
        _ => Error::from(e),
    })?;

    serde_json::from_str(&contents)
        .map_err(Error::from)
        .context(format!("Parsing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rideshare_core::ErrorCode;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    #[test]
    fn test_bundled_fixtures_parse() {
        let rides = load_rides(&fixture("rides.json")).unwrap();
        assert_eq!(rides.len(), 4);
        assert!(!rides[3].route.is_decoded());

        let places = load_places(&fixture("places.json")).unwrap();
        assert!(places.iter().any(|p| p.name == "Mandya"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_rides(&fixture("nope.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }

    #[test]
    fn test_wrong_shape() {
        let err = load_rides(&fixture("places.json")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
        assert!(err.context.unwrap().contains("places.json"));
    }
}
