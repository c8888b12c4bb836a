use itertools::Itertools;
use tracing::debug;

use super::sunspot_api_model::{Stop, StopList};

/// A point the map surface can anchor a marker at.
///
/// The feed carries no elevation data, so altitude is always sea level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeoPosition {
    /// Turns one stop's textual coordinates into a position.
    pub fn try_from_stop(stop: &Stop) -> Result<Self, CoordinateParseError> {
        debug!(stop_id = %stop.stop_id, "mapping stop");

        let latitude = parse_coordinate(stop, "latitude", &stop.stop_lat)?;
        let longitude = parse_coordinate(stop, "longitude", &stop.stop_lon)?;

        Ok(GeoPosition {
            latitude,
            longitude,
            altitude: 0.0,
        })
    }
}

/// Maps the whole stop list to positions, preserving feed order.
///
/// One stop per position: the first coordinate that fails to parse aborts the
/// rest of the batch, there is no per-stop recovery.
pub fn stop_positions(stops: &StopList) -> Result<Vec<GeoPosition>, CoordinateParseError> {
    stops.stops.iter().map(GeoPosition::try_from_stop).try_collect()
}

/// A stop whose latitude or longitude is not a decimal number.
#[derive(thiserror::Error, Debug)]
#[error("stop {stop_id}: cannot parse {coordinate} {value:?} as decimal degrees")]
pub struct CoordinateParseError {
    pub stop_id: String,
    pub coordinate: &'static str,
    pub value: String,
    #[source]
    pub source: std::num::ParseFloatError,
}

fn parse_coordinate(
    stop: &Stop,
    coordinate: &'static str,
    value: &str,
) -> Result<f64, CoordinateParseError> {
    // str::parse is locale-independent, "." is the only decimal separator
    value.parse().map_err(|source| CoordinateParseError {
        stop_id: stop.stop_id.clone(),
        coordinate,
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, lat: &str, lon: &str) -> Stop {
        Stop {
            stop_id: id.into(),
            stop_lat: lat.into(),
            stop_lon: lon.into(),
        }
    }

    #[test]
    fn positions_mirror_the_stop_list() {
        let list = StopList {
            stops: vec![stop("A", "32.22", "-110.97"), stop("B", "32.25", "-111.00")],
        };

        let positions = stop_positions(&list).unwrap();

        assert_eq!(
            vec![
                GeoPosition {
                    latitude: 32.22,
                    longitude: -110.97,
                    altitude: 0.0,
                },
                GeoPosition {
                    latitude: 32.25,
                    longitude: -111.00,
                    altitude: 0.0,
                },
            ],
            positions
        );
    }

    #[test]
    fn unparseable_latitude_fails_the_whole_batch() {
        let list = StopList {
            stops: vec![
                stop("A", "32.22", "-110.97"),
                stop("B", "N/A", "-111.00"),
                stop("C", "32.30", "-110.90"),
            ],
        };

        let err = stop_positions(&list).unwrap_err();

        assert_eq!("B", err.stop_id);
        assert_eq!("latitude", err.coordinate);
        assert_eq!("N/A", err.value);
    }

    #[test]
    fn unparseable_longitude_names_the_longitude() {
        let err = GeoPosition::try_from_stop(&stop("D", "32.22", "west")).unwrap_err();

        assert_eq!("longitude", err.coordinate);
        assert_eq!("west", err.value);
    }

    #[test]
    fn comma_decimal_separators_are_rejected() {
        // the feed always uses ".", a "," would mean someone localized it
        let err = GeoPosition::try_from_stop(&stop("A", "32,22", "-110.97")).unwrap_err();

        assert_eq!("latitude", err.coordinate);
    }
}
