//! Responsible for fetching the stop list and turning it into map markers

use bytes::Bytes;
use prost::Message;
use tokio::sync::mpsc::Receiver;
use tracing::{Instrument, error, info, info_span};

use crate::background_services::marker_renderer::{MapHandle, MapSurfaceClosed};
use crate::config::Config;
use crate::model::geo_model::{CoordinateParseError, stop_positions};
use crate::model::sunspot_api_model::StopList;

/// One map-page display event.
#[derive(Clone, Copy, Debug)]
pub struct RefreshRequest;

/// Serves refresh requests until the channel closes.
///
/// Requests are handled strictly one at a time, in arrival order, so two
/// triggers can never interleave their marker batches. A failed refresh is
/// logged and the loop moves on to the next request; nothing is retried.
pub async fn run_stop_fetcher(
    refresh_requests: &mut Receiver<RefreshRequest>,
    config: &Config,
    map: MapHandle,
) -> Result<(), anyhow::Error> {
    while refresh_requests.recv().await.is_some() {
        match refresh_stops(&config.endpoint_url, &map).await {
            Ok(count) => info!("placed {} stop markers", count),
            Err(e) => error!("{:?}", anyhow::Error::from(e).context("stop refresh failed")),
        }
    }

    info!("Channel closed");

    Ok(())
}

/// Runs one fetch-decode-map-render pass against the stop feed.
///
/// Returns the number of markers handed to the map surface, which always
/// equals the number of stops decoded. Whatever stage fails, the surface is
/// left exactly as it was.
#[tracing::instrument(err, skip(map))]
pub async fn refresh_stops(endpoint: &str, map: &MapHandle) -> Result<usize, RefreshStopsError> {
    let payload = fetch_stop_payload(endpoint).await?;

    let stop_list = StopList::decode(payload)?;
    info!("got {} stops", stop_list.stops.len());

    let positions = stop_positions(&stop_list)?;
    let count = positions.len();

    map.add_markers(positions).await?;

    Ok(count)
}

/// One GET against the feed, no retries, transport-default timeouts.
async fn fetch_stop_payload(endpoint: &str) -> Result<Bytes, reqwest::Error> {
    let response = reqwest::get(endpoint)
        .instrument(info_span!("Fetching stop list"))
        .await?
        .error_for_status()?;

    response
        .bytes()
        .instrument(info_span!("Reading body of response"))
        .await
}

#[derive(thiserror::Error, Debug)]
pub enum RefreshStopsError {
    #[error("error fetching the stop list")]
    Transport {
        #[from]
        source: reqwest::Error,
    },

    #[error("error decoding the stop list payload")]
    Decode {
        #[from]
        source: prost::DecodeError,
    },

    #[error("error mapping stop coordinates")]
    Format {
        #[from]
        source: CoordinateParseError,
    },

    #[error("error handing markers to the map surface")]
    Dispatch {
        #[from]
        source: MapSurfaceClosed,
    },
}
