//! Wire schema for the stop feed.
//!
//! The `/sunspot` endpoint answers a plain GET with one protobuf message
//! listing every stop in the network. The tag numbers below are the deployed
//! contract and must not change. Latitude and longitude travel as
//! decimal-degree strings rather than binary floats, exactly as the feed
//! emits them.

use prost::Message;

/// The full stop listing, in feed order.
///
/// The feed promises nothing about uniqueness; duplicate stop ids are passed
/// through untouched.
#[derive(Clone, PartialEq, Message)]
pub struct StopList {
    #[prost(message, repeated, tag = "1")]
    pub stops: Vec<Stop>,
}

/// One transit stop as it appears on the wire.
#[derive(Clone, PartialEq, Message)]
pub struct Stop {
    /// Opaque identifier.
    #[prost(string, tag = "1")]
    pub stop_id: String,
    /// Latitude in decimal degrees, as text.
    #[prost(string, tag = "2")]
    pub stop_lat: String,
    /// Longitude in decimal degrees, as text.
    #[prost(string, tag = "3")]
    pub stop_lon: String,
}
