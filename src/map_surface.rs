use tracing::debug;

use crate::model::geo_model::GeoPosition;

/// A map display owning a marker collection and a zoom level.
///
/// Exactly one task may hold a surface, the marker renderer. Everything else
/// talks to it through a `MapHandle`; handing out a second mutable path to the
/// marker collection is not representable here.
pub trait MapSurface {
    /// Anchors a new marker at `position`, appending to the marker collection.
    fn add_marker(&mut self, position: GeoPosition);

    /// Moves the zoom level by `delta`. The pipeline never reads it back.
    fn adjust_zoom(&mut self, delta: f64);
}

/// In-process stand-in for the real map control.
///
/// Keeps markers in memory and reports every mutation to the log. Starts at
/// zoom level 0; the absolute level belongs to the surface, callers only ever
/// push deltas.
#[derive(Debug, Default)]
pub struct TracingMapSurface {
    markers: Vec<GeoPosition>,
    zoom_level: f64,
}

impl TracingMapSurface {
    pub fn markers(&self) -> &[GeoPosition] {
        &self.markers
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }
}

impl MapSurface for TracingMapSurface {
    fn add_marker(&mut self, position: GeoPosition) {
        debug!(
            latitude = position.latitude,
            longitude = position.longitude,
            "marker added"
        );
        self.markers.push(position);
    }

    fn adjust_zoom(&mut self, delta: f64) {
        self.zoom_level += delta;
        debug!(zoom_level = self.zoom_level, "zoom adjusted");
    }
}
