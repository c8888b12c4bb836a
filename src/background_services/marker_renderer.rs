//! Responsible for owning the map surface and applying marker and zoom commands to it

use tokio::sync::mpsc::{Receiver, Sender, channel};
use tracing::{info, info_span};

use crate::map_surface::MapSurface;
use crate::model::geo_model::GeoPosition;

/// How far one zoom button press moves the zoom level.
pub const ZOOM_STEP: f64 = 0.10;

/// A unit of work for the task that owns the map surface.
#[derive(Clone, Debug)]
pub enum MapCommand {
    /// Add one marker per position, in order, as a single batch.
    AddMarkers(Vec<GeoPosition>),
    /// Nudge the zoom level by a delta. The surface keeps the absolute level.
    AdjustZoom(f64),
}

/// The only way the rest of the app reaches the map surface.
///
/// Commands sent through clones of one handle land on the owning task in send
/// order. Sending queues the work; it never waits for the surface to draw.
#[derive(Clone, Debug)]
pub struct MapHandle {
    commands: Sender<MapCommand>,
}

/// The task owning the map surface stopped, further commands have nowhere to go.
#[derive(thiserror::Error, Debug)]
#[error("the map surface task is gone")]
pub struct MapSurfaceClosed;

/// Creates the handle and the receiving end for the surface-owning task.
pub fn map_channel(capacity: usize) -> (MapHandle, Receiver<MapCommand>) {
    let (commands, receiver) = channel(capacity);
    (MapHandle { commands }, receiver)
}

impl MapHandle {
    /// Queues one marker per position, the whole batch as one command.
    pub async fn add_markers(&self, positions: Vec<GeoPosition>) -> Result<(), MapSurfaceClosed> {
        self.send(MapCommand::AddMarkers(positions)).await
    }

    pub async fn adjust_zoom(&self, delta: f64) -> Result<(), MapSurfaceClosed> {
        self.send(MapCommand::AdjustZoom(delta)).await
    }

    /// One zoom-in button press.
    pub async fn zoom_in(&self) -> Result<(), MapSurfaceClosed> {
        self.adjust_zoom(ZOOM_STEP).await
    }

    /// One zoom-out button press.
    pub async fn zoom_out(&self) -> Result<(), MapSurfaceClosed> {
        self.adjust_zoom(-ZOOM_STEP).await
    }

    async fn send(&self, command: MapCommand) -> Result<(), MapSurfaceClosed> {
        self.commands.send(command).await.map_err(|_| MapSurfaceClosed)
    }
}

/// Applies commands from the given channel to the surface, one at a time.
///
/// A marker batch is applied completely before the next command is taken, so
/// batches never interleave. Runs until every `MapHandle` is dropped.
pub async fn apply_map_commands(
    commands: &mut Receiver<MapCommand>,
    surface: &mut impl MapSurface,
) {
    while let Some(command) = commands.recv().await {
        match command {
            MapCommand::AddMarkers(positions) => {
                let _span = info_span!("Placing markers", count = positions.len()).entered();
                for position in positions {
                    surface.add_marker(position);
                }
            }
            MapCommand::AdjustZoom(delta) => surface.adjust_zoom(delta),
        }
    }

    info!("Channel closed");
}
