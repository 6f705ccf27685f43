//! Per-frame view for video annotation.
//!
//! A renderer draws the region rectangle on every frame and one marker per
//! keypoint. This module hands it exactly that, without exposing metrics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Region;
use crate::session::Session;
use crate::types::Position2D;

/// One keypoint marker; `position` is `None` for keypoints without valid samples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayMarker {
    pub keypoint: String,
    pub position: Option<Position2D>,
}

impl OverlayMarker {
    /// Integer pixel coordinates, truncated toward zero like a frame buffer index
    pub fn pixel(&self) -> Option<(i32, i32)> {
        self.position.map(|p| (p.x as i32, p.y as i32))
    }
}

/// Everything needed to annotate one video frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayFrame {
    pub frame: usize,
    pub region: Region,
    pub markers: Vec<OverlayMarker>,
}

impl Session {
    pub fn overlay_frame(&self, frame: usize) -> Result<OverlayFrame> {
        if frame >= self.frame_count() {
            return Err(Error::FrameOutOfRange {
                frame,
                frame_count: self.frame_count(),
            });
        }
        Ok(self.overlay_frame_in_range(frame))
    }

    /// Overlay frames for the whole recording, in frame order
    pub fn overlay_frames(&self) -> impl Iterator<Item = OverlayFrame> + '_ {
        (0..self.frame_count()).map(move |frame| self.overlay_frame_in_range(frame))
    }

    /// `frame` must be below `frame_count()`
    fn overlay_frame_in_range(&self, frame: usize) -> OverlayFrame {
        let markers = self
            .tracks()
            .map(|(keypoint, track)| OverlayMarker {
                keypoint: keypoint.to_string(),
                position: track.trajectory().and_then(|t| t.position(frame)),
            })
            .collect();

        OverlayFrame {
            frame,
            region: self.region(),
            markers,
        }
    }
}
