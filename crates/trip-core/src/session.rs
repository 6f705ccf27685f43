//! Immutable cleaned recording, indexed by keypoint name.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Region;
use crate::schema::Schema;
use crate::trajectory::{KeypointTrack, Trajectory};
use crate::types::{Position2D, SessionId};

/// The complete cleaned dataset for one recording.
///
/// Holds exactly one track per schema keypoint, in schema order, and every
/// track spans the same number of frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SessionFields")]
pub struct Session {
    id: SessionId,
    schema: Schema,
    tracks: Vec<KeypointTrack>,
    frame_count: usize,
}

/// Unchecked wire form, validated through [`Session::from_parts`]
#[derive(Deserialize)]
struct SessionFields {
    id: SessionId,
    schema: Schema,
    tracks: Vec<KeypointTrack>,
    frame_count: usize,
}

impl TryFrom<SessionFields> for Session {
    type Error = Error;

    fn try_from(fields: SessionFields) -> Result<Self> {
        let session = Session::from_parts(fields.id, fields.schema, fields.tracks)?;
        if session.frame_count != fields.frame_count {
            return Err(Error::Schema(format!(
                "session declares {} frames but its tracks span {}",
                fields.frame_count, session.frame_count
            )));
        }
        Ok(session)
    }
}

impl Session {
    /// Build a session from one track per schema keypoint, given in schema order
    pub fn new(schema: Schema, tracks: Vec<KeypointTrack>) -> Result<Self> {
        Self::from_parts(SessionId::new(), schema, tracks)
    }

    fn from_parts(id: SessionId, schema: Schema, tracks: Vec<KeypointTrack>) -> Result<Self> {
        if tracks.len() != schema.keypoint_count() {
            return Err(Error::Schema(format!(
                "expected {} keypoint tracks, got {}",
                schema.keypoint_count(),
                tracks.len()
            )));
        }

        let frame_count = tracks.first().map(KeypointTrack::frame_count).unwrap_or(0);
        for (name, track) in schema.keypoints().iter().zip(&tracks) {
            if track.frame_count() != frame_count {
                return Err(Error::Schema(format!(
                    "keypoint '{}' spans {} frames, expected {}",
                    name,
                    track.frame_count(),
                    frame_count
                )));
            }
        }

        Ok(Self {
            id,
            schema,
            tracks,
            frame_count,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frame_rate(&self) -> f64 {
        self.schema.frame_rate()
    }

    pub fn region(&self) -> Region {
        self.schema.region()
    }

    /// Recording length in seconds
    pub fn duration_secs(&self) -> f64 {
        self.frame_count as f64 / self.frame_rate()
    }

    /// Keypoint names in schema order
    pub fn keypoints(&self) -> &[String] {
        self.schema.keypoints()
    }

    pub fn track(&self, keypoint: &str) -> Result<&KeypointTrack> {
        let idx = self
            .schema
            .keypoint_index(keypoint)
            .ok_or_else(|| Error::UnknownKeypoint(keypoint.to_string()))?;
        self.tracks
            .get(idx)
            .ok_or_else(|| Error::UnknownKeypoint(keypoint.to_string()))
    }

    /// Tracks paired with their keypoint names, in schema order
    pub fn tracks(&self) -> impl Iterator<Item = (&str, &KeypointTrack)> {
        self.schema
            .keypoints()
            .iter()
            .map(String::as_str)
            .zip(self.tracks.iter())
    }

    pub fn is_usable(&self, keypoint: &str) -> Result<bool> {
        Ok(self.track(keypoint)?.is_usable())
    }

    /// Cleaned trajectory; fails for keypoints that had no valid samples
    pub fn trajectory(&self, keypoint: &str) -> Result<&Trajectory> {
        self.track(keypoint)?
            .trajectory()
            .ok_or_else(|| Error::InsufficientData {
                keypoint: keypoint.to_string(),
            })
    }

    /// Cleaned position of `keypoint` at `frame`
    pub fn position(&self, keypoint: &str, frame: usize) -> Result<Position2D> {
        if frame >= self.frame_count {
            return Err(Error::FrameOutOfRange {
                frame,
                frame_count: self.frame_count,
            });
        }
        let trajectory = self.trajectory(keypoint)?;
        trajectory.position(frame).ok_or(Error::FrameOutOfRange {
            frame,
            frame_count: self.frame_count,
        })
    }
}
