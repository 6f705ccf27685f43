//! Per-keypoint cleaned trajectories.

use serde::{Deserialize, Serialize};

use crate::types::{Position2D, Sample};

/// Complete cleaned trajectory for one keypoint, one sample per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    samples: Vec<Sample>,
    repaired_frames: usize,
}

impl Trajectory {
    pub fn new(samples: Vec<Sample>, repaired_frames: usize) -> Self {
        Self {
            samples,
            repaired_frames,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Number of frames whose position was replaced during cleaning
    pub fn repaired_frames(&self) -> usize {
        self.repaired_frames
    }

    pub fn position(&self, frame: usize) -> Option<Position2D> {
        self.samples.get(frame).map(Sample::position)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position2D> + '_ {
        self.samples.iter().map(Sample::position)
    }

    /// Total path length (sum of frame-to-frame Euclidean steps)
    pub fn path_length(&self) -> f64 {
        if self.samples.len() < 2 {
            return 0.0;
        }

        self.samples
            .windows(2)
            .map(|w| w[0].position().distance_to(&w[1].position()))
            .sum()
    }
}

/// A keypoint's entry in a session: either a usable trajectory or an
/// explicit marker that no frame carried a trustworthy sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeypointTrack {
    Usable(Trajectory),
    Unusable { frame_count: usize },
}

impl KeypointTrack {
    pub fn is_usable(&self) -> bool {
        matches!(self, KeypointTrack::Usable(_))
    }

    pub fn trajectory(&self) -> Option<&Trajectory> {
        match self {
            KeypointTrack::Usable(trajectory) => Some(trajectory),
            KeypointTrack::Unusable { .. } => None,
        }
    }

    pub fn frame_count(&self) -> usize {
        match self {
            KeypointTrack::Usable(trajectory) => trajectory.len(),
            KeypointTrack::Unusable { frame_count } => *frame_count,
        }
    }
}
