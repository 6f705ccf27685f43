//! Exportable summary of a session's metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use trip_core::{Region, Result, Session, SessionId};

use crate::metric::MetricKind;

/// The four metrics of one usable keypoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeypointMetrics {
    /// Seconds inside the region (edges included)
    pub time_in_region: f64,
    /// Seconds outside the region (edges included)
    pub time_outside_region: f64,
    /// Path length in pixels
    pub total_distance: f64,
    /// Mean speed in pixels per second
    pub average_velocity: f64,
}

impl KeypointMetrics {
    pub fn get(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::TimeInRegion => self.time_in_region,
            MetricKind::TimeOutsideRegion => self.time_outside_region,
            MetricKind::TotalDistance => self.total_distance,
            MetricKind::AverageVelocity => self.average_velocity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KeypointReport {
    Usable {
        keypoint: String,
        repaired_frames: usize,
        metrics: KeypointMetrics,
    },
    /// No sample of this keypoint reached the confidence threshold
    Unusable { keypoint: String },
}

impl KeypointReport {
    pub fn keypoint(&self) -> &str {
        match self {
            KeypointReport::Usable { keypoint, .. } | KeypointReport::Unusable { keypoint } => {
                keypoint
            }
        }
    }

    pub fn metrics(&self) -> Option<&KeypointMetrics> {
        match self {
            KeypointReport::Usable { metrics, .. } => Some(metrics),
            KeypointReport::Unusable { .. } => None,
        }
    }
}

/// Complete metrics package for one session, keypoints in schema order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub session_id: SessionId,
    pub generated_at: DateTime<Utc>,
    pub frame_count: usize,
    pub frame_rate: f64,
    pub duration_secs: f64,
    pub confidence_threshold: f64,
    pub region: Region,
    pub keypoints: Vec<KeypointReport>,
}

impl MetricsReport {
    pub fn new(session: &Session, keypoints: Vec<KeypointReport>) -> Self {
        Self {
            session_id: session.id(),
            generated_at: Utc::now(),
            frame_count: session.frame_count(),
            frame_rate: session.frame_rate(),
            duration_secs: session.duration_secs(),
            confidence_threshold: session.schema().confidence_threshold(),
            region: session.region(),
            keypoints,
        }
    }

    pub fn keypoint(&self, name: &str) -> Option<&KeypointReport> {
        self.keypoints.iter().find(|k| k.keypoint() == name)
    }

    pub fn metrics(&self, name: &str) -> Option<&KeypointMetrics> {
        self.keypoint(name).and_then(KeypointReport::metrics)
    }

    /// `kind` for every usable keypoint, in schema order
    pub fn column(&self, kind: MetricKind) -> Vec<(&str, f64)> {
        self.keypoints
            .iter()
            .filter_map(|k| k.metrics().map(|m| (k.keypoint(), m.get(kind))))
            .collect()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
