//! Shape of a tracking recording: keypoints, channels, timing and the region of interest.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Region;
use crate::types::Channel;

/// Describes how a raw table is laid out and how it should be interpreted.
///
/// Columns are ordered keypoint-major: for each keypoint in `keypoints`, one
/// column per entry of [`Channel::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SchemaFields")]
pub struct Schema {
    /// Keypoint names, in column order
    keypoints: Vec<String>,
    /// Recording frame rate (frames per second)
    frame_rate: f64,
    /// Samples with confidence below this value are repaired
    confidence_threshold: f64,
    /// Region used for occupancy metrics
    region: Region,
}

#[derive(Deserialize)]
struct SchemaFields {
    keypoints: Vec<String>,
    frame_rate: f64,
    confidence_threshold: f64,
    region: Region,
}

impl TryFrom<SchemaFields> for Schema {
    type Error = Error;

    fn try_from(fields: SchemaFields) -> Result<Self> {
        Schema::new(
            fields.keypoints,
            fields.frame_rate,
            fields.confidence_threshold,
            fields.region,
        )
    }
}

impl Schema {
    pub fn new(
        keypoints: Vec<String>,
        frame_rate: f64,
        confidence_threshold: f64,
        region: Region,
    ) -> Result<Self> {
        let schema = Self {
            keypoints,
            frame_rate,
            confidence_threshold,
            region,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Same layout with a different confidence threshold
    pub fn with_confidence_threshold(mut self, threshold: f64) -> Result<Self> {
        validate_threshold(threshold)?;
        self.confidence_threshold = threshold;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.keypoints.is_empty() {
            return Err(Error::InvalidInput("schema has no keypoints".into()));
        }
        for (i, name) in self.keypoints.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(Error::InvalidInput(format!("keypoint {} has an empty name", i)));
            }
            if self.keypoints[..i].contains(name) {
                return Err(Error::InvalidInput(format!("duplicate keypoint '{}'", name)));
            }
        }
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(Error::InvalidInput(format!(
                "frame rate must be positive, got {}",
                self.frame_rate
            )));
        }
        validate_threshold(self.confidence_threshold)?;
        self.region.validate()
    }

    pub fn keypoints(&self) -> &[String] {
        &self.keypoints
    }

    pub fn keypoint_count(&self) -> usize {
        self.keypoints.len()
    }

    pub fn keypoint_index(&self, keypoint: &str) -> Option<usize> {
        self.keypoints.iter().position(|k| k == keypoint)
    }

    pub fn channels(&self) -> &'static [Channel] {
        &Channel::ALL
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Number of columns a raw table must have for this schema
    pub fn column_count(&self) -> usize {
        self.keypoints.len() * Channel::COUNT
    }

    /// Column holding `channel` of the keypoint at `keypoint_idx`
    pub fn column_index(&self, keypoint_idx: usize, channel: Channel) -> usize {
        keypoint_idx * Channel::COUNT + channel as usize
    }

    /// Human-readable column labels, e.g. `nose/x`
    pub fn column_labels(&self) -> Vec<String> {
        self.keypoints
            .iter()
            .flat_map(|k| Channel::ALL.iter().map(move |c| format!("{}/{}", k, c.label())))
            .collect()
    }
}

pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(Error::InvalidInput(format!(
            "confidence threshold must lie in [0, 1], got {}",
            threshold
        )));
    }
    Ok(())
}
