//! Fundamental types for keypoint tracking data.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one cleaned recording, used to correlate logs and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-sample channel, in the column order the tracking container uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Channel {
    X = 0,
    Y = 1,
    Confidence = 2,
}

impl Channel {
    pub const COUNT: usize = 3;

    /// Channels in column order
    pub const ALL: [Channel; Channel::COUNT] = [Channel::X, Channel::Y, Channel::Confidence];

    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Confidence),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Confidence => "likelihood",
        }
    }
}

/// 2D position in image coordinates (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position2D {
    pub x: f64,
    pub y: f64,
}

impl Position2D {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn to_nalgebra(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub fn from_nalgebra(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        nalgebra::distance(&self.to_nalgebra(), &other.to_nalgebra())
    }

    /// Linear interpolation towards `other`; `t` is clamped to `[0, 1]`
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            (1.0 - t) * self.x + t * other.x,
            (1.0 - t) * self.y + t * other.y,
        )
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One keypoint observation at one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
    pub confidence: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64, confidence: f64) -> Self {
        Self { x, y, confidence }
    }

    pub fn position(&self) -> Position2D {
        Position2D::new(self.x, self.y)
    }

    /// A sample is trusted when its confidence reaches the threshold and all
    /// channels hold real numbers. NaN rows from the tracking container never pass.
    pub fn is_valid(&self, confidence_threshold: f64) -> bool {
        self.confidence.is_finite()
            && self.confidence >= confidence_threshold
            && self.position().is_finite()
    }

    pub fn with_position(&self, position: Position2D) -> Self {
        Self::new(position.x, position.y, self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_position_distance() {
        let p1 = Position2D::origin();
        let p2 = Position2D::new(3.0, 4.0);
        assert_abs_diff_eq!(p1.distance_to(&p2), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lerp_thirds() {
        let a = Position2D::origin();
        let b = Position2D::new(30.0, 30.0);
        let p = a.lerp(&b, 1.0 / 3.0);
        assert_abs_diff_eq!(p.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_sample_validity() {
        assert!(Sample::new(1.0, 1.0, 0.95).is_valid(0.95));
        assert!(!Sample::new(1.0, 1.0, 0.94).is_valid(0.95));
        assert!(!Sample::new(1.0, 1.0, f64::NAN).is_valid(0.0));
        assert!(!Sample::new(f64::NAN, 1.0, 1.0).is_valid(0.95));
    }

    #[test]
    fn test_channel_roundtrip() {
        for (i, channel) in Channel::ALL.iter().enumerate() {
            assert_eq!(Channel::from_index(i), Some(*channel));
            assert_eq!(*channel as usize, i);
        }
        assert_eq!(Channel::from_index(3), None);
    }
}
