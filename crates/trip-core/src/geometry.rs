//! Region geometry for occupancy metrics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Position2D;

/// Axis-aligned rectangle in image coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Region {
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Bounds must be finite and ordered; a degenerate (zero-width) rectangle is allowed
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.x_min, self.y_min, self.x_max, self.y_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "region bounds must be finite: {:?}",
                self
            )));
        }
        if self.x_min > self.x_max || self.y_min > self.y_max {
            return Err(Error::InvalidInput(format!(
                "region bounds out of order: x {}..{}, y {}..{}",
                self.x_min, self.x_max, self.y_min, self.y_max
            )));
        }
        Ok(())
    }

    /// Inside test, inclusive on all four edges
    pub fn contains(&self, point: &Position2D) -> bool {
        point.x >= self.x_min
            && point.x <= self.x_max
            && point.y >= self.y_min
            && point.y <= self.y_max
    }

    /// Outside test, also inclusive on all four edges.
    ///
    /// A point lying exactly on an edge satisfies both this and [`Region::contains`].
    pub fn excludes(&self, point: &Position2D) -> bool {
        point.x <= self.x_min
            || point.x >= self.x_max
            || point.y <= self.y_min
            || point.y >= self.y_max
    }

    pub fn center(&self) -> Position2D {
        Position2D::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Top-left and bottom-right corners, as a renderer draws the rectangle
    pub fn corners(&self) -> (Position2D, Position2D) {
        (
            Position2D::new(self.x_min, self.y_min),
            Position2D::new(self.x_max, self.y_max),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_center() -> Region {
        Region::new(475.0, 305.0, 845.0, 680.0)
    }

    #[test]
    fn test_region_contains_inclusive() {
        let region = arena_center();
        assert!(region.contains(&Position2D::new(475.0, 305.0)));
        assert!(region.contains(&Position2D::new(845.0, 680.0)));
        assert!(region.contains(&Position2D::new(600.0, 500.0)));
        assert!(!region.contains(&Position2D::new(474.0, 305.0)));
    }

    #[test]
    fn test_region_edges_count_both_ways() {
        let region = arena_center();
        let corner = Position2D::new(475.0, 305.0);
        assert!(region.contains(&corner));
        assert!(region.excludes(&corner));

        let inner = Position2D::new(600.0, 500.0);
        assert!(!region.excludes(&inner));
        assert!(region.excludes(&Position2D::new(100.0, 500.0)));
    }

    #[test]
    fn test_region_validation() {
        assert!(arena_center().validate().is_ok());
        assert!(Region::new(10.0, 0.0, 5.0, 1.0).validate().is_err());
        assert!(Region::new(0.0, f64::NAN, 5.0, 1.0).validate().is_err());
        assert!(Region::new(1.0, 1.0, 1.0, 1.0).validate().is_ok());
    }

    #[test]
    fn test_region_dimensions() {
        let region = arena_center();
        assert_eq!(region.width(), 370.0);
        assert_eq!(region.height(), 375.0);
        assert_eq!(region.center(), Position2D::new(660.0, 492.5));
    }
}
