//! The four per-keypoint metrics and how each one is computed.

use serde::{Deserialize, Serialize};
use trip_core::{Error, Region, Result, Trajectory};

/// Named per-keypoint metric.
///
/// Metrics form a small dependency graph: [`MetricKind::AverageVelocity`]
/// is derived from [`MetricKind::TotalDistance`], which must be computed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    TimeInRegion,
    TimeOutsideRegion,
    TotalDistance,
    AverageVelocity,
}

impl MetricKind {
    pub const COUNT: usize = 4;

    /// Evaluation order that satisfies every dependency
    pub const ALL: [MetricKind; MetricKind::COUNT] = [
        MetricKind::TimeInRegion,
        MetricKind::TimeOutsideRegion,
        MetricKind::TotalDistance,
        MetricKind::AverageVelocity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MetricKind::TimeInRegion => "time_in_region",
            MetricKind::TimeOutsideRegion => "time_outside_region",
            MetricKind::TotalDistance => "total_distance",
            MetricKind::AverageVelocity => "average_velocity",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            MetricKind::TimeInRegion | MetricKind::TimeOutsideRegion => "s",
            MetricKind::TotalDistance => "px",
            MetricKind::AverageVelocity => "px/s",
        }
    }

    /// Metrics that must reach "computed" before this one can
    pub fn dependencies(&self) -> &'static [MetricKind] {
        match self {
            MetricKind::AverageVelocity => &[MetricKind::TotalDistance],
            _ => &[],
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Frames where the keypoint lies inside the region, edges included
pub fn frames_in_region(trajectory: &Trajectory, region: &Region) -> usize {
    trajectory.positions().filter(|p| region.contains(p)).count()
}

/// Frames where the keypoint lies outside the region, edges included.
///
/// Frames exactly on an edge are also counted by [`frames_in_region`].
pub fn frames_outside_region(trajectory: &Trajectory, region: &Region) -> usize {
    trajectory.positions().filter(|p| region.excludes(p)).count()
}

/// Seconds spent inside the region
pub fn time_in_region(trajectory: &Trajectory, region: &Region, frame_rate: f64) -> f64 {
    frames_in_region(trajectory, region) as f64 / frame_rate
}

/// Seconds spent outside the region
pub fn time_outside_region(trajectory: &Trajectory, region: &Region, frame_rate: f64) -> f64 {
    frames_outside_region(trajectory, region) as f64 / frame_rate
}

/// Sum of frame-to-frame Euclidean steps; the first frame contributes nothing
pub fn total_distance(trajectory: &Trajectory) -> f64 {
    trajectory.path_length()
}

/// Mean speed over the whole recording, in position units per second
pub fn average_velocity(total_distance: f64, frame_count: usize, frame_rate: f64) -> Result<f64> {
    if frame_count == 0 {
        return Err(Error::InvalidInput(
            "average velocity is undefined for a recording with no frames".into(),
        ));
    }
    Ok(total_distance / (frame_count as f64 / frame_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use trip_core::Sample;

    fn trajectory(points: &[(f64, f64)]) -> Trajectory {
        Trajectory::new(
            points.iter().map(|&(x, y)| Sample::new(x, y, 1.0)).collect(),
            0,
        )
    }

    fn arena_center() -> Region {
        Region::new(475.0, 305.0, 845.0, 680.0)
    }

    #[test]
    fn test_dependency_graph() {
        assert_eq!(MetricKind::AverageVelocity.dependencies(), &[MetricKind::TotalDistance]);
        assert!(MetricKind::TotalDistance.dependencies().is_empty());

        // ALL lists every dependency before its dependants
        for (i, kind) in MetricKind::ALL.iter().enumerate() {
            for dep in kind.dependencies() {
                let pos = MetricKind::ALL.iter().position(|k| k == dep).unwrap();
                assert!(pos < i);
            }
        }
    }

    #[test]
    fn test_region_inclusivity() {
        let region = arena_center();
        let on_corner = trajectory(&[(475.0, 305.0)]);
        let just_left = trajectory(&[(474.0, 305.0)]);

        assert_eq!(frames_in_region(&on_corner, &region), 1);
        assert_eq!(frames_in_region(&just_left, &region), 0);
    }

    #[test]
    fn test_edge_is_double_counted() {
        let region = arena_center();
        let traj = trajectory(&[(475.0, 305.0), (600.0, 500.0), (100.0, 100.0)]);

        assert_eq!(frames_in_region(&traj, &region), 2);
        assert_eq!(frames_outside_region(&traj, &region), 2);
        assert_abs_diff_eq!(time_in_region(&traj, &region, 30.0), 2.0 / 30.0);
    }

    #[test]
    fn test_distance_and_velocity() {
        let traj = trajectory(&[(0.0, 0.0), (3.0, 4.0), (3.0, 4.0)]);
        let distance = total_distance(&traj);
        assert_abs_diff_eq!(distance, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(average_velocity(distance, 3, 30.0).unwrap(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_velocity_zero_frames() {
        assert!(matches!(
            average_velocity(0.0, 0, 30.0),
            Err(Error::InvalidInput(_))
        ));
    }
}
