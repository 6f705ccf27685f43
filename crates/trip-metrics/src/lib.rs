//! # Trip-Metrics
//!
//! Region-occupancy and locomotion metrics for cleaned tracking sessions.
//!
//! ## Metrics
//!
//! - **time_in_region**: seconds with the keypoint inside the region (edges included)
//! - **time_outside_region**: seconds with the keypoint outside it (edges included)
//! - **total_distance**: path length in pixels
//! - **average_velocity**: path length over recording duration, pixels per second
//!
//! Because both region tests include the rectangle's edges, a frame exactly on
//! an edge counts toward both occupancy metrics. The two times therefore need
//! not add up to the recording duration.

pub mod engine;
pub mod metric;
pub mod report;

pub use engine::*;
pub use metric::MetricKind;
pub use report::*;
