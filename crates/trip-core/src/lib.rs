//! # Trip-Core
//!
//! Core types for turning pose-tracking output of a single subject into
//! locomotion metrics.
//!
//! A recording is described by a [`Schema`] (ordered keypoints, frame rate,
//! confidence threshold, region of interest). Cleaning produces a [`Session`]:
//! one [`KeypointTrack`] per keypoint, each either a repaired [`Trajectory`]
//! or an explicit unusable marker.

pub mod error;
pub mod geometry;
pub mod overlay;
pub mod schema;
pub mod session;
pub mod trajectory;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use overlay::*;
pub use schema::*;
pub use session::*;
pub use trajectory::*;
pub use types::*;
