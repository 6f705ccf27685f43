//! # Trip-Clean
//!
//! Raw table handling and trajectory repair.
//!
//! ## Pipeline Stages
//!
//! 1. **Loading**: a [`Loader`] hands over a frame × (keypoint × channel) table
//! 2. **Validation**: the column count must match the schema's keypoints
//! 3. **Repair**: samples below the confidence threshold are re-positioned by
//!    linear interpolation between the nearest trusted frames, holding the
//!    nearest trusted value at either end of the recording
//! 4. **Session**: repaired trajectories are frozen into a [`trip_core::Session`]

pub mod cleaner;
pub mod interpolate;
pub mod loader;
pub mod table;

pub use cleaner::*;
pub use interpolate::*;
pub use loader::*;
pub use table::*;
