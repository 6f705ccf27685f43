//! # Trip-Tracker
//!
//! Configuration and end-to-end pipeline for computing locomotion metrics
//! from a pose-tracking recording.
//!
//! ## Configuration
//!
//! A TOML (or JSON/YAML) file with a `[data]` section naming the table to
//! load and a `[schema]` section giving the keypoint order, frame rate,
//! confidence threshold and region. Any value can be overridden through
//! `TRIP_`-prefixed environment variables, with `__` separating sections.

pub mod config;
pub mod pipeline;

pub use crate::config::*;
pub use crate::pipeline::*;
