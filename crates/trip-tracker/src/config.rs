//! Tracker configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use trip_core::{Error, Region, Result, Schema};

/// Complete tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Where the raw tracking table lives
    pub data: DataConfig,

    /// How the table is laid out and interpreted
    pub schema: SchemaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding exported tracking tables
    pub root: PathBuf,

    /// Table name within `root` (`.npy` is appended when no extension is given)
    pub source: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Keypoint names in column order
    pub keypoints: Vec<String>,

    /// Recording frame rate (frames per second)
    pub frame_rate: f64,

    /// Samples below this confidence are interpolated
    pub confidence_threshold: f64,

    /// Region used for occupancy metrics
    pub region: Region,
}

impl TrackerConfig {
    /// Load configuration from file, with `TRIP_`-prefixed environment overrides
    /// (e.g. `TRIP_SCHEMA__FRAME_RATE=25`)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("TRIP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_error)?;

        let config: Self = settings.try_deserialize().map_err(config_error)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.data.source.trim().is_empty() {
            return Err(Error::Config("data.source must not be empty".into()));
        }
        self.schema().map(|_| ())
    }

    /// Validated schema described by this configuration
    pub fn schema(&self) -> Result<Schema> {
        Schema::new(
            self.schema.keypoints.clone(),
            self.schema.frame_rate,
            self.schema.confidence_threshold,
            self.schema.region,
        )
        .map_err(|e| Error::Config(e.to_string()))
    }
}

fn config_error(e: config::ConfigError) -> Error {
    Error::Config(e.to_string())
}
