//! Sources of raw tracking tables.
//!
//! The tracking container itself is produced upstream; a loader only has to
//! hand over its frame × (keypoint × channel) block as a [`RawTable`].

use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use ndarray::Array2;
use ndarray_npy::{ReadNpyExt, ReadableElement};
use tracing::debug;
use trip_core::{Error, Result};

use crate::table::RawTable;

/// Produces a raw table from a named source
pub trait Loader {
    fn load(&self, source: &str) -> Result<RawTable>;
}

/// Named tables held in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryLoader {
    tables: HashMap<String, RawTable>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, source: impl Into<String>, table: RawTable) -> Self {
        self.insert(source, table);
        self
    }

    pub fn insert(&mut self, source: impl Into<String>, table: RawTable) {
        self.tables.insert(source.into(), table);
    }
}

impl Loader for MemoryLoader {
    fn load(&self, source: &str) -> Result<RawTable> {
        self.tables
            .get(source)
            .cloned()
            .ok_or_else(|| Error::SourceUnavailable(format!("no table named '{}'", source)))
    }
}

/// Reads 2-D `.npy` exports of the tracking table from a directory.
///
/// Both `float64` and `float32` arrays are accepted.
#[derive(Debug, Clone)]
pub struct NpyLoader {
    root: PathBuf,
}

impl NpyLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Source names without an extension resolve to `<name>.npy`
    pub fn resolve(&self, source: &str) -> PathBuf {
        let path = self.root.join(source);
        if path.extension().is_some() {
            path
        } else {
            path.with_extension("npy")
        }
    }
}

impl Loader for NpyLoader {
    fn load(&self, source: &str) -> Result<RawTable> {
        let path = self.resolve(source);
        if !path.is_file() {
            return Err(Error::SourceUnavailable(format!(
                "{} does not exist",
                path.display()
            )));
        }

        let data = match read_npy::<f64>(&path) {
            Ok(data) => data,
            Err(_) => read_npy::<f32>(&path)?.mapv(f64::from),
        };

        debug!(
            path = %path.display(),
            frames = data.nrows(),
            columns = data.ncols(),
            "loaded raw table"
        );
        Ok(RawTable::new(data))
    }
}

fn read_npy<T: ReadableElement>(path: &Path) -> Result<Array2<T>> {
    let file = File::open(path)
        .map_err(|e| Error::SourceUnavailable(format!("{}: {e}", path.display())))?;
    Array2::<T>::read_npy(file)
        .map_err(|e| Error::Schema(format!("NPY read error at {}: {e}", path.display())))
}
