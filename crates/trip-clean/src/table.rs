//! Raw frame × column numeric table, as handed over by a loader.

use ndarray::{Array2, ArrayView1};
use trip_core::{Channel, Error, Result, Sample, Schema};

/// One row per frame; columns are keypoint × channel in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    data: Array2<f64>,
}

impl RawTable {
    pub fn new(data: Array2<f64>) -> Self {
        Self { data }
    }

    /// Build from row vectors; every row must have the same width
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_cols = rows.first().map(Vec::len).unwrap_or(0);
        let n_rows = rows.len();

        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(Error::Schema(format!(
                "row {} has {} columns, expected {}",
                i,
                row.len(),
                n_cols
            )));
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let data = Array2::from_shape_vec((n_rows, n_cols), flat)
            .map_err(|e| Error::Schema(format!("cannot shape table: {e}")))?;
        Ok(Self { data })
    }

    /// Build a table from per-keypoint sample sequences (keypoint-major columns)
    pub fn from_samples(keypoints: &[Vec<Sample>]) -> Result<Self> {
        let n_frames = keypoints.first().map(Vec::len).unwrap_or(0);
        if keypoints.iter().any(|k| k.len() != n_frames) {
            return Err(Error::Schema("keypoint sample sequences differ in length".into()));
        }

        let mut data = Array2::zeros((n_frames, keypoints.len() * Channel::COUNT));
        for (k, samples) in keypoints.iter().enumerate() {
            for (frame, sample) in samples.iter().enumerate() {
                let base = k * Channel::COUNT;
                data[[frame, base + Channel::X as usize]] = sample.x;
                data[[frame, base + Channel::Y as usize]] = sample.y;
                data[[frame, base + Channel::Confidence as usize]] = sample.confidence;
            }
        }
        Ok(Self { data })
    }

    pub fn frame_count(&self) -> usize {
        self.data.nrows()
    }

    pub fn column_count(&self) -> usize {
        self.data.ncols()
    }

    pub fn column(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.data.column(idx)
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }

    /// Fails unless the column count matches `3 × keypoints`
    pub fn check_schema(&self, schema: &Schema) -> Result<()> {
        if self.column_count() != schema.column_count() {
            return Err(Error::Schema(format!(
                "table has {} columns, schema with {} keypoints expects {}",
                self.column_count(),
                schema.keypoint_count(),
                schema.column_count()
            )));
        }
        Ok(())
    }

    /// Raw samples of the keypoint at `keypoint_idx`, one per frame
    pub fn samples(&self, schema: &Schema, keypoint_idx: usize) -> Vec<Sample> {
        let xs = self.column(schema.column_index(keypoint_idx, Channel::X));
        let ys = self.column(schema.column_index(keypoint_idx, Channel::Y));
        let cs = self.column(schema.column_index(keypoint_idx, Channel::Confidence));

        xs.iter()
            .zip(ys.iter())
            .zip(cs.iter())
            .map(|((&x, &y), &c)| Sample::new(x, y, c))
            .collect()
    }
}
