//! Confidence-gated repair of raw tracking tables into sessions.

use tracing::{debug, info, warn};
use trip_core::{validate_threshold, KeypointTrack, Result, Schema, Session, Trajectory};

use crate::interpolate::{repair_samples, Repair};
use crate::loader::Loader;
use crate::table::RawTable;

/// Turns raw tables into immutable [`Session`]s.
///
/// Every sample whose confidence falls below the threshold gets its position
/// replaced by interpolation between the nearest trusted frames.
#[derive(Debug, Clone)]
pub struct Cleaner {
    confidence_threshold: f64,
}

impl Cleaner {
    pub fn new(confidence_threshold: f64) -> Result<Self> {
        validate_threshold(confidence_threshold)?;
        Ok(Self {
            confidence_threshold,
        })
    }

    /// Cleaner using the schema's own threshold
    pub fn from_schema(schema: &Schema) -> Self {
        Self {
            confidence_threshold: schema.confidence_threshold(),
        }
    }

    pub fn confidence_threshold(&self) -> f64 {
        self.confidence_threshold
    }

    /// Repair every keypoint of `table`. The table is left untouched.
    pub fn clean(&self, table: &RawTable, schema: &Schema) -> Result<Session> {
        table.check_schema(schema)?;

        let mut tracks = Vec::with_capacity(schema.keypoint_count());
        let mut total_repaired = 0;

        for (idx, keypoint) in schema.keypoints().iter().enumerate() {
            let samples = table.samples(schema, idx);
            let track = match repair_samples(&samples, self.confidence_threshold) {
                Repair::Filled { samples, repaired } => {
                    debug!(keypoint = %keypoint, repaired, frames = samples.len(), "repaired keypoint");
                    total_repaired += repaired;
                    KeypointTrack::Usable(Trajectory::new(samples, repaired))
                }
                Repair::NoValidSamples => {
                    warn!(
                        keypoint = %keypoint,
                        threshold = self.confidence_threshold,
                        "no sample reaches the confidence threshold, keypoint unusable"
                    );
                    KeypointTrack::Unusable {
                        frame_count: samples.len(),
                    }
                }
            };
            tracks.push(track);
        }

        let schema = schema
            .clone()
            .with_confidence_threshold(self.confidence_threshold)?;
        let session = Session::new(schema, tracks)?;

        info!(
            session = %session.id(),
            frames = session.frame_count(),
            keypoints = session.keypoints().len(),
            repaired = total_repaired,
            "cleaned session"
        );
        Ok(session)
    }

    /// Load `source` and clean it in one step
    pub fn load_and_clean<L: Loader + ?Sized>(
        &self,
        loader: &L,
        source: &str,
        schema: &Schema,
    ) -> Result<Session> {
        let table = loader.load(source)?;
        self.clean(&table, schema)
    }
}

/// Clean `table` against `schema`, rejecting samples below `confidence_threshold`
pub fn clean(table: &RawTable, schema: &Schema, confidence_threshold: f64) -> Result<Session> {
    Cleaner::new(confidence_threshold)?.clean(table, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use trip_core::{Error, Position2D, Region, Sample};

    fn schema(names: &[&str]) -> Schema {
        Schema::new(
            names.iter().map(|s| s.to_string()).collect(),
            30.0,
            0.95,
            Region::new(475.0, 305.0, 845.0, 680.0),
        )
        .unwrap()
    }

    #[test]
    fn test_clean_interpolates_each_keypoint() {
        let nose = vec![
            Sample::new(0.0, 0.0, 1.0),
            Sample::new(1.0, 1.0, 0.1),
            Sample::new(1.0, 1.0, 0.1),
            Sample::new(30.0, 30.0, 1.0),
        ];
        let tail = vec![
            Sample::new(5.0, 5.0, 0.1),
            Sample::new(10.0, 10.0, 1.0),
            Sample::new(20.0, 20.0, 1.0),
            Sample::new(20.0, 20.0, 1.0),
        ];
        let table = RawTable::from_samples(&[nose, tail]).unwrap();
        let session = clean(&table, &schema(&["nose", "tailbase"]), 0.95).unwrap();

        let p1 = session.position("nose", 1).unwrap();
        let p2 = session.position("nose", 2).unwrap();
        assert_abs_diff_eq!(p1.x, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p2.y, 20.0, epsilon = 1e-9);
        assert_eq!(session.position("tailbase", 0).unwrap(), Position2D::new(10.0, 10.0));
        assert_eq!(session.trajectory("nose").unwrap().repaired_frames(), 2);
    }

    #[test]
    fn test_clean_marks_unusable_keypoint() {
        let nose = vec![Sample::new(1.0, 1.0, 1.0), Sample::new(2.0, 2.0, 1.0)];
        let ear = vec![Sample::new(1.0, 1.0, 0.2), Sample::new(2.0, 2.0, 0.3)];
        let table = RawTable::from_samples(&[nose, ear]).unwrap();
        let session = clean(&table, &schema(&["nose", "leftear"]), 0.95).unwrap();

        assert!(session.is_usable("nose").unwrap());
        assert!(!session.is_usable("leftear").unwrap());
        assert_eq!(session.track("leftear").unwrap().frame_count(), 2);
    }

    #[test]
    fn test_clean_rejects_column_mismatch() {
        let table = RawTable::from_rows(vec![vec![0.0; 6]]).unwrap();
        let result = clean(&table, &schema(&["nose"]), 0.95);
        assert!(matches!(result, Err(Error::Schema(_))));
    }

    #[test]
    fn test_clean_rejects_bad_threshold() {
        let table = RawTable::from_rows(vec![vec![0.0; 3]]).unwrap();
        assert!(matches!(
            clean(&table, &schema(&["nose"]), 1.01),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_clean_does_not_mutate_table() {
        let table = RawTable::from_samples(&[vec![
            Sample::new(0.0, 0.0, 1.0),
            Sample::new(50.0, 50.0, 0.0),
            Sample::new(2.0, 2.0, 1.0),
        ]])
        .unwrap();
        let before = table.clone();
        let _ = clean(&table, &schema(&["nose"]), 0.95).unwrap();
        assert_eq!(table, before);
    }

    #[test]
    fn test_session_records_applied_threshold() {
        let table = RawTable::from_rows(vec![vec![1.0, 1.0, 0.6]]).unwrap();
        let session = clean(&table, &schema(&["nose"]), 0.5).unwrap();
        assert_eq!(session.schema().confidence_threshold(), 0.5);
        assert!(session.trajectory("nose").is_ok());
    }
}
