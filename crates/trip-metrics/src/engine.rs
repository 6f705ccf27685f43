//! Memoizing metrics engine over one cleaned session.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trip_core::{Error, Result, Session, Trajectory};

use crate::metric::{self, MetricKind};
use crate::report::{KeypointMetrics, KeypointReport, MetricsReport};

/// Value of one metric for one keypoint within a full mapping
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Value(f64),
    /// The keypoint had no valid samples
    Unavailable,
}

impl MetricValue {
    pub fn value(&self) -> Option<f64> {
        match self {
            MetricValue::Value(v) => Some(*v),
            MetricValue::Unavailable => None,
        }
    }
}

/// One metric across all keypoints, in schema order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricMap {
    pub kind: MetricKind,
    pub entries: Vec<(String, MetricValue)>,
}

impl MetricMap {
    pub fn get(&self, keypoint: &str) -> Option<MetricValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == keypoint)
            .map(|(_, v)| *v)
    }
}

#[derive(Debug, Default)]
struct MetricCache {
    /// Computed values keyed by (metric, keypoint index)
    values: HashMap<(MetricKind, usize), f64>,
    /// How many times each entry has been computed
    computations: HashMap<(MetricKind, usize), usize>,
}

/// Computes the four per-keypoint metrics of a [`Session`] on demand.
///
/// Each (metric, keypoint) pair is computed at most once and reused on every
/// later request. Requesting a metric first resolves its dependencies, each
/// memoized on its own.
pub struct MetricsEngine<'a> {
    session: &'a Session,
    cache: RwLock<MetricCache>,
}

impl<'a> MetricsEngine<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            cache: RwLock::new(MetricCache::default()),
        }
    }

    pub fn session(&self) -> &'a Session {
        self.session
    }

    pub fn time_in_region(&self, keypoint: &str) -> Result<f64> {
        self.metric(MetricKind::TimeInRegion, keypoint)
    }

    pub fn time_outside_region(&self, keypoint: &str) -> Result<f64> {
        self.metric(MetricKind::TimeOutsideRegion, keypoint)
    }

    pub fn total_distance(&self, keypoint: &str) -> Result<f64> {
        self.metric(MetricKind::TotalDistance, keypoint)
    }

    pub fn average_velocity(&self, keypoint: &str) -> Result<f64> {
        self.metric(MetricKind::AverageVelocity, keypoint)
    }

    /// Value of `kind` for `keypoint`, computing it (and its dependencies) if needed.
    ///
    /// Fails with [`Error::UnknownKeypoint`] for names outside the schema and
    /// with [`Error::InsufficientData`] for keypoints that had no valid samples.
    pub fn metric(&self, kind: MetricKind, keypoint: &str) -> Result<f64> {
        let idx = self.keypoint_index(keypoint)?;
        self.resolve(kind, idx, keypoint)
    }

    /// `kind` for every keypoint, in schema order
    pub fn metric_map(&self, kind: MetricKind) -> Result<MetricMap> {
        let mut entries = Vec::with_capacity(self.session.keypoints().len());
        for keypoint in self.session.keypoints() {
            let value = match self.metric(kind, keypoint) {
                Ok(v) => MetricValue::Value(v),
                Err(Error::InsufficientData { .. }) => MetricValue::Unavailable,
                Err(e) => return Err(e),
            };
            entries.push((keypoint.clone(), value));
        }
        Ok(MetricMap { kind, entries })
    }

    pub fn is_computed(&self, kind: MetricKind, keypoint: &str) -> bool {
        match self.session.schema().keypoint_index(keypoint) {
            Some(idx) => self.cache.read().values.contains_key(&(kind, idx)),
            None => false,
        }
    }

    /// Number of successful computations of `kind` for `keypoint`.
    ///
    /// Failed computations are neither cached nor counted.
    pub fn compute_count(&self, kind: MetricKind, keypoint: &str) -> usize {
        self.session
            .schema()
            .keypoint_index(keypoint)
            .and_then(|idx| self.cache.read().computations.get(&(kind, idx)).copied())
            .unwrap_or(0)
    }

    /// Evaluate every metric for every keypoint and collect the results
    pub fn compute_all(&self) -> Result<MetricsReport> {
        let mut keypoints = Vec::with_capacity(self.session.keypoints().len());

        for (name, track) in self.session.tracks() {
            let report = match track.trajectory() {
                Some(trajectory) => KeypointReport::Usable {
                    keypoint: name.to_string(),
                    repaired_frames: trajectory.repaired_frames(),
                    metrics: KeypointMetrics {
                        time_in_region: self.time_in_region(name)?,
                        time_outside_region: self.time_outside_region(name)?,
                        total_distance: self.total_distance(name)?,
                        average_velocity: self.average_velocity(name)?,
                    },
                },
                None => KeypointReport::Unusable {
                    keypoint: name.to_string(),
                },
            };
            keypoints.push(report);
        }

        info!(
            session = %self.session.id(),
            keypoints = keypoints.len(),
            "computed session metrics"
        );
        Ok(MetricsReport::new(self.session, keypoints))
    }

    fn keypoint_index(&self, keypoint: &str) -> Result<usize> {
        self.session
            .schema()
            .keypoint_index(keypoint)
            .ok_or_else(|| Error::UnknownKeypoint(keypoint.to_string()))
    }

    fn cached(&self, kind: MetricKind, idx: usize) -> Option<f64> {
        self.cache.read().values.get(&(kind, idx)).copied()
    }

    fn resolve(&self, kind: MetricKind, idx: usize, keypoint: &str) -> Result<f64> {
        if let Some(value) = self.cached(kind, idx) {
            return Ok(value);
        }

        let trajectory = self.session.trajectory(keypoint)?;
        let mut cache = self.cache.write();
        self.resolve_locked(&mut cache, kind, idx, keypoint, trajectory)
    }

    /// Resolve `kind` and its dependencies while holding the write lock, so a
    /// concurrent caller waits for the value instead of computing it again
    fn resolve_locked(
        &self,
        cache: &mut MetricCache,
        kind: MetricKind,
        idx: usize,
        keypoint: &str,
        trajectory: &Trajectory,
    ) -> Result<f64> {
        if let Some(value) = cache.values.get(&(kind, idx)).copied() {
            return Ok(value);
        }

        for dep in kind.dependencies() {
            self.resolve_locked(cache, *dep, idx, keypoint, trajectory)?;
        }

        let value = self.compute(cache, kind, idx, trajectory)?;
        *cache.computations.entry((kind, idx)).or_insert(0) += 1;
        cache.values.insert((kind, idx), value);
        debug!(metric = %kind, keypoint = %keypoint, value, "computed metric");
        Ok(value)
    }

    /// Compute `kind` assuming its dependencies are already in `cache`
    fn compute(
        &self,
        cache: &MetricCache,
        kind: MetricKind,
        idx: usize,
        trajectory: &Trajectory,
    ) -> Result<f64> {
        let region = self.session.region();
        let frame_rate = self.session.frame_rate();

        match kind {
            MetricKind::TimeInRegion => Ok(metric::time_in_region(trajectory, &region, frame_rate)),
            MetricKind::TimeOutsideRegion => {
                Ok(metric::time_outside_region(trajectory, &region, frame_rate))
            }
            MetricKind::TotalDistance => Ok(metric::total_distance(trajectory)),
            MetricKind::AverageVelocity => {
                let distance = cache
                    .values
                    .get(&(MetricKind::TotalDistance, idx))
                    .copied()
                    .ok_or_else(|| {
                        Error::InvalidInput("total distance must be computed first".into())
                    })?;
                metric::average_velocity(distance, self.session.frame_count(), frame_rate)
            }
        }
    }
}
