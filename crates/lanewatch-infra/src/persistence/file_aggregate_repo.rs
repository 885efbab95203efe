//! JSON snapshot store for route aggregates
//!
//! Each reconciliation run replaces the whole snapshot. The write goes
//! to a temporary file in the same directory and is renamed over the
//! old snapshot, so a crashed run never leaves a half-written file.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use lanewatch_domain::model::RouteAggregate;
use lanewatch_domain::repository::AggregateSnapshotRepository;
use lanewatch_types::{Error, Result};

pub struct FileAggregateSnapshotRepository {
    path: PathBuf,
}

impl FileAggregateSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AggregateSnapshotRepository for FileAggregateSnapshotRepository {
    fn replace_all(&self, aggregates: &[RouteAggregate]) -> Result<()> {
        let json = serde_json::to_string_pretty(aggregates)
            .map_err(|e| Error::Persistence(format!("Failed to serialize snapshot: {}", e)))?;

        let dir = self.path.parent().unwrap_or_else(|| std::path::Path::new("."));
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)
                .map_err(|e| Error::Persistence(format!("Failed to create snapshot dir: {}", e)))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| Error::Persistence(format!("Failed to write snapshot: {}", e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::Persistence(format!("Failed to replace snapshot: {}", e)))?;

        debug!(count = aggregates.len(), path = %self.path.display(), "snapshot replaced");
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<RouteAggregate>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::Persistence(format!("Failed to read snapshot: {}", e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Persistence(format!("Failed to parse snapshot: {}", e)))
    }
}
