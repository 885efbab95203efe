//! JSON store for unmatched route candidates
//!
//! Candidates accumulate across runs. A candidate is identified by its
//! route_name; re-running the pipeline over the same export must not
//! duplicate rows.

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use lanewatch_domain::model::RouteCandidate;
use lanewatch_domain::repository::RouteCandidateRepository;
use lanewatch_types::{Error, Result};

/// Stored row shape: a candidate plus the id assigned at insert time
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCandidate {
    id: String,
    #[serde(flatten)]
    candidate: RouteCandidate,
}

pub struct FileRouteCandidateRepository {
    path: PathBuf,
}

impl FileRouteCandidateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load_stored(&self) -> Result<Vec<StoredCandidate>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| Error::Persistence(format!("Failed to read candidates: {}", e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::Persistence(format!("Failed to parse candidates: {}", e)))
    }

    fn save_stored(&self, stored: &[StoredCandidate]) -> Result<()> {
        let json = serde_json::to_string_pretty(stored)
            .map_err(|e| Error::Persistence(format!("Failed to serialize candidates: {}", e)))?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).map_err(|e| {
                    Error::Persistence(format!("Failed to create candidates dir: {}", e))
                })?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .map_err(|e| Error::Persistence(format!("Failed to write candidates: {}", e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::Persistence(format!("Failed to replace candidates: {}", e)))?;
        Ok(())
    }
}

impl RouteCandidateRepository for FileRouteCandidateRepository {
    fn upsert_new(&self, candidates: &[RouteCandidate]) -> Result<usize> {
        let mut stored = self.load_stored()?;
        let mut known: HashSet<String> = stored
            .iter()
            .map(|s| s.candidate.route_name.clone())
            .collect();

        let mut inserted = 0;
        for candidate in candidates {
            if known.contains(&candidate.route_name) {
                continue;
            }
            known.insert(candidate.route_name.clone());
            stored.push(StoredCandidate {
                id: Uuid::new_v4().to_string(),
                candidate: candidate.clone(),
            });
            inserted += 1;
        }

        if inserted > 0 {
            self.save_stored(&stored)?;
        }
        debug!(inserted, total = stored.len(), "candidate upsert done");
        Ok(inserted)
    }

    fn find_all(&self) -> Result<Vec<RouteCandidate>> {
        Ok(self
            .load_stored()?
            .into_iter()
            .map(|s| s.candidate)
            .collect())
    }
}
