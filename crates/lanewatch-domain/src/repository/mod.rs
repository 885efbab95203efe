//! Repository trait definitions for data persistence

use crate::model::{RouteAggregate, RouteCandidate};
use lanewatch_types::Error;

/// Repository for the dashboard aggregate snapshot.
///
/// A pipeline run produces a complete snapshot; persistence is a single
/// atomic replace, never an incremental mutation.
pub trait AggregateSnapshotRepository {
    /// Replace the stored snapshot with a new one
    fn replace_all(&self, aggregates: &[RouteAggregate]) -> Result<(), Error>;

    /// Load the current snapshot, empty when none has been written
    fn find_all(&self) -> Result<Vec<RouteAggregate>, Error>;
}

/// Repository for unmatched route candidates awaiting curation
pub trait RouteCandidateRepository {
    /// Insert candidates whose route_name is not yet present.
    /// Returns the number of rows actually inserted.
    fn upsert_new(&self, candidates: &[RouteCandidate]) -> Result<usize, Error>;

    /// Load all stored candidates
    fn find_all(&self) -> Result<Vec<RouteCandidate>, Error>;
}
