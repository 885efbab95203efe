//! File-backed repository implementations

mod file_aggregate_repo;
mod file_route_candidate_repo;

pub use file_aggregate_repo::FileAggregateSnapshotRepository;
pub use file_route_candidate_repo::FileRouteCandidateRepository;
