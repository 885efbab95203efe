//! Application layer for lanewatch: configuration and the
//! reconciliation pipeline that wires the domain services together.

pub mod config;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{run_pipeline, PipelineInputs, PipelineOptions, PipelineOutput, PipelineSummary};
