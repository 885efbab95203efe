//! Domain layer for lanewatch: record types, matching services,
//! and repository trait definitions.

pub mod model;
pub mod repository;
pub mod service;
