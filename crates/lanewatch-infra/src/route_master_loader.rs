//! Reference route master loader from TOML

use std::fs;
use std::path::Path;

use serde::Deserialize;

use lanewatch_domain::model::ReferenceRoute;
use lanewatch_types::{Error, Result};

/// Container for parsing routes.toml
#[derive(Debug, Deserialize)]
struct RouteMasterConfig {
    routes: Vec<ReferenceRoute>,
}

/// Load the curated reference route list from a TOML file
pub fn load_routes_from_file(path: &Path) -> Result<Vec<ReferenceRoute>> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::RouteMaster(format!("Failed to read route master file: {}", e)))?;
    load_routes_from_str(&content)
}

/// Load the route list from TOML text
pub fn load_routes_from_str(toml_content: &str) -> Result<Vec<ReferenceRoute>> {
    let config: RouteMasterConfig = toml::from_str(toml_content)
        .map_err(|e| Error::RouteMaster(format!("Failed to parse route master TOML: {}", e)))?;
    Ok(config.routes)
}
