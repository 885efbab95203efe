//! Route lookup index keyed by normalized (source, destination)

use std::collections::HashMap;

use tracing::warn;

use crate::model::ReferenceRoute;
use crate::service::normalize::normalize_simple;

/// Normalized route-matching key. Invariant to case and surrounding
/// whitespace of either endpoint.
pub fn make_route_key(source: &str, destination: &str) -> String {
    format!(
        "{}___{}",
        normalize_simple(source),
        normalize_simple(destination)
    )
}

/// Immutable lookup from route key to reference route, built once per
/// pipeline run.
///
/// Duplicate keys follow a last-wins contract: the route later in
/// iteration order replaces the earlier one, and each overwrite is
/// logged with both route ids so the master can be curated.
#[derive(Debug)]
pub struct RouteKeyIndex {
    routes: HashMap<String, ReferenceRoute>,
}

impl RouteKeyIndex {
    pub fn build(routes: &[ReferenceRoute]) -> Self {
        let mut map: HashMap<String, ReferenceRoute> = HashMap::new();
        for route in routes {
            if route.source.trim().is_empty() || route.destination.trim().is_empty() {
                continue;
            }
            let key = make_route_key(&route.source, &route.destination);
            if let Some(prev) = map.insert(key.clone(), route.clone()) {
                warn!(
                    key = %key,
                    replaced = %prev.id,
                    kept = %route.id,
                    "duplicate route key in reference master, last entry wins"
                );
            }
        }
        Self { routes: map }
    }

    pub fn lookup(&self, key: &str) -> Option<&ReferenceRoute> {
        self.routes.get(key)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
