//! Route configuration module.
//!
//! Each configured route pairs a name with the key template stored in the tree.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{ConfigResult, Validate};
use crate::data_structures::radix_tree::validate_key;
use crate::error::config::ConfigError;

/// A single named route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteConfig {
    /// Name reported when the route matches
    pub name: String,

    /// Key template, e.g. `/api/{resource}/get/{id}`
    pub path: String,
}

impl RouteConfig {
    /// Creates a new route configuration.
    pub fn new<N: Into<String>, P: Into<String>>(name: N, path: P) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Validate for RouteConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "Route name cannot be empty (path: {})",
                self.path
            )));
        }

        validate_key(&self.path).map_err(|e| {
            ConfigError::ValidationError(format!("Invalid path for route {}: {e}", self.name))
        })
    }
}

/// Validates every route and rejects paths registered twice.
pub fn validate_routes(routes: &[RouteConfig]) -> ConfigResult<()> {
    let mut seen = HashSet::with_capacity(routes.len());

    for route in routes {
        route.validate()?;

        if !seen.insert(route.path.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Duplicate route path: {}",
                route.path
            )));
        }
    }

    Ok(())
}

pub(crate) fn sample_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("products", "/api/products"),
        RouteConfig::new("get", "/api/{resource}/get/{id}"),
        RouteConfig::new("delete", "/api/{resource}/delete/{id}"),
        RouteConfig::new("update", "/api/{resource}/update/{id}"),
    ]
}
