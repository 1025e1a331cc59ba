// Copyright (c) 2025 Route Tree Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Named route table built on top of the radix tree.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::RouteConfig;
use crate::data_structures::radix_tree::{RadixTree, TreeResult};

/// A registered route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    /// Name of the route
    pub name: String,
    /// Key template the route was registered under
    pub path: String,
}

impl From<&RouteConfig> for Route {
    fn from(config: &RouteConfig) -> Self {
        Self {
            name: config.name.clone(),
            path: config.path.clone(),
        }
    }
}

/// A route matched against a request path.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RouteMatch {
    /// The matched route
    pub route: Arc<Route>,
    /// Wildcard bindings, sorted by name
    pub params: BTreeMap<String, String>,
}

/// A set of named routes, matched in registration order.
#[derive(Debug, Default)]
pub struct RouteTable {
    tree: RadixTree<Arc<Route>>,
}

impl RouteTable {
    /// Creates an empty route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a route table from configuration, registering routes in order.
    ///
    /// # Errors
    ///
    /// Fails on the first route the tree rejects.
    pub fn from_config(routes: &[RouteConfig]) -> TreeResult<Self> {
        let table = Self::new();
        for route in routes {
            table.insert(Route::from(route))?;
        }
        info!(routes = routes.len(), "route table built");
        Ok(table)
    }

    /// Registers a route under its path.
    pub fn insert(&self, route: Route) -> TreeResult<()> {
        let path = route.path.clone();
        self.tree.insert(&path, Arc::new(route))?;
        debug!(path = %path, "route registered");
        Ok(())
    }

    /// Resolves a request path to a route, binding wildcard segments.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let (route, params) = self.tree.find(path)?.into_parts();
        Some(RouteMatch {
            route,
            params: params.into_iter().collect(),
        })
    }

    /// Finds the route with the longest path that is a literal prefix of `path`.
    pub fn longest_prefix(&self, path: &str) -> Option<Arc<Route>> {
        self.tree
            .find_longest_match(path)
            .map(|found| found.into_parts().0)
    }

    /// Finds a registered route by name.
    pub fn by_name(&self, name: &str) -> Option<Arc<Route>> {
        let node = self
            .tree
            .get_by_predicate(|node| node.value().is_some_and(|route| route.name == name))?;
        node.value().cloned()
    }

    /// Lists every route in tree order.
    pub fn routes(&self) -> Vec<Arc<Route>> {
        self.tree
            .get_all_leaves()
            .into_iter()
            .map(|leaf| leaf.into_value())
            .collect()
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Checks if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}
