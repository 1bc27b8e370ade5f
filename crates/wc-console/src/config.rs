//! Console configuration and logical route resolution.
//!
//! Endpoints are named symbolically; the route table maps a logical name to
//! a path and falls back to `/<name>` when no override is present.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use wc_api_types::Endpoint;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_LOGIN_REDIRECT_DELAY_MS: u64 = 2000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    overrides: HashMap<String, String>,
}

impl RouteTable {
    pub fn with_route(mut self, endpoint: Endpoint, path: impl Into<String>) -> Self {
        self.overrides.insert(endpoint.name().to_owned(), path.into());
        self
    }

    /// Path for `endpoint`, always starting with `/`.
    pub fn path(&self, endpoint: Endpoint) -> String {
        match self.overrides.get(endpoint.name()) {
            Some(path) if path.starts_with('/') => path.clone(),
            Some(path) => format!("/{path}"),
            None => format!("/{}", endpoint.name()),
        }
    }

    pub fn url(&self, base_url: &str, endpoint: Endpoint) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path(endpoint))
    }

    /// Logical names in the table that match no known endpoint.
    pub fn unknown_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .overrides
            .keys()
            .map(String::as_str)
            .filter(|name| Endpoint::from_name(name).is_none())
            .collect();
        names.sort_unstable();
        names
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub base_url: String,
    pub routes: RouteTable,
    pub login_redirect_delay_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            routes: RouteTable::default(),
            login_redirect_delay_ms: DEFAULT_LOGIN_REDIRECT_DELAY_MS,
        }
    }
}

impl ConsoleConfig {
    /// Reads `WALLET_CONSOLE_URL` and, if set, the route manifest at `WALLET_CONSOLE_ROUTES`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("WALLET_CONSOLE_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim().trim_end_matches('/').to_owned();
            }
        }
        if let Ok(path) = std::env::var("WALLET_CONSOLE_ROUTES") {
            if !path.trim().is_empty() {
                config.routes = load_route_manifest(path.trim())?;
            }
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn login_redirect_delay(&self) -> Duration {
        Duration::from_millis(self.login_redirect_delay_ms)
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        self.routes.url(&self.base_url, endpoint)
    }
}

/// Parse a `{logical_name: path}` JSON manifest.
pub fn parse_route_manifest(text: &str) -> Result<RouteTable> {
    let routes: RouteTable = serde_json::from_str(text).context("invalid route manifest")?;
    let unknown = routes.unknown_names();
    if !unknown.is_empty() {
        tracing::warn!("route manifest names unknown endpoints: {}", unknown.join(", "));
    }
    Ok(routes)
}

fn load_route_manifest(path: &str) -> Result<RouteTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route manifest {path}"))?;
    parse_route_manifest(&text)
}
