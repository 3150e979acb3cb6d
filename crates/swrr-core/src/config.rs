//! pools.toml configuration parser.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SwrrConfig {
    #[serde(default)]
    pub pools: BTreeMap<String, PoolSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSpec {
    pub description: Option<String>,
    #[serde(default)]
    pub backends: Vec<BackendSpec>,
}

/// A single weighted backend. Order within a pool is significant: it
/// fixes the selection tie-break order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSpec {
    pub key: String,
    /// Left signed so that bad values survive parsing and get reported
    /// by the balancer rather than as a TOML type error.
    pub weight: i64,
}

impl PoolSpec {
    pub fn total_weight(&self) -> i64 {
        self.backends
            .iter()
            .fold(0i64, |acc, b| acc.saturating_add(b.weight))
    }

    /// `(key, weight)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (String, i64)> + '_ {
        self.backends.iter().map(|b| (b.key.clone(), b.weight))
    }
}

impl SwrrConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: SwrrConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn pool(&self, name: &str) -> Option<&PoolSpec> {
        self.pools.get(name)
    }

    pub fn pool_names(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }

    /// Scaffold a sample pools.toml with a single weighted pool.
    pub fn scaffold() -> Self {
        let backends = [
            ("10.0.0.1:8080", 1),
            ("10.0.0.2:8080", 2),
            ("10.0.0.3:8080", 3),
            ("10.0.0.4:8080", 4),
        ]
        .into_iter()
        .map(|(key, weight)| BackendSpec {
            key: key.to_string(),
            weight,
        })
        .collect();

        let mut pools = BTreeMap::new();
        pools.insert(
            "api".to_string(),
            PoolSpec {
                description: Some("public API backends".to_string()),
                backends,
            },
        );
        SwrrConfig { pools }
    }
}
