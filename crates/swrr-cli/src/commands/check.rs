use std::path::Path;

use swrr_balancer::KeyedSelector;
use swrr_core::SwrrConfig;

/// Per-pool result of a successful check.
#[derive(Debug, PartialEq, Eq)]
pub struct PoolSummary {
    pub name: String,
    pub backends: usize,
    pub total_weight: i64,
}

/// Build a selector for every pool, stopping at the first invalid one.
pub fn check_config(config: &SwrrConfig) -> anyhow::Result<Vec<PoolSummary>> {
    if config.pools.is_empty() {
        anyhow::bail!("no pools defined");
    }

    let mut summaries = Vec::with_capacity(config.pools.len());
    for (name, pool) in &config.pools {
        let selector = KeyedSelector::from_pool(name, pool)?;
        summaries.push(PoolSummary {
            name: name.clone(),
            backends: selector.len(),
            total_weight: selector.total_weight(),
        });
    }
    Ok(summaries)
}

pub fn check(path: &str) -> anyhow::Result<()> {
    let config = SwrrConfig::from_file(Path::new(path))?;
    match check_config(&config) {
        Ok(summaries) => {
            for s in summaries {
                println!(
                    "✓ {}: {} backends, total weight {}",
                    s.name, s.backends, s.total_weight
                );
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Check failed: {e}");
            Err(e)
        }
    }
}
