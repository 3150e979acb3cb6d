use std::path::Path;

use serde::Serialize;
use swrr_balancer::KeyedSelector;
use swrr_core::SwrrConfig;
use tracing::debug;

/// Largest number of selections a single plan will hold.
pub const MAX_PLAN_CALLS: u64 = 1_000_000;

/// Dispatch order for whole cycles of one pool.
#[derive(Debug, Serialize)]
pub struct Plan {
    pub pool: String,
    pub cycles: u32,
    pub total_weight: i64,
    pub sequence: Vec<String>,
    pub counts: Vec<KeyCount>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct KeyCount {
    pub key: String,
    pub weight: i64,
    pub picks: u64,
}

pub fn build_plan(config: &SwrrConfig, pool_name: &str, cycles: u32) -> anyhow::Result<Plan> {
    let pool = config
        .pool(pool_name)
        .ok_or_else(|| anyhow::anyhow!("pool not found: {pool_name}"))?;
    let mut selector = KeyedSelector::from_pool(pool_name, pool)?;

    let calls = u64::try_from(selector.total_weight())?
        .checked_mul(u64::from(cycles))
        .filter(|&calls| calls <= MAX_PLAN_CALLS)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "plan for {cycles} cycle(s) of total weight {} exceeds {MAX_PLAN_CALLS} selections",
                selector.total_weight()
            )
        })?;
    debug!(pool = pool_name, calls, "building dispatch plan");

    let mut picks = vec![0u64; selector.len()];
    let mut sequence = Vec::with_capacity(usize::try_from(calls)?);
    for _ in 0..calls {
        let idx = selector.select_next_index();
        picks[idx] += 1;
        sequence.push(selector.keys()[idx].clone());
    }

    let counts = pool
        .backends
        .iter()
        .zip(picks)
        .map(|(backend, picks)| KeyCount {
            key: backend.key.clone(),
            weight: backend.weight,
            picks,
        })
        .collect();

    Ok(Plan {
        pool: pool_name.to_string(),
        cycles,
        total_weight: selector.total_weight(),
        sequence,
        counts,
    })
}

pub fn format_plan(plan: &Plan) -> String {
    let mut out = format!(
        "Pool {} ({} cycle(s), total weight {})\n",
        plan.pool, plan.cycles, plan.total_weight
    );
    for (n, key) in plan.sequence.iter().enumerate() {
        out.push_str(&format!("{:>6}  {key}\n", n + 1));
    }
    out.push_str("\nPicks per backend:\n");
    for c in &plan.counts {
        out.push_str(&format!(
            "  {:<24} weight {:>4}  picks {:>6}\n",
            c.key, c.weight, c.picks
        ));
    }
    out
}

pub fn plan(path: &str, pool: &str, cycles: u32, format: &str) -> anyhow::Result<()> {
    let config = SwrrConfig::from_file(Path::new(path))?;
    let plan = build_plan(&config, pool, cycles)?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        _ => {
            print!("{}", format_plan(&plan));
        }
    }

    Ok(())
}
