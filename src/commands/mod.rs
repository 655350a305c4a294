pub mod break_even;
pub mod classes;
pub mod config;
pub mod estimate;
pub mod sweep;

use anyhow::{anyhow, Result};

use aurora_cost::pricing::{DbEngine, DiscountPlan};

/// Parse an engine name; the engine set is closed, so unknown names are
/// an error rather than a fallback.
pub(crate) fn parse_engine(name: &str) -> Result<DbEngine> {
    DbEngine::parse(name)
        .ok_or_else(|| anyhow!("unknown engine '{}' (expected aurora-mysql or aurora-postgresql)", name))
}

pub(crate) fn parse_discount(plan: Option<&str>) -> Result<Option<DiscountPlan>> {
    match plan {
        None => Ok(None),
        Some(name) => DiscountPlan::parse(name)
            .map(Some)
            .ok_or_else(|| anyhow!("unknown discount plan '{}' (expected 1y-partial, 1y-all, 3y-partial, or 3y-all)", name)),
    }
}

/// Format a USD amount for table output; the engine itself never rounds,
/// rounding happens only here at presentation time.
pub(crate) fn usd(amount: f64) -> String {
    format!("${:.2}", amount)
}
