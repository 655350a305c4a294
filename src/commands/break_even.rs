use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use aurora_cost::config;
use aurora_cost::pricing::{self, BreakEven, CostCalculator, Region};

use crate::commands::{parse_discount, parse_engine, usd};

/// Execute the break-even command
pub fn execute(
    config_path: Option<&Path>,
    json: bool,
    region: &str,
    engine: &str,
    instance_class: &str,
    storage_gb: f64,
    discount: Option<String>,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let engine = parse_engine(engine)?;
    let region = Region::parse(region);
    let discount = parse_discount(discount.as_deref())?;

    let calc = CostCalculator::new(pricing::resolve_rates(&cfg, region, engine));
    let result = pricing::break_even(&calc, instance_class, storage_gb, discount)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let fixed_standard = calc
        .standard_cost(instance_class, storage_gb, 0.0, discount)?
        .total_cost;
    let fixed_io_optimized = calc
        .io_optimized_cost(instance_class, storage_gb, discount)?
        .total_cost;

    println!("Break-even analysis: {} / {} / {}", region, engine, instance_class);
    println!(
        "  Fixed monthly cost at zero I/O: Standard {}, I/O-Optimized {}",
        usd(fixed_standard),
        usd(fixed_io_optimized)
    );

    match result {
        BreakEven::CrossesAt(volume) => {
            println!(
                "  Models break even at {} million requests/month",
                format!("{:.1}", volume).bold()
            );
            println!("  Below that volume Standard is cheaper; above it I/O-Optimized wins");
        }
        BreakEven::IoOptimizedAlways => {
            println!(
                "  {}",
                "I/O-Optimized costs no more than Standard at every I/O volume".bold()
            );
        }
    }

    Ok(())
}
