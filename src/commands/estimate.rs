use std::path::Path;

use anyhow::{bail, Result};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use tracing::info;

use aurora_cost::config;
use aurora_cost::pricing::{self, BreakEven, CapacityMode, CostBreakdown, Region, UsageRequest};

use crate::commands::{parse_discount, parse_engine, usd};

/// Execute the estimate command
#[allow(clippy::too_many_arguments)]
pub fn execute(
    config_path: Option<&Path>,
    json: bool,
    region: &str,
    engine: &str,
    instance_class: Option<String>,
    storage_gb: f64,
    io_millions: f64,
    discount: Option<String>,
    acu: Option<f64>,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let engine = parse_engine(engine)?;
    let region = Region::parse(region);
    let discount = parse_discount(discount.as_deref())?;

    let mode = match (acu, instance_class) {
        (Some(average_acu), _) => CapacityMode::Serverless { average_acu },
        (None, Some(class)) => CapacityMode::Provisioned {
            instance_class: class,
            io_millions,
            discount,
        },
        (None, None) => bail!("either --instance-class or --acu is required"),
    };

    let request = UsageRequest {
        region,
        engine,
        storage_gb,
        mode,
    };

    info!("estimating scenario for {} / {}", region, engine);
    let result = pricing::estimate(&cfg, &request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Aurora monthly cost estimate");
    println!("============================\n");
    println!("  Region:          {}", region);
    println!("  Engine:          {}", engine);
    println!("  Instance class:  {}", result.compared_class);
    println!("  Storage:         {} GiB\n", storage_gb);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Model", "Instance/ACU", "Storage", "I/O", "Backup", "Total"]);
    push_breakdown(&mut table, "Aurora Standard", &result.standard);
    push_breakdown(&mut table, "Aurora I/O-Optimized", &result.io_optimized);
    if let Some(serverless) = &result.serverless {
        push_breakdown(&mut table, "Aurora Serverless v2", serverless);
    }
    println!("{table}\n");

    match result.break_even {
        BreakEven::CrossesAt(volume) => println!(
            "Break-even I/O volume: {:.1} million requests/month",
            volume
        ),
        BreakEven::IoOptimizedAlways => {
            println!("I/O-Optimized costs no more than Standard at any I/O volume")
        }
    }

    let rec = &result.recommendation;
    println!("\nRecommended: {}", rec.winner.to_string().green().bold());
    println!(
        "Saves {} per month ({:.1}%) versus the next best option",
        usd(rec.savings_amount).bold(),
        rec.savings_percentage
    );

    Ok(())
}

fn push_breakdown(table: &mut Table, model: &str, breakdown: &CostBreakdown) {
    table.add_row(vec![
        model.to_string(),
        usd(breakdown.instance_cost),
        usd(breakdown.storage_cost),
        usd(breakdown.io_cost),
        usd(breakdown.backup_cost),
        usd(breakdown.total_cost),
    ]);
}
