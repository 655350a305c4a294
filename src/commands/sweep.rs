use std::path::Path;

use anyhow::{bail, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use aurora_cost::config;
use aurora_cost::pricing::{self, CostCalculator, Region, SweepPoint};

use crate::commands::{parse_discount, parse_engine, usd};

/// Execute the sweep command
#[allow(clippy::too_many_arguments)]
pub fn execute(
    config_path: Option<&Path>,
    json: bool,
    region: &str,
    engine: &str,
    instance_class: &str,
    by: &str,
    storage_gb: f64,
    io_millions: f64,
    max: f64,
    steps: usize,
    discount: Option<String>,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let engine = parse_engine(engine)?;
    let region = Region::parse(region);
    let discount = parse_discount(discount.as_deref())?;

    let calc = CostCalculator::new(pricing::resolve_rates(&cfg, region, engine));

    let (points, variable) = match by {
        "io" => (
            pricing::sweep_io_volume(&calc, instance_class, storage_gb, discount, max, steps)?,
            "I/O (millions/month)",
        ),
        "storage" => (
            pricing::sweep_storage(&calc, instance_class, io_millions, discount, max, steps)?,
            "Storage (GiB)",
        ),
        other => bail!("unknown sweep variable '{}' (expected io or storage)", other),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!(
        "Cost sweep: {} / {} / {}, by {}",
        region, engine, instance_class, variable
    );
    print_points(variable, &points);

    Ok(())
}

fn print_points(variable: &str, points: &[SweepPoint]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![variable, "Standard", "I/O-Optimized"]);

    for point in points {
        table.add_row(vec![
            format!("{:.1}", point.at),
            usd(point.standard_cost),
            usd(point.io_optimized_cost),
        ]);
    }

    println!("{table}");
}
