use std::path::Path;

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use aurora_cost::config;
use aurora_cost::pricing::{self, Region};

use crate::commands::parse_engine;

/// Execute the classes command: list instance classes with their adjusted
/// hourly rates and approximate Serverless capacity
pub fn execute(
    config_path: Option<&Path>,
    json: bool,
    engine: &str,
    region: &str,
) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let engine = parse_engine(engine)?;
    let region = Region::parse(region);

    let classes = pricing::instance_classes(&cfg, engine);

    if json {
        println!("{}", serde_json::to_string_pretty(&classes)?);
        return Ok(());
    }

    let rates = pricing::resolve_rates(&cfg, region, engine);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Instance class",
            "Standard $/hr",
            "I/O-Optimized $/hr",
            "~ACU",
        ]);

    for class in &classes {
        let standard = rates.standard.hourly_by_class.get(class).copied();
        let io_optimized = rates.io_optimized.hourly_by_class.get(class).copied();
        table.add_row(vec![
            class.clone(),
            standard.map_or("-".to_string(), |r| format!("{:.4}", r)),
            io_optimized.map_or("-".to_string(), |r| format!("{:.4}", r)),
            format!("{:.0}", pricing::estimate_acu_from_class(class)),
        ]);
    }

    println!("Instance classes: {} / {}", region, engine);
    println!("{table}");

    Ok(())
}
