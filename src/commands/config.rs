use std::path::Path;

use anyhow::Result;

use aurora_cost::config;

/// Execute the config command: dump the effective pricing tables after
/// defaults, file, and environment overrides have been layered
pub fn execute(config_path: Option<&Path>, json: bool) -> Result<()> {
    let cfg = config::load_config(config_path)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
    } else {
        println!("{}", toml::to_string_pretty(&cfg)?);
    }

    Ok(())
}
