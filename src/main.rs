use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use aurora_cost::init_tracing;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing();

    let config_path = args.config.as_deref();

    match args.command {
        cli::Commands::Estimate {
            region,
            engine,
            instance_class,
            storage_gb,
            io_millions,
            discount,
            acu,
        } => {
            commands::estimate::execute(
                config_path,
                args.json,
                &region,
                &engine,
                instance_class,
                storage_gb,
                io_millions,
                discount,
                acu,
            )?;
        }
        cli::Commands::BreakEven {
            region,
            engine,
            instance_class,
            storage_gb,
            discount,
        } => {
            commands::break_even::execute(
                config_path,
                args.json,
                &region,
                &engine,
                &instance_class,
                storage_gb,
                discount,
            )?;
        }
        cli::Commands::Sweep {
            region,
            engine,
            instance_class,
            by,
            storage_gb,
            io_millions,
            max,
            steps,
            discount,
        } => {
            commands::sweep::execute(
                config_path,
                args.json,
                &region,
                &engine,
                &instance_class,
                &by,
                storage_gb,
                io_millions,
                max,
                steps,
                discount,
            )?;
        }
        cli::Commands::Config => {
            commands::config::execute(config_path, args.json)?;
        }
        cli::Commands::Classes { engine, region } => {
            commands::classes::execute(config_path, args.json, &engine, &region)?;
        }
    }

    Ok(())
}
