use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "aurora-cost", version, about = "Aurora billing model cost estimator")]
pub struct Cli {
    /// Pricing configuration file (TOML); built-in list prices when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate monthly costs for one scenario and recommend a billing model
    Estimate {
        /// AWS region (unknown codes fall back to ap-northeast-1 pricing)
        #[arg(short, long, default_value = "ap-northeast-1")]
        region: String,

        /// Database engine: aurora-mysql or aurora-postgresql
        #[arg(short, long, default_value = "aurora-mysql")]
        engine: String,

        /// Provisioned instance class, e.g. db.r6g.xlarge
        #[arg(short, long)]
        instance_class: Option<String>,

        /// Primary storage size (GiB)
        #[arg(short, long, default_value = "100")]
        storage_gb: f64,

        /// Monthly I/O volume in millions of requests
        #[arg(long, default_value = "10")]
        io_millions: f64,

        /// Reserved discount plan: 1y-partial, 1y-all, 3y-partial, 3y-all
        #[arg(short, long)]
        discount: Option<String>,

        /// Price the Serverless model at this average ACU instead of a
        /// provisioned class
        #[arg(long, conflicts_with_all = ["instance_class", "io_millions", "discount"])]
        acu: Option<f64>,
    },

    /// I/O volume at which Standard and I/O-Optimized cost the same
    BreakEven {
        #[arg(short, long, default_value = "ap-northeast-1")]
        region: String,

        #[arg(short, long, default_value = "aurora-mysql")]
        engine: String,

        #[arg(short, long)]
        instance_class: String,

        #[arg(short, long, default_value = "100")]
        storage_gb: f64,

        #[arg(short, long)]
        discount: Option<String>,
    },

    /// Cost curve over I/O volume or storage size
    Sweep {
        #[arg(short, long, default_value = "ap-northeast-1")]
        region: String,

        #[arg(short, long, default_value = "aurora-mysql")]
        engine: String,

        #[arg(short, long)]
        instance_class: String,

        /// Swept variable: io or storage
        #[arg(short, long, default_value = "io")]
        by: String,

        /// Fixed storage size for the I/O sweep (GiB)
        #[arg(short, long, default_value = "100")]
        storage_gb: f64,

        /// Fixed I/O volume for the storage sweep (millions)
        #[arg(long, default_value = "10")]
        io_millions: f64,

        /// Maximum value of the swept variable
        #[arg(short, long, default_value = "100")]
        max: f64,

        /// Number of increments
        #[arg(long, default_value = "10")]
        steps: usize,

        #[arg(short, long)]
        discount: Option<String>,
    },

    /// Print the effective pricing configuration as TOML
    Config,

    /// List the instance classes known to the price lists
    Classes {
        #[arg(short, long, default_value = "aurora-mysql")]
        engine: String,

        #[arg(short, long, default_value = "ap-northeast-1")]
        region: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acu_rejects_provisioned_flags() {
        // Serverless scenarios have no instance class, I/O count, or
        // reservation, so mixing --acu with any of them is an error.
        for extra in [
            ["--instance-class", "db.r6g.xlarge"],
            ["--io-millions", "50"],
            ["--discount", "1y-partial"],
        ] {
            let result = Cli::try_parse_from([
                "aurora-cost",
                "estimate",
                "--acu",
                "4",
                extra[0],
                extra[1],
            ]);
            assert!(result.is_err(), "--acu with {} should fail", extra[0]);
        }
    }

    #[test]
    fn test_acu_alone_parses() {
        let cli = Cli::try_parse_from(["aurora-cost", "estimate", "--acu", "4"]).unwrap();
        match cli.command {
            Commands::Estimate { acu, instance_class, .. } => {
                assert_eq!(acu, Some(4.0));
                assert_eq!(instance_class, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
