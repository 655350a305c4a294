//! Static pricing configuration
//!
//! The engine ships with baked-in defaults (Tokyo list prices, late-2023
//! vintage) and optionally overlays a TOML file plus `AURORA_COST_*`
//! environment variables (`__` separates nesting levels, e.g.
//! `AURORA_COST_DISCOUNTS__ONE_YEAR_PARTIAL_UPFRONT`). Tables are loaded
//! once at startup and treated as immutable afterwards; nothing in the
//! engine mutates them in place.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::pricing::models::{DbEngine, DiscountPlan, ProvisionedRates, ServerlessRates};

/// Region-level price adjustment factors
///
/// Compute and storage drift independently by locale, so the two multipliers
/// are separate tables: `compute` scales instance-hourly and I/O rates,
/// `storage` scales storage, backup, and ACU rates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegionMultipliers {
    pub compute: f64,
    pub storage: f64,
}

/// Base rate tables for one database engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnginePricing {
    pub standard: ProvisionedRates,
    pub io_optimized: ProvisionedRates,
    pub serverless: ServerlessRates,
}

/// Complete static pricing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default = "default_mysql_pricing")]
    pub aurora_mysql: EnginePricing,
    #[serde(default = "default_postgres_pricing")]
    pub aurora_postgresql: EnginePricing,
    #[serde(default = "default_region_multipliers")]
    pub regions: HashMap<String, RegionMultipliers>,
    #[serde(default = "default_discounts")]
    pub discounts: HashMap<DiscountPlan, f64>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            aurora_mysql: default_mysql_pricing(),
            aurora_postgresql: default_postgres_pricing(),
            regions: default_region_multipliers(),
            discounts: default_discounts(),
        }
    }
}

impl PricingConfig {
    /// Base price tables for one engine
    pub fn engine_pricing(&self, engine: DbEngine) -> &EnginePricing {
        match engine {
            DbEngine::AuroraMysql => &self.aurora_mysql,
            DbEngine::AuroraPostgres => &self.aurora_postgresql,
        }
    }
}

/// Load pricing configuration
///
/// Layering: baked-in defaults, then an optional TOML file (`pricing.toml`
/// in the working directory unless a path is given), then environment
/// variables with the `AURORA_COST` prefix.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<PricingConfig> {
    let file_source = match path {
        Some(p) => config::File::from(p),
        None => config::File::with_name("pricing").required(false),
    };

    let raw = config::Config::builder()
        .add_source(file_source)
        .add_source(config::Environment::with_prefix("AURORA_COST").separator("__"))
        .build()?;

    let cfg: PricingConfig = raw.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

/// Validate a pricing configuration
///
/// Rejects negative rates, a zero Standard I/O rate (the break-even solver
/// needs a positive slope), a nonzero I/O-Optimized I/O rate (I/O is bundled
/// into the instance rate in that model), discount fractions outside [0, 1),
/// and non-positive region multipliers.
pub fn validate_config(cfg: &PricingConfig) -> Result<(), EngineError> {
    for (engine, pricing) in [
        (DbEngine::AuroraMysql, &cfg.aurora_mysql),
        (DbEngine::AuroraPostgres, &cfg.aurora_postgresql),
    ] {
        validate_provisioned(engine, "standard", &pricing.standard)?;
        validate_provisioned(engine, "io_optimized", &pricing.io_optimized)?;

        if pricing.standard.io_per_million <= 0.0 {
            return Err(EngineError::Config(format!(
                "{}: standard I/O rate must be positive",
                engine
            )));
        }
        if pricing.io_optimized.io_per_million != 0.0 {
            return Err(EngineError::Config(format!(
                "{}: I/O-Optimized bundles I/O into the instance rate, its I/O rate must be 0",
                engine
            )));
        }

        let sv = &pricing.serverless;
        if sv.acu_per_hour < 0.0 || sv.storage_per_gb < 0.0 || sv.backup_per_gb < 0.0 {
            return Err(EngineError::Config(format!(
                "{}: serverless rates must be non-negative",
                engine
            )));
        }
    }

    for (plan, fraction) in &cfg.discounts {
        if !(0.0..1.0).contains(fraction) {
            return Err(EngineError::Config(format!(
                "discount fraction for {} must be in [0, 1), got {}",
                plan, fraction
            )));
        }
    }

    for (region, m) in &cfg.regions {
        if m.compute <= 0.0 || m.storage <= 0.0 {
            return Err(EngineError::Config(format!(
                "region multipliers for {} must be positive",
                region
            )));
        }
    }

    Ok(())
}

fn validate_provisioned(
    engine: DbEngine,
    model: &str,
    rates: &ProvisionedRates,
) -> Result<(), EngineError> {
    for (class, hourly) in &rates.hourly_by_class {
        if *hourly < 0.0 {
            return Err(EngineError::Config(format!(
                "{}/{}: negative hourly rate for {}",
                engine, model, class
            )));
        }
    }
    if rates.storage_per_gb < 0.0 || rates.io_per_million < 0.0 || rates.backup_per_gb < 0.0 {
        return Err(EngineError::Config(format!(
            "{}/{}: rates must be non-negative",
            engine, model
        )));
    }
    Ok(())
}

fn class_map(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
    pairs
        .iter()
        .map(|(class, rate)| (class.to_string(), *rate))
        .collect()
}

fn default_mysql_pricing() -> EnginePricing {
    EnginePricing {
        standard: ProvisionedRates {
            hourly_by_class: class_map(&[
                ("db.t4g.medium", 0.072),
                ("db.t4g.large", 0.144),
                ("db.r6g.large", 0.29),
                ("db.r6g.xlarge", 0.58),
                ("db.r6g.2xlarge", 1.16),
                ("db.r6g.4xlarge", 2.32),
                ("db.r6g.8xlarge", 4.64),
                ("db.r6g.12xlarge", 6.96),
                ("db.r6g.16xlarge", 9.28),
                ("db.r5.large", 0.33),
                ("db.r5.xlarge", 0.66),
                ("db.r5.2xlarge", 1.32),
                ("db.r5.4xlarge", 2.64),
                ("db.r5.8xlarge", 5.28),
                ("db.r5.12xlarge", 7.92),
                ("db.r5.16xlarge", 10.56),
                ("db.r5.24xlarge", 15.84),
            ]),
            storage_per_gb: 0.10,
            io_per_million: 0.20,
            backup_per_gb: 0.021,
        },
        // Roughly 1.3x the Standard instance rate, zero marginal I/O
        io_optimized: ProvisionedRates {
            hourly_by_class: class_map(&[
                ("db.t4g.medium", 0.094),
                ("db.t4g.large", 0.187),
                ("db.r6g.large", 0.377),
                ("db.r6g.xlarge", 0.754),
                ("db.r6g.2xlarge", 1.508),
                ("db.r6g.4xlarge", 3.016),
                ("db.r6g.8xlarge", 6.032),
                ("db.r6g.12xlarge", 9.048),
                ("db.r6g.16xlarge", 12.064),
                ("db.r5.large", 0.429),
                ("db.r5.xlarge", 0.858),
                ("db.r5.2xlarge", 1.716),
                ("db.r5.4xlarge", 3.432),
                ("db.r5.8xlarge", 6.864),
                ("db.r5.12xlarge", 10.296),
                ("db.r5.16xlarge", 13.728),
                ("db.r5.24xlarge", 20.592),
            ]),
            storage_per_gb: 0.10,
            io_per_million: 0.0,
            backup_per_gb: 0.021,
        },
        serverless: ServerlessRates {
            acu_per_hour: 0.12,
            storage_per_gb: 0.10,
            backup_per_gb: 0.021,
        },
    }
}

fn default_postgres_pricing() -> EnginePricing {
    EnginePricing {
        standard: ProvisionedRates {
            hourly_by_class: class_map(&[
                ("db.t4g.medium", 0.080),
                ("db.t4g.large", 0.160),
                ("db.r6g.large", 0.313),
                ("db.r6g.xlarge", 0.626),
                ("db.r6g.2xlarge", 1.252),
                ("db.r6g.4xlarge", 2.504),
                ("db.r6g.8xlarge", 5.008),
                ("db.r6g.12xlarge", 7.512),
                ("db.r6g.16xlarge", 10.016),
                ("db.r5.large", 0.35),
                ("db.r5.xlarge", 0.70),
                ("db.r5.2xlarge", 1.40),
                ("db.r5.4xlarge", 2.80),
                ("db.r5.8xlarge", 5.60),
                ("db.r5.12xlarge", 8.40),
                ("db.r5.16xlarge", 11.20),
                ("db.r5.24xlarge", 16.80),
            ]),
            storage_per_gb: 0.10,
            io_per_million: 0.20,
            backup_per_gb: 0.021,
        },
        io_optimized: ProvisionedRates {
            hourly_by_class: class_map(&[
                ("db.t4g.medium", 0.104),
                ("db.t4g.large", 0.208),
                ("db.r6g.large", 0.407),
                ("db.r6g.xlarge", 0.814),
                ("db.r6g.2xlarge", 1.628),
                ("db.r6g.4xlarge", 3.255),
                ("db.r6g.8xlarge", 6.510),
                ("db.r6g.12xlarge", 9.766),
                ("db.r6g.16xlarge", 13.021),
                ("db.r5.large", 0.455),
                ("db.r5.xlarge", 0.910),
                ("db.r5.2xlarge", 1.820),
                ("db.r5.4xlarge", 3.640),
                ("db.r5.8xlarge", 7.280),
                ("db.r5.12xlarge", 10.920),
                ("db.r5.16xlarge", 14.560),
                ("db.r5.24xlarge", 21.840),
            ]),
            storage_per_gb: 0.10,
            io_per_million: 0.0,
            backup_per_gb: 0.021,
        },
        serverless: ServerlessRates {
            acu_per_hour: 0.12,
            storage_per_gb: 0.10,
            backup_per_gb: 0.021,
        },
    }
}

fn default_region_multipliers() -> HashMap<String, RegionMultipliers> {
    // Base price lists are ap-northeast-1 (Tokyo), so Tokyo is 1.0/1.0.
    [
        ("ap-northeast-1", RegionMultipliers { compute: 1.0, storage: 1.0 }),
        ("us-east-1", RegionMultipliers { compute: 0.90, storage: 1.00 }),
        ("us-west-2", RegionMultipliers { compute: 0.91, storage: 1.02 }),
        ("eu-west-1", RegionMultipliers { compute: 0.95, storage: 1.10 }),
        ("eu-central-1", RegionMultipliers { compute: 0.97, storage: 1.19 }),
    ]
    .into_iter()
    .map(|(region, m)| (region.to_string(), m))
    .collect()
}

fn default_discounts() -> HashMap<DiscountPlan, f64> {
    [
        (DiscountPlan::OneYearPartialUpfront, 0.40),
        (DiscountPlan::OneYearAllUpfront, 0.45),
        (DiscountPlan::ThreeYearPartialUpfront, 0.60),
        (DiscountPlan::ThreeYearAllUpfront, 0.65),
    ]
    .into_iter()
    .collect()
}
