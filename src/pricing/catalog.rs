//! Pricing catalog: turns static configuration into region-adjusted rate
//! tables, and maps between Serverless capacity (ACU) and provisioned
//! instance classes.

use tracing::debug;

use crate::config::{PricingConfig, RegionMultipliers};
use crate::pricing::models::{DbEngine, ProvisionedRates, RateTable, Region, ServerlessRates};

/// Resolve the fully-adjusted rate table for one (region, engine) pair
///
/// The region's compute multiplier is applied to every instance-hourly rate
/// and to the Standard I/O rate; its storage multiplier to storage, backup,
/// and ACU rates. The returned table is an independent copy, safe to cache
/// and share across threads.
pub fn resolve_rates(cfg: &PricingConfig, region: Region, engine: DbEngine) -> RateTable {
    let multipliers = region_multipliers(cfg, region);
    let base = cfg.engine_pricing(engine);

    RateTable {
        region,
        engine,
        standard: scale_provisioned(&base.standard, multipliers),
        io_optimized: scale_provisioned(&base.io_optimized, multipliers),
        serverless: scale_serverless(&base.serverless, multipliers),
        reserved_discounts: cfg.discounts.clone(),
    }
}

/// Multipliers for a region, falling back to 1.0/1.0 when the region has no
/// entry in the multiplier table. Deliberately lenient, never an error.
fn region_multipliers(cfg: &PricingConfig, region: Region) -> RegionMultipliers {
    match cfg.regions.get(region.as_str()) {
        Some(m) => *m,
        None => {
            debug!("no multipliers configured for {}, using 1.0", region);
            RegionMultipliers { compute: 1.0, storage: 1.0 }
        }
    }
}

fn scale_provisioned(base: &ProvisionedRates, m: RegionMultipliers) -> ProvisionedRates {
    ProvisionedRates {
        hourly_by_class: base
            .hourly_by_class
            .iter()
            .map(|(class, hourly)| (class.clone(), hourly * m.compute))
            .collect(),
        storage_per_gb: base.storage_per_gb * m.storage,
        io_per_million: base.io_per_million * m.compute,
        backup_per_gb: base.backup_per_gb * m.storage,
    }
}

fn scale_serverless(base: &ServerlessRates, m: RegionMultipliers) -> ServerlessRates {
    ServerlessRates {
        acu_per_hour: base.acu_per_hour * m.storage,
        storage_per_gb: base.storage_per_gb * m.storage,
        backup_per_gb: base.backup_per_gb * m.storage,
    }
}

/// Sorted instance classes available for an engine
pub fn instance_classes(cfg: &PricingConfig, engine: DbEngine) -> Vec<String> {
    let mut classes: Vec<String> = cfg
        .engine_pricing(engine)
        .standard
        .hourly_by_class
        .keys()
        .cloned()
        .collect();
    classes.sort();
    classes
}

/// Nearest provisioned instance class for an average Serverless capacity
///
/// Used to pick the provisioned comparator when a Serverless scenario is
/// ranked against the two provisioned models.
pub fn estimate_class_from_acu(acu: f64) -> &'static str {
    if acu <= 1.0 {
        "db.t4g.medium"
    } else if acu <= 2.0 {
        "db.t4g.large"
    } else if acu <= 4.0 {
        "db.r6g.large"
    } else if acu <= 8.0 {
        "db.r6g.xlarge"
    } else if acu <= 16.0 {
        "db.r6g.2xlarge"
    } else if acu <= 32.0 {
        "db.r6g.4xlarge"
    } else if acu <= 64.0 {
        "db.r6g.8xlarge"
    } else if acu <= 96.0 {
        "db.r6g.12xlarge"
    } else {
        "db.r6g.16xlarge"
    }
}

/// Approximate average ACU capacity of a provisioned instance class
pub fn estimate_acu_from_class(class: &str) -> f64 {
    match class {
        "db.t4g.medium" => 1.0,
        "db.t4g.large" => 2.0,
        "db.r6g.large" => 4.0,
        "db.r6g.xlarge" => 8.0,
        "db.r6g.2xlarge" => 16.0,
        "db.r6g.4xlarge" => 32.0,
        "db.r6g.8xlarge" => 64.0,
        "db.r6g.12xlarge" => 96.0,
        "db.r6g.16xlarge" => 128.0,
        "db.r5.large" => 4.0,
        "db.r5.xlarge" => 8.0,
        "db.r5.2xlarge" => 16.0,
        "db.r5.4xlarge" => 32.0,
        "db.r5.8xlarge" => 64.0,
        "db.r5.12xlarge" => 96.0,
        "db.r5.16xlarge" => 128.0,
        "db.r5.24xlarge" => 192.0,
        _ => 4.0,
    }
}
