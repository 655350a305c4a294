use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Billing hours in one month (30 days x 24 hours).
///
/// Every hour-based cost in the engine uses this exact constant so displayed
/// breakdowns and derived figures (break-even, sweeps) stay consistent.
pub const HOURS_PER_MONTH: f64 = 720.0;

/// Backup volume is modeled as a fixed 25% of primary storage.
pub const BACKUP_STORAGE_RATIO: f64 = 0.25;

/// Default number of sweep increments (10 increments -> 11 points).
pub const DEFAULT_SWEEP_STEPS: usize = 10;

/// Storage sweeps start here instead of zero; clusters below 100 GiB are not
/// a realistic sizing question in this domain.
pub const STORAGE_SWEEP_FLOOR_GB: f64 = 100.0;

/// Supported ACU range for the Serverless model.
pub const MIN_ACU: f64 = 0.5;
pub const MAX_ACU: f64 = 256.0;

/// Supported AWS regions (closed set)
///
/// The base price lists are Tokyo rates, so Tokyo is the default region with
/// a multiplier of 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "ap-northeast-1")]
    ApNortheast1,
    #[serde(rename = "us-east-1")]
    UsEast1,
    #[serde(rename = "us-west-2")]
    UsWest2,
    #[serde(rename = "eu-west-1")]
    EuWest1,
    #[serde(rename = "eu-central-1")]
    EuCentral1,
}

impl Region {
    pub const DEFAULT: Region = Region::ApNortheast1;

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::ApNortheast1 => "ap-northeast-1",
            Region::UsEast1 => "us-east-1",
            Region::UsWest2 => "us-west-2",
            Region::EuWest1 => "eu-west-1",
            Region::EuCentral1 => "eu-central-1",
        }
    }

    /// Lenient parse: unknown region codes resolve to the default region
    /// (multiplier 1.0) instead of failing.
    pub fn parse(code: &str) -> Region {
        match code {
            "ap-northeast-1" => Region::ApNortheast1,
            "us-east-1" => Region::UsEast1,
            "us-west-2" => Region::UsWest2,
            "eu-west-1" => Region::EuWest1,
            "eu-central-1" => Region::EuCentral1,
            other => {
                debug!("unknown region '{}', using {}", other, Region::DEFAULT);
                Region::DEFAULT
            }
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported database engines (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbEngine {
    #[serde(rename = "aurora-mysql")]
    AuroraMysql,
    #[serde(rename = "aurora-postgresql")]
    AuroraPostgres,
}

impl DbEngine {
    pub fn as_str(&self) -> &'static str {
        match self {
            DbEngine::AuroraMysql => "aurora-mysql",
            DbEngine::AuroraPostgres => "aurora-postgresql",
        }
    }

    /// Strict parse; the engine set is closed and there is no sensible
    /// fallback between MySQL and PostgreSQL price lists.
    pub fn parse(name: &str) -> Option<DbEngine> {
        match name {
            "aurora-mysql" | "mysql" => Some(DbEngine::AuroraMysql),
            "aurora-postgresql" | "aurora-postgres" | "postgres" => Some(DbEngine::AuroraPostgres),
            _ => None,
        }
    }
}

impl fmt::Display for DbEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reserved instance commitment plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountPlan {
    OneYearPartialUpfront,
    OneYearAllUpfront,
    ThreeYearPartialUpfront,
    ThreeYearAllUpfront,
}

impl DiscountPlan {
    pub fn parse(name: &str) -> Option<DiscountPlan> {
        match name {
            "1y-partial" | "one-year-partial-upfront" => Some(DiscountPlan::OneYearPartialUpfront),
            "1y-all" | "one-year-all-upfront" => Some(DiscountPlan::OneYearAllUpfront),
            "3y-partial" | "three-year-partial-upfront" => {
                Some(DiscountPlan::ThreeYearPartialUpfront)
            }
            "3y-all" | "three-year-all-upfront" => Some(DiscountPlan::ThreeYearAllUpfront),
            _ => None,
        }
    }
}

impl fmt::Display for DiscountPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DiscountPlan::OneYearPartialUpfront => "1-year partial upfront",
            DiscountPlan::OneYearAllUpfront => "1-year all upfront",
            DiscountPlan::ThreeYearPartialUpfront => "3-year partial upfront",
            DiscountPlan::ThreeYearAllUpfront => "3-year all upfront",
        };
        f.write_str(name)
    }
}

/// The three billing models under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BillingModel {
    Standard,
    IoOptimized,
    Serverless,
}

impl fmt::Display for BillingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BillingModel::Standard => "Aurora Standard",
            BillingModel::IoOptimized => "Aurora I/O-Optimized",
            BillingModel::Serverless => "Aurora Serverless v2",
        };
        f.write_str(name)
    }
}

/// Rates for one provisioned billing model (Standard or I/O-Optimized)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionedRates {
    /// Storage rate (USD/GiB/month)
    pub storage_per_gb: f64,
    /// I/O rate (USD per million requests); always 0 for I/O-Optimized
    pub io_per_million: f64,
    /// Backup storage rate (USD/GiB/month)
    pub backup_per_gb: f64,
    /// Hourly instance rate per instance class (USD/hour)
    pub hourly_by_class: HashMap<String, f64>,
}

/// Rates for the Serverless model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerlessRates {
    /// ACU rate (USD/ACU-hour)
    pub acu_per_hour: f64,
    /// Storage rate (USD/GiB/month)
    pub storage_per_gb: f64,
    /// Backup storage rate (USD/GiB/month)
    pub backup_per_gb: f64,
}

/// Fully region-adjusted pricing for one (region, engine) pair
///
/// Every resolution produces an independent copy; callers may cache one per
/// (region, engine) for the process lifetime and share it freely across
/// threads.
#[derive(Debug, Clone, Serialize)]
pub struct RateTable {
    pub region: Region,
    pub engine: DbEngine,
    pub standard: ProvisionedRates,
    pub io_optimized: ProvisionedRates,
    pub serverless: ServerlessRates,
    pub reserved_discounts: HashMap<DiscountPlan, f64>,
}

/// Capacity mode of a scenario
///
/// The tagged split makes "ACU is irrelevant for provisioned" and "I/O count
/// and reservations are irrelevant for Serverless" structurally
/// inexpressible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum CapacityMode {
    Provisioned {
        instance_class: String,
        /// Monthly I/O volume in millions of requests
        io_millions: f64,
        discount: Option<DiscountPlan>,
    },
    Serverless {
        average_acu: f64,
    },
}

/// One caller-supplied scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRequest {
    pub region: Region,
    pub engine: DbEngine,
    pub storage_gb: f64,
    #[serde(flatten)]
    pub mode: CapacityMode,
}

/// Monthly cost decomposed into its billed components
///
/// `total_cost` is always the exact f64 sum of the four components. The
/// engine never rounds; rounding is a presentation concern.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CostBreakdown {
    pub instance_cost: f64,
    pub storage_cost: f64,
    pub io_cost: f64,
    pub backup_cost: f64,
    pub total_cost: f64,
}

impl CostBreakdown {
    /// Create a zero-cost breakdown
    pub fn zero() -> Self {
        Self::default()
    }

    /// Calculate total cost from components
    pub fn calculate_total(&mut self) {
        self.total_cost = self.instance_cost + self.storage_cost + self.io_cost + self.backup_cost;
    }
}

/// One point of a parametric cost sweep
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    /// Value of the swept variable (I/O millions or storage GiB)
    pub at: f64,
    pub standard_cost: f64,
    pub io_optimized_cost: f64,
}

/// Break-even analysis result
///
/// The reference collapsed "I/O-Optimized is cheaper everywhere" and
/// "equal exactly at zero" into a `0` sentinel; the enum keeps the two cost
/// regimes distinct while [`BreakEven::millions`] preserves the sentinel for
/// chart and display compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "io_millions", rename_all = "kebab-case")]
pub enum BreakEven {
    /// Standard is cheaper below this I/O volume (millions/month),
    /// I/O-Optimized above it
    CrossesAt(f64),
    /// I/O-Optimized costs no more than Standard at every volume,
    /// including zero
    IoOptimizedAlways,
}

impl BreakEven {
    /// Crossover volume in millions of requests, with `0.0` as the
    /// "always dominant" sentinel the reference used.
    pub fn millions(&self) -> f64 {
        match self {
            BreakEven::CrossesAt(v) => *v,
            BreakEven::IoOptimizedAlways => 0.0,
        }
    }
}

/// Outcome of ranking the active billing models
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub winner: BillingModel,
    /// Absolute monthly savings versus the best losing alternative (USD)
    pub savings_amount: f64,
    /// Savings as a percentage of the best losing alternative's total
    pub savings_percentage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_parse_lenient() {
        assert_eq!(Region::parse("us-east-1"), Region::UsEast1);
        assert_eq!(Region::parse("mars-north-1"), Region::DEFAULT);
    }

    #[test]
    fn test_engine_parse_strict() {
        assert_eq!(DbEngine::parse("aurora-mysql"), Some(DbEngine::AuroraMysql));
        assert_eq!(
            DbEngine::parse("postgres"),
            Some(DbEngine::AuroraPostgres)
        );
        assert_eq!(DbEngine::parse("oracle"), None);
    }

    #[test]
    fn test_breakdown_total() {
        let mut breakdown = CostBreakdown {
            instance_cost: 417.6,
            storage_cost: 50.0,
            io_cost: 20.0,
            backup_cost: 2.625,
            total_cost: 0.0,
        };
        breakdown.calculate_total();
        assert_eq!(breakdown.total_cost, 417.6 + 50.0 + 20.0 + 2.625);
    }

    #[test]
    fn test_break_even_sentinel() {
        assert_eq!(BreakEven::CrossesAt(626.4).millions(), 626.4);
        assert_eq!(BreakEven::IoOptimizedAlways.millions(), 0.0);
    }
}
