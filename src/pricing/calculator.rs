use tracing::warn;

use crate::error::EngineError;
use crate::pricing::models::{
    CostBreakdown, DiscountPlan, ProvisionedRates, RateTable, BACKUP_STORAGE_RATIO,
    HOURS_PER_MONTH, MAX_ACU, MIN_ACU,
};

/// Calculator for monthly costs under one resolved rate table
///
/// All methods are pure and deterministic; a calculator holds no mutable
/// state and is safe to share across threads.
pub struct CostCalculator {
    rates: RateTable,
}

impl CostCalculator {
    /// Create a new cost calculator
    pub fn new(rates: RateTable) -> Self {
        Self { rates }
    }

    /// The resolved rate table this calculator prices against
    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// Monthly cost under the Standard model (per-request I/O billing)
    pub fn standard_cost(
        &self,
        instance_class: &str,
        storage_gb: f64,
        io_millions: f64,
        discount: Option<DiscountPlan>,
    ) -> Result<CostBreakdown, EngineError> {
        validate_storage(storage_gb)?;
        if io_millions < 0.0 {
            return Err(EngineError::InvalidUsage(format!(
                "I/O volume must be non-negative, got {}",
                io_millions
            )));
        }

        let hourly = self.discounted(hourly_rate(&self.rates.standard, instance_class), discount)?;
        let mut breakdown = CostBreakdown {
            instance_cost: hourly * HOURS_PER_MONTH,
            storage_cost: storage_gb * self.rates.standard.storage_per_gb,
            io_cost: io_millions * self.rates.standard.io_per_million,
            backup_cost: storage_gb * BACKUP_STORAGE_RATIO * self.rates.standard.backup_per_gb,
            total_cost: 0.0,
        };
        breakdown.calculate_total();
        Ok(breakdown)
    }

    /// Monthly cost under the I/O-Optimized model
    ///
    /// The instance rate is structurally higher than Standard's but I/O is
    /// bundled, so the breakdown carries no I/O component and the total is
    /// invariant in I/O volume.
    pub fn io_optimized_cost(
        &self,
        instance_class: &str,
        storage_gb: f64,
        discount: Option<DiscountPlan>,
    ) -> Result<CostBreakdown, EngineError> {
        validate_storage(storage_gb)?;

        let hourly =
            self.discounted(hourly_rate(&self.rates.io_optimized, instance_class), discount)?;
        let mut breakdown = CostBreakdown {
            instance_cost: hourly * HOURS_PER_MONTH,
            storage_cost: storage_gb * self.rates.io_optimized.storage_per_gb,
            io_cost: 0.0,
            backup_cost: storage_gb * BACKUP_STORAGE_RATIO * self.rates.io_optimized.backup_per_gb,
            total_cost: 0.0,
        };
        breakdown.calculate_total();
        Ok(breakdown)
    }

    /// Monthly cost under the Serverless model
    ///
    /// Reserved discounts never apply here; Serverless has no concept of a
    /// reservation.
    pub fn serverless_cost(
        &self,
        average_acu: f64,
        storage_gb: f64,
    ) -> Result<CostBreakdown, EngineError> {
        validate_storage(storage_gb)?;
        if !(MIN_ACU..=MAX_ACU).contains(&average_acu) {
            return Err(EngineError::InvalidUsage(format!(
                "average ACU must be within {}..{}, got {}",
                MIN_ACU, MAX_ACU, average_acu
            )));
        }

        let mut breakdown = CostBreakdown {
            instance_cost: average_acu * self.rates.serverless.acu_per_hour * HOURS_PER_MONTH,
            storage_cost: storage_gb * self.rates.serverless.storage_per_gb,
            io_cost: 0.0,
            backup_cost: storage_gb * BACKUP_STORAGE_RATIO * self.rates.serverless.backup_per_gb,
            total_cost: 0.0,
        };
        breakdown.calculate_total();
        Ok(breakdown)
    }

    /// Apply a reserved discount to an hourly rate before the monthly total
    /// is computed
    fn discounted(
        &self,
        hourly: f64,
        discount: Option<DiscountPlan>,
    ) -> Result<f64, EngineError> {
        match discount {
            None => Ok(hourly),
            Some(plan) => {
                let fraction = self
                    .rates
                    .reserved_discounts
                    .get(&plan)
                    .copied()
                    .ok_or_else(|| EngineError::InvalidDiscountPlan(plan.to_string()))?;
                Ok(hourly * (1.0 - fraction))
            }
        }
    }
}

/// Hourly rate for an instance class
///
/// Unrecognized classes cost zero rather than failing; callers relying on
/// the result should treat zero instance cost for an unknown class as
/// "no pricing data", not a free tier.
fn hourly_rate(rates: &ProvisionedRates, instance_class: &str) -> f64 {
    match rates.hourly_by_class.get(instance_class) {
        Some(hourly) => *hourly,
        None => {
            warn!("no pricing data for instance class: {}", instance_class);
            0.0
        }
    }
}

fn validate_storage(storage_gb: f64) -> Result<(), EngineError> {
    if storage_gb < 0.0 {
        return Err(EngineError::InvalidUsage(format!(
            "storage must be non-negative, got {} GiB",
            storage_gb
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use crate::pricing::catalog::resolve_rates;
    use crate::pricing::models::{DbEngine, Region};

    fn tokyo_mysql_calculator() -> CostCalculator {
        let cfg = PricingConfig::default();
        CostCalculator::new(resolve_rates(&cfg, Region::ApNortheast1, DbEngine::AuroraMysql))
    }

    #[test]
    fn test_standard_breakdown_concrete_scenario() {
        let calc = tokyo_mysql_calculator();
        let breakdown = calc
            .standard_cost("db.r6g.xlarge", 500.0, 0.0, None)
            .unwrap();

        assert_eq!(breakdown.instance_cost, 0.58 * 720.0);
        assert_eq!(breakdown.storage_cost, 50.0);
        assert_eq!(breakdown.io_cost, 0.0);
        assert_eq!(breakdown.backup_cost, 500.0 * 0.25 * 0.021);
        assert!((breakdown.total_cost - 470.225).abs() < 1e-9);
    }

    #[test]
    fn test_io_optimized_breakdown_concrete_scenario() {
        let calc = tokyo_mysql_calculator();
        let breakdown = calc.io_optimized_cost("db.r6g.xlarge", 500.0, None).unwrap();

        assert_eq!(breakdown.instance_cost, 0.754 * 720.0);
        assert_eq!(breakdown.io_cost, 0.0);
        assert!((breakdown.total_cost - 595.505).abs() < 1e-9);
    }

    #[test]
    fn test_totals_are_exact_component_sums() {
        let calc = tokyo_mysql_calculator();
        for breakdown in [
            calc.standard_cost("db.r5.4xlarge", 1234.0, 321.5, None).unwrap(),
            calc.io_optimized_cost("db.r5.4xlarge", 1234.0, None).unwrap(),
            calc.serverless_cost(17.5, 1234.0).unwrap(),
        ] {
            assert_eq!(
                breakdown.total_cost,
                breakdown.instance_cost
                    + breakdown.storage_cost
                    + breakdown.io_cost
                    + breakdown.backup_cost
            );
        }
    }

    #[test]
    fn test_standard_monotonic_in_io_volume() {
        let calc = tokyo_mysql_calculator();
        let low = calc.standard_cost("db.r6g.large", 100.0, 10.0, None).unwrap();
        let high = calc.standard_cost("db.r6g.large", 100.0, 11.0, None).unwrap();
        assert!(high.total_cost > low.total_cost);
        assert!((high.total_cost - low.total_cost - 0.20).abs() < 1e-12);
    }

    #[test]
    fn test_reserved_discount_applies_to_hourly_rate() {
        let calc = tokyo_mysql_calculator();
        let on_demand = calc.standard_cost("db.r6g.xlarge", 0.0, 0.0, None).unwrap();
        let reserved = calc
            .standard_cost(
                "db.r6g.xlarge",
                0.0,
                0.0,
                Some(DiscountPlan::OneYearPartialUpfront),
            )
            .unwrap();

        assert!((reserved.instance_cost - on_demand.instance_cost * 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_missing_discount_plan_is_an_error() {
        let cfg = PricingConfig::default();
        let mut rates = resolve_rates(&cfg, Region::ApNortheast1, DbEngine::AuroraMysql);
        rates.reserved_discounts.clear();
        let calc = CostCalculator::new(rates);

        let result = calc.standard_cost(
            "db.r6g.xlarge",
            100.0,
            0.0,
            Some(DiscountPlan::ThreeYearAllUpfront),
        );
        assert!(matches!(result, Err(EngineError::InvalidDiscountPlan(_))));
    }

    #[test]
    fn test_unknown_instance_class_costs_zero_instance_hours() {
        let calc = tokyo_mysql_calculator();
        let breakdown = calc
            .standard_cost("db.z1d.mega", 200.0, 50.0, None)
            .unwrap();
        assert_eq!(breakdown.instance_cost, 0.0);
        // Storage and I/O components still bill normally
        assert_eq!(breakdown.storage_cost, 20.0);
        assert_eq!(breakdown.io_cost, 10.0);
    }

    #[test]
    fn test_serverless_cost_and_acu_bounds() {
        let calc = tokyo_mysql_calculator();
        let breakdown = calc.serverless_cost(4.0, 500.0).unwrap();
        assert_eq!(breakdown.instance_cost, 4.0 * 0.12 * 720.0);
        assert_eq!(breakdown.io_cost, 0.0);

        assert!(matches!(
            calc.serverless_cost(0.25, 500.0),
            Err(EngineError::InvalidUsage(_))
        ));
        assert!(matches!(
            calc.serverless_cost(300.0, 500.0),
            Err(EngineError::InvalidUsage(_))
        ));
    }

    #[test]
    fn test_negative_usage_is_rejected() {
        let calc = tokyo_mysql_calculator();
        assert!(calc.standard_cost("db.r6g.large", -1.0, 0.0, None).is_err());
        assert!(calc.standard_cost("db.r6g.large", 100.0, -5.0, None).is_err());
        assert!(calc.io_optimized_cost("db.r6g.large", -1.0, None).is_err());
    }
}
