//! Break-even solver
//!
//! Both provisioned totals are affine in I/O volume: Standard's cost is
//! `fixed_standard + volume * io_rate` while I/O-Optimized's is a constant
//! `fixed_io_optimized`. The crossover therefore has a closed form; no
//! iterative search is involved.

use crate::error::EngineError;
use crate::pricing::calculator::CostCalculator;
use crate::pricing::models::{BreakEven, DiscountPlan};

/// I/O volume (millions of requests per month) at which Standard and
/// I/O-Optimized cost the same
///
/// Fixed costs are evaluated at zero I/O. When I/O-Optimized's fixed cost
/// already sits at or below Standard's, it dominates at every non-negative
/// volume (Standard only grows with volume) and the result is
/// [`BreakEven::IoOptimizedAlways`].
pub fn break_even(
    calc: &CostCalculator,
    instance_class: &str,
    storage_gb: f64,
    discount: Option<DiscountPlan>,
) -> Result<BreakEven, EngineError> {
    let fixed_standard = calc
        .standard_cost(instance_class, storage_gb, 0.0, discount)?
        .total_cost;
    let fixed_io_optimized = calc
        .io_optimized_cost(instance_class, storage_gb, discount)?
        .total_cost;

    if fixed_io_optimized > fixed_standard {
        // fixed_io_optimized = fixed_standard + volume * io_rate
        let io_rate = calc.rates().standard.io_per_million;
        Ok(BreakEven::CrossesAt(
            (fixed_io_optimized - fixed_standard) / io_rate,
        ))
    } else {
        Ok(BreakEven::IoOptimizedAlways)
    }
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
    fn test_break_even_concrete_scenario() {
        // Standard fixed:      0.58  * 720 + 500 * 0.10 + 500 * 0.25 * 0.021 = 470.225
        // I/O-Optimized fixed: 0.754 * 720 + 500 * 0.10 + 500 * 0.25 * 0.021 = 595.505
        // Crossover: (595.505 - 470.225) / 0.20 = 626.4 million requests
        let calc = tokyo_mysql_calculator();
        let result = break_even(&calc, "db.r6g.xlarge", 500.0, None).unwrap();

        match result {
            BreakEven::CrossesAt(v) => assert!((v - 626.4).abs() < 1e-9),
            other => panic!("expected a crossover, got {:?}", other),
        }
    }

    #[test]
    fn test_costs_are_equal_at_the_crossover() {
        let calc = tokyo_mysql_calculator();
        let volume = break_even(&calc, "db.r5.2xlarge", 800.0, None)
            .unwrap()
            .millions();
        assert!(volume > 0.0);

        let standard = calc
            .standard_cost("db.r5.2xlarge", 800.0, volume, None)
            .unwrap()
            .total_cost;
        let io_optimized = calc
            .io_optimized_cost("db.r5.2xlarge", 800.0, None)
            .unwrap()
            .total_cost;
        assert!((standard - io_optimized).abs() / io_optimized < 1e-9);
    }

    #[test]
    fn test_dominant_io_optimized_returns_sentinel() {
        // With an unknown class both instance rates are zero, so the fixed
        // costs tie and I/O-Optimized can never be beaten.
        let calc = tokyo_mysql_calculator();
        let result = break_even(&calc, "db.unknown.class", 500.0, None).unwrap();
        assert_eq!(result, BreakEven::IoOptimizedAlways);
        assert_eq!(result.millions(), 0.0);
    }

    #[test]
    fn test_discount_shrinks_the_crossover() {
        // The discount scales both hourly rates, shrinking the fixed-cost
        // gap while the I/O rate stays put.
        let calc = tokyo_mysql_calculator();
        let on_demand = break_even(&calc, "db.r6g.4xlarge", 500.0, None)
            .unwrap()
            .millions();
        let reserved = break_even(
            &calc,
            "db.r6g.4xlarge",
            500.0,
            Some(DiscountPlan::ThreeYearAllUpfront),
        )
        .unwrap()
        .millions();

        assert!(reserved > 0.0);
        assert!(reserved < on_demand);
    }
}
