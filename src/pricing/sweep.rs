//! Sweep generators: discretized Standard vs I/O-Optimized cost curves for
//! charting. Sequences are deterministic and recomputed on demand, never
//! cached.

use crate::error::EngineError;
use crate::pricing::calculator::CostCalculator;
use crate::pricing::models::{DiscountPlan, SweepPoint, STORAGE_SWEEP_FLOOR_GB};

/// Cost curve over I/O volume, 0 through `max_io_millions` inclusive in
/// `steps` equal increments (10 steps -> 11 points)
pub fn sweep_io_volume(
    calc: &CostCalculator,
    instance_class: &str,
    storage_gb: f64,
    discount: Option<DiscountPlan>,
    max_io_millions: f64,
    steps: usize,
) -> Result<Vec<SweepPoint>, EngineError> {
    if steps == 0 || max_io_millions <= 0.0 {
        return Err(EngineError::InvalidUsage(format!(
            "sweep needs a positive maximum and at least one step, got max={} steps={}",
            max_io_millions, steps
        )));
    }

    // I/O-Optimized is flat in I/O volume; one evaluation covers the curve.
    let io_optimized_cost = calc
        .io_optimized_cost(instance_class, storage_gb, discount)?
        .total_cost;

    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let io = max_io_millions * i as f64 / steps as f64;
        let standard_cost = calc
            .standard_cost(instance_class, storage_gb, io, discount)?
            .total_cost;
        points.push(SweepPoint {
            at: io,
            standard_cost,
            io_optimized_cost,
        });
    }
    Ok(points)
}

/// Cost curve over storage size, from the 100 GiB floor up to
/// `max_storage_gb` inclusive in `max/steps` increments
pub fn sweep_storage(
    calc: &CostCalculator,
    instance_class: &str,
    io_millions: f64,
    discount: Option<DiscountPlan>,
    max_storage_gb: f64,
    steps: usize,
) -> Result<Vec<SweepPoint>, EngineError> {
    if steps == 0 || max_storage_gb < STORAGE_SWEEP_FLOOR_GB {
        return Err(EngineError::InvalidUsage(format!(
            "storage sweep needs a maximum of at least {} GiB and one step, got max={} steps={}",
            STORAGE_SWEEP_FLOOR_GB, max_storage_gb, steps
        )));
    }

    let step = max_storage_gb / steps as f64;
    let mut points = Vec::new();
    let mut storage = STORAGE_SWEEP_FLOOR_GB;
    while storage <= max_storage_gb {
        let standard_cost = calc
            .standard_cost(instance_class, storage, io_millions, discount)?
            .total_cost;
        let io_optimized_cost = calc
            .io_optimized_cost(instance_class, storage, discount)?
            .total_cost;
        points.push(SweepPoint {
            at: storage,
            standard_cost,
            io_optimized_cost,
        });
        storage += step;
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PricingConfig;
    use crate::pricing::catalog::resolve_rates;
    use crate::pricing::models::{DbEngine, Region, DEFAULT_SWEEP_STEPS};

    fn tokyo_mysql_calculator() -> CostCalculator {
        let cfg = PricingConfig::default();
        CostCalculator::new(resolve_rates(&cfg, Region::ApNortheast1, DbEngine::AuroraMysql))
    }

    #[test]
    fn test_io_sweep_boundaries() {
        let calc = tokyo_mysql_calculator();
        let points = sweep_io_volume(
            &calc,
            "db.r6g.xlarge",
            500.0,
            None,
            100.0,
            DEFAULT_SWEEP_STEPS,
        )
        .unwrap();

        assert_eq!(points.len(), 11);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.at, 10.0 * i as f64);
        }
        assert_eq!(points.first().unwrap().at, 0.0);
        assert_eq!(points.last().unwrap().at, 100.0);
    }

    #[test]
    fn test_io_sweep_standard_rises_while_io_optimized_is_flat() {
        let calc = tokyo_mysql_calculator();
        let points =
            sweep_io_volume(&calc, "db.r6g.large", 200.0, None, 500.0, DEFAULT_SWEEP_STEPS)
                .unwrap();

        let flat = points[0].io_optimized_cost;
        for pair in points.windows(2) {
            assert!(pair[1].standard_cost > pair[0].standard_cost);
            assert_eq!(pair[1].io_optimized_cost, flat);
        }
    }

    #[test]
    fn test_storage_sweep_starts_at_floor() {
        let calc = tokyo_mysql_calculator();
        let points = sweep_storage(
            &calc,
            "db.r6g.xlarge",
            50.0,
            None,
            1000.0,
            DEFAULT_SWEEP_STEPS,
        )
        .unwrap();

        assert_eq!(points.first().unwrap().at, 100.0);
        assert_eq!(points.len(), 10);
        assert!(points.last().unwrap().at <= 1000.0);
        for pair in points.windows(2) {
            assert_eq!(pair[1].at - pair[0].at, 100.0);
        }
    }

    #[test]
    fn test_degenerate_sweeps_are_rejected() {
        let calc = tokyo_mysql_calculator();
        assert!(sweep_io_volume(&calc, "db.r6g.large", 100.0, None, 0.0, 10).is_err());
        assert!(sweep_io_volume(&calc, "db.r6g.large", 100.0, None, 100.0, 0).is_err());
        assert!(sweep_storage(&calc, "db.r6g.large", 10.0, None, 50.0, 10).is_err());
    }
}
