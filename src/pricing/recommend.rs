//! Recommendation selector: ranks the active billing models by monthly
//! total and reports the winner's savings against the best losing
//! alternative.

use crate::pricing::models::{BillingModel, Recommendation};

/// Pick the cheapest of the active billing models
///
/// Standard and I/O-Optimized are always compared; Serverless participates
/// only when a total is supplied and wins only when strictly below the
/// better provisioned option. An exact tie between Standard and
/// I/O-Optimized goes to Standard; the comparison is strict-less-than on
/// I/O-Optimized and must stay that way for reproducible output.
pub fn recommend(
    standard_total: f64,
    io_optimized_total: f64,
    serverless_total: Option<f64>,
) -> Recommendation {
    let (provisioned_winner, provisioned_best) = if io_optimized_total < standard_total {
        (BillingModel::IoOptimized, io_optimized_total)
    } else {
        (BillingModel::Standard, standard_total)
    };

    let (winner, winner_total) = match serverless_total {
        Some(serverless) if serverless < provisioned_best => {
            (BillingModel::Serverless, serverless)
        }
        _ => (provisioned_winner, provisioned_best),
    };

    // Savings are measured against the cheapest model that lost.
    let best_loser = [
        (BillingModel::Standard, standard_total),
        (BillingModel::IoOptimized, io_optimized_total),
    ]
    .into_iter()
    .chain(serverless_total.map(|total| (BillingModel::Serverless, total)))
    .filter(|(model, _)| *model != winner)
    .map(|(_, total)| total)
    .fold(f64::INFINITY, f64::min);

    let savings_amount = (best_loser - winner_total).abs();
    let savings_percentage = if best_loser > 0.0 {
        savings_amount / best_loser * 100.0
    } else {
        0.0
    };

    Recommendation {
        winner,
        savings_amount,
        savings_percentage,
    }
}
