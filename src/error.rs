use thiserror::Error;

/// Engine error types
///
/// All arithmetic inside the engine is infallible; errors only arise at the
/// boundary (configuration and lookup validation).
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error (bad rate table, invalid multiplier, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// A reserved discount was requested with a plan that has no fraction
    /// in the discount table
    #[error("unknown discount plan: {0}")]
    InvalidDiscountPlan(String),

    /// Usage parameters outside the billable domain (negative storage or
    /// I/O volume, ACU outside the supported range)
    #[error("invalid usage: {0}")]
    InvalidUsage(String),
}
