// error.rs - Engine error taxonomy

use thiserror::Error;

/// Errors reported by the comparison engine.
///
/// Length degeneracy (empty sequences, sequences shorter than the n-gram
/// width) is never an error; those cases resolve to defined boundary
/// values. The engine performs no I/O, so every failure here is a usage
/// error surfaced synchronously.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The requested metric identifier is not registered.
    #[error("unknown metric: '{0}'")]
    UnknownMetric(String),

    /// A metric configuration is outside the supported range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
