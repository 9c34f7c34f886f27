//! Analysis configuration.

/// Behaviour when an expression reads a variable absent from the current state.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum UndefinedPolicy {
    /// Fail with [`AnalysisError::UndefinedVariable`][crate::error::AnalysisError::UndefinedVariable].
    #[default]
    Strict,
    /// Treat the read as [`Property::Unknown`][crate::property::Property::Unknown].
    Unknown,
}

/// Configuration for [`FixpointEngine`][crate::fixpoint::FixpointEngine].
///
/// # Examples
///
/// ```
/// use arrayflow::config::{AnalysisConfig, UndefinedPolicy};
///
/// let config = AnalysisConfig {
///     fuel: 25,
///     ..AnalysisConfig::default()
/// };
/// assert_eq!(config.undefined, UndefinedPolicy::Strict);
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Maximum number of recorded outer iterations (default: 10)
    pub fuel: usize,
    /// What to do on a read of an undefined variable (default: strict)
    pub undefined: UndefinedPolicy,
}

impl AnalysisConfig {
    pub const DEFAULT_FUEL: usize = 10;
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            fuel: Self::DEFAULT_FUEL,
            undefined: UndefinedPolicy::Strict,
        }
    }
}
