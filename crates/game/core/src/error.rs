//! Common error infrastructure for charter-core.
//!
//! Domain-specific errors (e.g. [`TradeError`](crate::economy::TradeError),
//! [`ContractError`](crate::contracts::ContractError)) live beside the
//! operations they reject. Rejections are part of normal play: the engine
//! turns them into status messages and never lets them halt a tick.

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: the same action may succeed later (more gold, less cargo)
/// - **Validation**: the request itself is invalid and should not be retried as-is
/// - **Internal**: the simulation reached a state it should never reach
/// - **Fatal**: the world could not be constructed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: insufficient funds, capacity exceeded
    Recoverable,

    /// Examples: unknown item, permit already owned
    Validation,

    /// Examples: contract offer vanished between selection and accept
    Internal,

    /// Examples: city layout outside the map
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates a bug or a broken world.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all charter-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Keep `error_code` stable; logs and tests match on it
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
