//! Error types for calc-engine

use thiserror::Error;

/// Calculation errors
///
/// Every variant is a rejected caller input. The engine state is left
/// untouched and the next call can proceed normally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Cannot divide by zero")]
    DivisionByZero,

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),
}

impl CalcError {
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        Self::InvalidDomain(msg.into())
    }

    /// Stable machine-readable code for this error
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DivisionByZero => "division_by_zero",
            Self::InvalidDomain(_) => "invalid_domain",
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
