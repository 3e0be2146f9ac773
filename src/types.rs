//! Shared types for the oracle models.
//!
//! The monetary value types deposited into a holding account, and the
//! error taxonomy used by both engines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Money
// ---------------------------------------------------------------------------

/// A non-negative amount of cash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Money {
    value: Decimal,
}

impl Money {
    /// Create a money value. Negative amounts are rejected.
    pub fn new(value: Decimal) -> Result<Self, OracleError> {
        if value < Decimal::ZERO {
            return Err(OracleError::InvalidArgument(
                "Money value must not be negative".to_string(),
            ));
        }
        Ok(Self { value })
    }

    pub fn value(&self) -> Decimal {
        self.value
    }
}

impl TryFrom<Decimal> for Money {
    type Error = OracleError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Money::new(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.value
    }
}

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Serial number identifying one physical check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckId(Uuid);

impl CheckId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CheckId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CheckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A check: a money value plus a stable identity.
///
/// Two checks are the same reference when their ids match, regardless of
/// value. Cloning a check yields the same reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    id: CheckId,
    amount: Money,
}

impl Check {
    /// Write a new check with a fresh serial number.
    pub fn new(value: Decimal) -> Result<Self, OracleError> {
        Self::with_id(CheckId::new(), value)
    }

    /// Build a check for a serial number the caller already holds.
    pub fn with_id(id: CheckId, value: Decimal) -> Result<Self, OracleError> {
        Ok(Self {
            id,
            amount: Money::new(value)?,
        })
    }

    pub fn id(&self) -> CheckId {
        self.id
    }

    pub fn value(&self) -> Decimal {
        self.amount.value()
    }
}

impl PartialEq for Check {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Check {}

impl Hash for Check {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Anything that can be deposited into a holding account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Funds {
    Cash(Money),
    Check(Check),
}

impl Funds {
    pub fn value(&self) -> Decimal {
        match self {
            Funds::Cash(money) => money.value(),
            Funds::Check(check) => check.value(),
        }
    }
}

impl From<Money> for Funds {
    fn from(money: Money) -> Self {
        Funds::Cash(money)
    }
}

impl From<Check> for Funds {
    fn from(check: Check) -> Self {
        Funds::Check(check)
    }
}

impl From<&Check> for Funds {
    fn from(check: &Check) -> Self {
        Funds::Check(check.clone())
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Coarse error category, for callers that only care which rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    WrongType,
    InvalidArgument,
    NotPermitted,
    Config,
}

/// Errors raised by the auction and account models.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OracleError {
    /// An argument has the wrong runtime type.
    #[error("{0}")]
    WrongType(String),

    /// A well-typed argument violates a value constraint.
    #[error("{0}")]
    InvalidArgument(String),

    /// The current state forbids the operation.
    #[error("{0}")]
    NotPermitted(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl OracleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OracleError::WrongType(_) => ErrorKind::WrongType,
            OracleError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            OracleError::NotPermitted(_) => ErrorKind::NotPermitted,
            OracleError::Config(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        OracleError::InvalidArgument(message.into())
    }

    pub(crate) fn not_permitted(message: impl Into<String>) -> Self {
        OracleError::NotPermitted(message.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
