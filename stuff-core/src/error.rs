//! Error types for stuff-core.

use crate::item::ItemId;
use crate::measure::Measure;
use crate::policy::Domain;
use thiserror::Error;

/// Result type for stuff-core operations
pub type Result<T> = std::result::Result<T, StuffError>;

/// Errors that can occur when constructing or moving stuff.
///
/// Every rejection is reported before anything is mutated, so the operands of a failed
/// operation still hold exactly what they held before the call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StuffError {
    /// The operands belong to different kinds.
    #[error("kind mismatch: expected `{expected}`, found `{found}`")]
    KindMismatch {
        /// Kind of the quantity the operation was invoked on.
        expected: String,
        /// Kind of the other operand.
        found: String,
    },

    /// The requested removal exceeds the current amount.
    #[error("insufficient amount: requested {requested}, only {available} available")]
    InsufficientAmount {
        /// Amount asked for.
        requested: Measure,
        /// Amount held at the time of the request.
        available: Measure,
    },

    /// The requested amount is not a multiple of the kind's unit size.
    #[error("granularity violation: {requested} is not a multiple of the unit size {unit_size}")]
    GranularityViolation {
        /// Amount asked for.
        requested: Measure,
        /// Unit size of the kind.
        unit_size: u64,
    },

    /// The operation would leave a nonempty quantity below the kind's minimum.
    #[error("below minimum: {amount} is nonzero but less than the minimum of {min_amount}")]
    BelowMinimum {
        /// Amount the offending quantity would have held.
        amount: Measure,
        /// Minimum nonempty amount of the kind.
        min_amount: Measure,
    },

    /// An identity-set quantity rejected an item or another quantity's restriction.
    #[error("type restriction violation: expected `{expected}`, found `{found}`")]
    TypeRestrictionViolation {
        /// Accepted item type (or capability).
        expected: String,
        /// Offending item type.
        found: String,
    },

    /// A requested item is not currently held.
    #[error("item {0} is not present")]
    ItemNotPresent(ItemId),

    /// An item with this id is already tracked by the receiving quantity.
    #[error("item {0} is already held")]
    DuplicateItem(ItemId),

    /// The request does not fit the kind's numeric domain.
    #[error("domain mismatch: kind `{kind}` holds {domain} amounts, got {requested}")]
    DomainMismatch {
        /// Kind name.
        kind: String,
        /// Domain of the kind.
        domain: Domain,
        /// Short description of what was requested.
        requested: &'static str,
    },

    /// Negative, non-finite or overflowing amount, or an invalid piece count.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A kind definition violates its unit policy rules.
    #[error("invalid kind definition: {0}")]
    InvalidKind(String),

    /// A kind with this name is already registered.
    #[error("kind `{0}` is already registered")]
    DuplicateKind(String),

    /// No kind with this name is registered.
    #[error("unknown kind `{0}`")]
    UnknownKind(String),

    /// Kind catalog could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl StuffError {
    pub(crate) fn kind_mismatch(expected: &str, found: &str) -> Self {
        StuffError::KindMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn below_minimum(amount: Measure, min_amount: Measure) -> Self {
        StuffError::BelowMinimum { amount, min_amount }
    }

    pub(crate) fn insufficient(requested: Measure, available: Measure) -> Self {
        StuffError::InsufficientAmount {
            requested,
            available,
        }
    }
}
