//! Unit policies: the per-kind rules every quantity of a kind obeys.
//!
//! A policy fixes the numeric domain of a kind, the smallest nonempty amount a quantity
//! may hold, the unit size (granularity for integer kinds, size factor for all kinds)
//! and, for identity-set kinds, the item-type restriction and sizing capability.
//! Policies are plain configuration; they hold no mutable state.

use crate::error::{Result, StuffError};
use crate::item::ItemType;
use crate::measure::Measure;
use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

/// Numeric domain of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Whole-number amounts in multiples of the unit size.
    Integer,
    /// Infinitely divisible floating-point amounts.
    Real,
    /// Sets of distinct owned items.
    IdentitySet,
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Domain::Integer => "integer",
            Domain::Real => "real",
            Domain::IdentitySet => "identity-set",
        })
    }
}

/// Which quantities the minimum-amount rule is checked on when stuff is taken out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MinimumRule {
    /// Both the remainder and the taken part must be empty or at least the minimum.
    #[default]
    Strict,
    /// Only the remainder of the quantity being drawn from is checked.
    RemainderOnly,
}

/// Per-domain rules of a kind.
#[derive(Clone, Debug, PartialEq)]
pub enum UnitPolicy {
    /// Integer-counted stuff.
    Integer {
        /// Smallest nonempty amount.
        min_amount: u64,
        /// Every amount is a multiple of this.
        unit_size: u64,
    },
    /// Real-valued stuff.
    Real {
        /// Smallest nonempty amount.
        min_amount: f64,
        /// Size of one unit of amount.
        unit_size: f64,
    },
    /// Identity-set stuff.
    IdentitySet {
        /// Smallest nonempty item count.
        min_items: usize,
        /// Size of one item when items are not sized.
        unit_size: f64,
        /// Only items of this type are accepted.
        item_type: Option<ItemType>,
        /// Items must report a size, and sizes are summed.
        sized_items: bool,
    },
}

impl UnitPolicy {
    /// Numeric domain of this policy.
    pub fn domain(&self) -> Domain {
        match self {
            UnitPolicy::Integer { .. } => Domain::Integer,
            UnitPolicy::Real { .. } => Domain::Real,
            UnitPolicy::IdentitySet { .. } => Domain::IdentitySet,
        }
    }

    /// Smallest permitted nonempty amount.
    pub fn min_amount(&self) -> Measure {
        match self {
            UnitPolicy::Integer { min_amount, .. } => Measure::Count(*min_amount),
            UnitPolicy::Real { min_amount, .. } => Measure::Real(*min_amount),
            UnitPolicy::IdentitySet { min_items, .. } => Measure::Items(*min_items),
        }
    }

    /// Smallest amount a nonempty quantity can actually hold.
    ///
    /// For integer kinds this is `min_amount` rounded up to a multiple of the unit size.
    ///
    /// ```rust
    /// use stuff_core::{Measure, UnitPolicy};
    ///
    /// let policy = UnitPolicy::Integer { min_amount: 7, unit_size: 3 };
    /// assert_eq!(policy.smallest_allowed_amount(), Measure::Count(9));
    /// ```
    pub fn smallest_allowed_amount(&self) -> Measure {
        match self {
            UnitPolicy::Integer {
                min_amount,
                unit_size,
            } => Measure::Count(min_amount.div_ceil(*unit_size) * unit_size),
            UnitPolicy::Real { min_amount, .. } => Measure::Real(*min_amount),
            UnitPolicy::IdentitySet { min_items, .. } => Measure::Items(*min_items),
        }
    }

    /// Size of one unit of amount (one item for unsized identity sets).
    pub fn unit_size(&self) -> f64 {
        match self {
            UnitPolicy::Integer { unit_size, .. } => *unit_size as f64,
            UnitPolicy::Real { unit_size, .. } => *unit_size,
            UnitPolicy::IdentitySet { unit_size, .. } => *unit_size,
        }
    }

    /// Checks the policy values.
    ///
    /// Integer kinds need `min_amount >= 1` and `unit_size >= 1`; real kinds need a finite
    /// non-negative minimum and a finite positive unit size; identity-set kinds need at
    /// least one item as minimum and a finite positive unit size.
    pub fn validate(&self) -> Result<()> {
        match self {
            UnitPolicy::Integer {
                min_amount,
                unit_size,
            } => {
                if *min_amount < 1 {
                    return Err(StuffError::InvalidKind(
                        "min amount of stuff must be at least 1".into(),
                    ));
                }
                if *unit_size < 1 {
                    return Err(StuffError::InvalidKind(
                        "unit size of stuff must be at least 1".into(),
                    ));
                }
            }
            UnitPolicy::Real {
                min_amount,
                unit_size,
            } => {
                if !min_amount.is_finite() || *min_amount < 0.0 {
                    return Err(StuffError::InvalidKind(format!(
                        "min amount must be finite and non-negative, got {min_amount}"
                    )));
                }
                if !unit_size.is_finite() || *unit_size <= 0.0 {
                    return Err(StuffError::InvalidKind(format!(
                        "unit size must be finite and positive, got {unit_size}"
                    )));
                }
            }
            UnitPolicy::IdentitySet {
                min_items,
                unit_size,
                ..
            } => {
                if *min_items < 1 {
                    return Err(StuffError::InvalidKind(
                        "min item count must be at least 1".into(),
                    ));
                }
                if !unit_size.is_finite() || *unit_size <= 0.0 {
                    return Err(StuffError::InvalidKind(format!(
                        "unit size must be finite and positive, got {unit_size}"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domains() {
        let p = UnitPolicy::Real {
            min_amount: 0.5,
            unit_size: 1.0,
        };
        assert_eq!(p.domain(), Domain::Real);
        assert_eq!(p.min_amount(), Measure::Real(0.5));
        assert_eq!(Domain::IdentitySet.to_string(), "identity-set");
    }

    #[test]
    fn smallest_allowed_rounds_up_to_unit() {
        let exact = UnitPolicy::Integer {
            min_amount: 6,
            unit_size: 3,
        };
        assert_eq!(exact.smallest_allowed_amount(), Measure::Count(6));

        let rounded = UnitPolicy::Integer {
            min_amount: 1,
            unit_size: 5,
        };
        assert_eq!(rounded.smallest_allowed_amount(), Measure::Count(5));
    }

    #[test]
    fn validate_rejects_zero_integer_settings() {
        let err = UnitPolicy::Integer {
            min_amount: 0,
            unit_size: 1,
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, StuffError::InvalidKind(_)));

        let err = UnitPolicy::Integer {
            min_amount: 1,
            unit_size: 0,
        }
        .validate()
        .unwrap_err();
        assert!(err.to_string().contains("unit size"));
    }

    #[test]
    fn validate_real_settings() {
        assert!(UnitPolicy::Real {
            min_amount: 0.0,
            unit_size: 0.25,
        }
        .validate()
        .is_ok());
        assert!(UnitPolicy::Real {
            min_amount: f64::NAN,
            unit_size: 1.0,
        }
        .validate()
        .is_err());
        assert!(UnitPolicy::Real {
            min_amount: 1.0,
            unit_size: 0.0,
        }
        .validate()
        .is_err());
    }

    #[test]
    fn validate_identity_set_settings() {
        assert!(UnitPolicy::IdentitySet {
            min_items: 0,
            unit_size: 1.0,
            item_type: None,
            sized_items: false,
        }
        .validate()
        .is_err());
    }

    #[test]
    fn minimum_rule_parses_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            rule: MinimumRule,
        }
        let w: Wrapper = serde_json::from_str(r#"{"rule":"remainder_only"}"#).unwrap();
        assert_eq!(w.rule, MinimumRule::RemainderOnly);
        assert_eq!(MinimumRule::default(), MinimumRule::Strict);
    }
}
