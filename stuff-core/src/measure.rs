//! Amount views and transfer requests.
//!
//! [`Measure`] is what a quantity reports about itself; [`Portion`] is what a caller asks
//! for when moving stuff out of a quantity.

use crate::item::ItemId;
use core::fmt::{Display, Formatter, Result};
use serde::Serialize;

/// Read-only view of an amount, tagged by numeric domain.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
#[serde(untagged)]
pub enum Measure {
    /// Whole-number amount of an integer kind.
    Count(u64),
    /// Floating-point amount of a real kind.
    Real(f64),
    /// Number of items held by an identity-set quantity.
    Items(usize),
}

impl Measure {
    /// Returns the amount as an `f64`, whatever the domain.
    ///
    /// ```rust
    /// use stuff_core::Measure;
    /// assert_eq!(Measure::Count(9).as_f64(), 9.0);
    /// assert_eq!(Measure::Items(2).as_f64(), 2.0);
    /// ```
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Measure::Count(n) => n as f64,
            Measure::Real(x) => x,
            Measure::Items(n) => n as f64,
        }
    }

    /// Returns the whole-number amount of an integer kind.
    #[inline]
    pub fn as_count(self) -> Option<u64> {
        match self {
            Measure::Count(n) => Some(n),
            _ => None,
        }
    }

    /// Returns `true` for the empty amount.
    #[inline]
    pub fn is_zero(self) -> bool {
        match self {
            Measure::Count(n) => n == 0,
            Measure::Real(x) => x == 0.0,
            Measure::Items(n) => n == 0,
        }
    }
}

impl Display for Measure {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Measure::Count(n) => write!(f, "{n}"),
            Measure::Real(x) => write!(f, "{x}"),
            Measure::Items(n) => write!(f, "{n}"),
        }
    }
}

/// A request for part of a quantity.
///
/// Scalar kinds are asked for counts or real amounts; identity-set kinds are asked for an
/// explicit selection of items. Plain Rust numbers and id collections convert into the
/// matching variant, so `q.take(6)`, `q.take(2.5)` and `q.take(vec![id])` all work.
#[derive(Clone, Debug, PartialEq)]
pub enum Portion {
    /// Whole-number request. Values outside `0..=u64::MAX` are rejected with
    /// `InvalidAmount`.
    Count(i128),
    /// Real-valued request.
    Real(f64),
    /// Explicit selection of held items.
    Items(Vec<ItemId>),
}

impl Portion {
    /// Short description used in domain-mismatch errors.
    pub(crate) fn describe(&self) -> &'static str {
        match self {
            Portion::Count(_) => "a count",
            Portion::Real(_) => "a real amount",
            Portion::Items(_) => "an item selection",
        }
    }
}

impl From<i32> for Portion {
    fn from(value: i32) -> Self {
        Portion::Count(i128::from(value))
    }
}

impl From<i64> for Portion {
    fn from(value: i64) -> Self {
        Portion::Count(i128::from(value))
    }
}

impl From<u32> for Portion {
    fn from(value: u32) -> Self {
        Portion::Count(i128::from(value))
    }
}

impl From<u64> for Portion {
    fn from(value: u64) -> Self {
        Portion::Count(i128::from(value))
    }
}

impl From<usize> for Portion {
    fn from(value: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Portion::Count(value as i128)
    }
}

impl From<f64> for Portion {
    fn from(value: f64) -> Self {
        Portion::Real(value)
    }
}

impl From<ItemId> for Portion {
    fn from(value: ItemId) -> Self {
        Portion::Items(vec![value])
    }
}

impl From<Vec<ItemId>> for Portion {
    fn from(value: Vec<ItemId>) -> Self {
        Portion::Items(value)
    }
}

impl From<&[ItemId]> for Portion {
    fn from(value: &[ItemId]) -> Self {
        Portion::Items(value.to_vec())
    }
}

impl<const N: usize> From<[ItemId; N]> for Portion {
    fn from(value: [ItemId; N]) -> Self {
        Portion::Items(value.to_vec())
    }
}
