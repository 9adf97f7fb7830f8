//! Read-only summaries of quantities.

use crate::measure::Measure;
use crate::quantity::Quantity;
use core::fmt::{Display, Formatter, Result};
use serde::Serialize;

/// Snapshot of a quantity's kind name, amount and size.
///
/// ```rust
/// use stuff_core::Kind;
///
/// let ammo = Kind::integer("Ammo").unit_size(3.0).build().unwrap();
/// let summary = ammo.create(9).unwrap().describe();
/// assert_eq!(summary.to_string(), "[9 of Ammo]");
/// assert_eq!(summary.size, 27.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Name of the quantity's kind.
    pub kind_name: String,
    /// Amount or item count.
    pub amount: Measure,
    /// Size as computed by [`Quantity::size`].
    pub size: f64,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "[{} of {}]", self.amount, self.kind_name)
    }
}

impl Quantity {
    /// Summarizes this quantity.
    pub fn describe(&self) -> Summary {
        Summary {
            kind_name: self.kind().name().to_string(),
            amount: self.amount(),
            size: self.size(),
        }
    }
}
