//! Size calculation.
//!
//! Scalar quantities have `size = amount * unit_size`. Identity-set quantities sum their
//! item sizes when the kind has sized items, and use `count * unit_size` otherwise.
//! Sizes are read-only; nothing enforces a ceiling on them.

use crate::amount::Amount;
use crate::kind::Kind;
use crate::policy::UnitPolicy;
use crate::quantity::Quantity;

impl Quantity {
    /// Size of this quantity.
    ///
    /// ```rust
    /// use stuff_core::Kind;
    ///
    /// let sand = Kind::real("Sand").unit_size(1.5).build().unwrap();
    /// assert_eq!(sand.create(2.0).unwrap().size(), 3.0);
    /// ```
    pub fn size(&self) -> f64 {
        match (&self.amount, self.kind.policy()) {
            (
                Amount::Items(set),
                UnitPolicy::IdentitySet {
                    unit_size,
                    sized_items,
                    ..
                },
            ) => set.size(*sized_items, *unit_size),
            (amount, policy) => amount.measure().as_f64() * policy.unit_size(),
        }
    }
}

impl Kind {
    /// Size of the smallest nonempty quantity this kind allows.
    ///
    /// Kinds with sized items report `0`, since item sizes are only known per item.
    pub fn min_size(&self) -> f64 {
        match self.policy() {
            UnitPolicy::IdentitySet {
                sized_items: true, ..
            } => 0.0,
            policy => policy.smallest_allowed_amount().as_f64() * policy.unit_size(),
        }
    }
}
