//! All-or-nothing sequences of takes.
//!
//! A [`TakeTransaction`] borrows a quantity, applies takes one at a time and keeps a log
//! of the parts it produced. Committing hands the parts out; dropping the transaction
//! without committing moves every part back, so the source ends up exactly as it was.
//!
//! ```rust
//! use stuff_core::{Kind, Measure, TakeTransaction};
//!
//! let ammo = Kind::integer("Ammo").min_amount(6.0).unit_size(3.0).build().unwrap();
//! let mut a = ammo.create(18).unwrap();
//! {
//!     let mut tx = TakeTransaction::begin(&mut a);
//!     tx.take(6).unwrap();
//!     assert!(tx.take(30).is_err());
//! }
//! assert_eq!(a.amount(), Measure::Count(18));
//! ```

use crate::amount::Amount;
use crate::error::Result;
use crate::measure::Portion;
use crate::quantity::Quantity;
use log::debug;

/// Rollback journal over a sequence of takes from one quantity.
#[derive(Debug)]
pub struct TakeTransaction<'q> {
    source: &'q mut Quantity,
    applied: Vec<Quantity>,
    snapshot: Option<Amount>,
}

impl<'q> TakeTransaction<'q> {
    /// Starts a transaction on `source`.
    pub fn begin(source: &'q mut Quantity) -> Self {
        let snapshot = source.amount.snapshot();
        Self {
            source,
            applied: Vec::new(),
            snapshot,
        }
    }

    /// Takes `portion` from the source and records the part.
    ///
    /// A failed take changes nothing; earlier takes stay applied until the transaction is
    /// committed or dropped.
    ///
    /// # Errors
    ///
    /// As [`Quantity::take`].
    pub fn take(&mut self, portion: impl Into<Portion>) -> Result<&Quantity> {
        let part = self.source.take(portion)?;
        self.applied.push(part);
        Ok(&self.applied[self.applied.len() - 1])
    }

    /// Takes everything left in the source and records it as the final part.
    pub fn take_rest(&mut self) -> &Quantity {
        let part = self.source.take_rest();
        self.applied.push(part);
        &self.applied[self.applied.len() - 1]
    }

    /// Number of parts taken so far.
    pub fn len(&self) -> usize {
        self.applied.len()
    }

    /// Returns `true` if nothing has been taken yet.
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// The quantity being drawn from.
    pub fn source(&self) -> &Quantity {
        &*self.source
    }

    /// Keeps every take and returns the parts in the order they were taken.
    #[must_use = "the parts hold the removed stuff"]
    pub fn commit(mut self) -> Vec<Quantity> {
        self.snapshot = None;
        std::mem::take(&mut self.applied)
    }
}

impl Drop for TakeTransaction<'_> {
    fn drop(&mut self) {
        if self.applied.is_empty() {
            return;
        }
        debug!(
            "Rolling back {} takes from `{}`",
            self.applied.len(),
            self.source.kind().name()
        );
        match self.snapshot.take() {
            Some(snapshot) => {
                self.applied.clear();
                self.source.amount = snapshot;
            }
            None => {
                while let Some(part) = self.applied.pop() {
                    self.source.amount.absorb(part.amount);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemId};
    use crate::kind::Kind;
    use crate::measure::Measure;

    #[derive(Debug)]
    struct Token(u64);
    impl Item for Token {
        fn id(&self) -> ItemId {
            ItemId::new(self.0)
        }
    }

    #[test]
    fn commit_keeps_parts() {
        let k = Kind::integer("Coins").build().unwrap();
        let mut a = k.create(10).unwrap();
        let mut tx = TakeTransaction::begin(&mut a);
        tx.take(3).unwrap();
        tx.take(4).unwrap();
        assert_eq!(tx.len(), 2);
        assert_eq!(tx.source().amount(), Measure::Count(3));
        let parts = tx.commit();
        assert_eq!(parts.len(), 2);
        assert_eq!(a.amount(), Measure::Count(3));
    }

    #[test]
    fn drop_restores_real_amount_exactly() {
        let k = Kind::real("Oil").build().unwrap();
        let start = 0.1 + 0.2 + 0.7;
        let mut a = k.create(start).unwrap();
        {
            let mut tx = TakeTransaction::begin(&mut a);
            tx.take(0.1).unwrap();
            tx.take(0.35).unwrap();
        }
        assert_eq!(a.amount(), Measure::Real(start));
    }

    #[test]
    fn drop_returns_items() {
        let k = Kind::identity_set("Tokens").build().unwrap();
        let mut a = k.create_items((1..=4).map(Token)).unwrap();
        {
            let mut tx = TakeTransaction::begin(&mut a);
            tx.take(ItemId::new(1)).unwrap();
            tx.take(ItemId::new(3)).unwrap();
            assert!(tx.take(ItemId::new(3)).is_err());
        }
        let ids: Vec<u64> = a.item_ids().into_iter().map(ItemId::get).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn take_rest_empties_source() {
        let k = Kind::integer("Coins").build().unwrap();
        let mut a = k.create(10).unwrap();
        let mut tx = TakeTransaction::begin(&mut a);
        tx.take(4).unwrap();
        assert_eq!(tx.take_rest().amount(), Measure::Count(6));
        let parts = tx.commit();
        assert_eq!(parts.len(), 2);
        assert!(a.is_empty());
    }
}
