//! Quantities: owned amounts of one kind of stuff.
//!
//! A [`Quantity`] pairs a [`Kind`] with an amount. Quantities are not `Clone`; the only
//! way to get more stuff is a kind's constructor, and every operation here moves amount
//! between quantities without creating or losing any of it.
//!
//! ```rust
//! use stuff_core::{Kind, Measure};
//!
//! let ammo = Kind::integer("Ammo").min_amount(6.0).unit_size(3.0).build().unwrap();
//! let mut x = ammo.create(9).unwrap();
//! let mut y = ammo.create(18).unwrap();
//!
//! let mut piece = y.take(6).unwrap();
//! piece.transfer_right(&mut x).unwrap();
//!
//! assert_eq!(x.amount(), Measure::Count(15));
//! assert_eq!(y.amount(), Measure::Count(12));
//! assert!(piece.is_empty());
//! ```

use crate::amount::{Amount, ItemSet};
use crate::error::{Result, StuffError};
use crate::item::{Item, ItemBatch, ItemId, ItemType};
use crate::kind::Kind;
use crate::measure::{Measure, Portion};
use crate::policy::UnitPolicy;
use crate::transaction::TakeTransaction;
use core::fmt::{Display, Formatter};
use log::trace;

/// An owned amount of one kind of stuff.
#[derive(Debug)]
pub struct Quantity {
    pub(crate) kind: Kind,
    pub(crate) amount: Amount,
}

impl Quantity {
    pub(crate) fn from_parts(kind: Kind, amount: Amount) -> Self {
        Self { kind, amount }
    }

    /// Kind of this quantity.
    #[inline]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Current amount.
    #[inline]
    pub fn amount(&self) -> Measure {
        self.amount.measure()
    }

    /// Number of whole units held by an integer quantity.
    ///
    /// ```rust
    /// use stuff_core::Kind;
    ///
    /// let ammo = Kind::integer("Ammo").unit_size(3.0).build().unwrap();
    /// assert_eq!(ammo.create(12).unwrap().units(), Some(4));
    /// ```
    pub fn units(&self) -> Option<u64> {
        match (&self.amount, self.kind.policy()) {
            (Amount::Integer(n), UnitPolicy::Integer { unit_size, .. }) => Some(n / unit_size),
            _ => None,
        }
    }

    /// Returns `true` when nothing is held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.amount.is_zero()
    }

    /// Item-type restriction of an identity-set quantity.
    pub fn restriction(&self) -> Option<ItemType> {
        self.item_set().and_then(ItemSet::restriction)
    }

    /// Ids of the held items, in id order. Empty for scalar quantities.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.item_set()
            .map(|set| set.ids().collect())
            .unwrap_or_default()
    }

    /// Returns `true` if the item is held.
    pub fn contains(&self, id: ItemId) -> bool {
        self.item_set().is_some_and(|set| set.contains(id))
    }

    /// Held items, in id order. Empty for scalar quantities.
    pub fn items(&self) -> impl Iterator<Item = &dyn Item> + '_ {
        self.item_set().into_iter().flat_map(|set| set.iter())
    }

    fn item_set(&self) -> Option<&ItemSet> {
        match &self.amount {
            Amount::Items(set) => Some(set),
            _ => None,
        }
    }

    /// Adds a new item to an identity-set quantity.
    ///
    /// # Errors
    ///
    /// Same as [`Quantity::insert_batch`].
    pub fn insert<T: Item>(&mut self, item: T) -> Result<()> {
        self.insert_batch(ItemBatch::new().with(item))
    }

    /// Adds new items to an identity-set quantity.
    ///
    /// # Errors
    ///
    /// - `TypeRestrictionViolation` for an item rejected by the restriction, or an unsized
    ///   item on a kind with sized items.
    /// - `DuplicateItem` if an id is already held or repeated within the batch.
    /// - `BelowMinimum` if the resulting count is nonzero but below the kind's minimum.
    /// - `DomainMismatch` for scalar quantities.
    pub fn insert_batch(&mut self, batch: ItemBatch) -> Result<()> {
        match (&mut self.amount, self.kind.policy()) {
            (
                Amount::Items(set),
                UnitPolicy::IdentitySet {
                    min_items,
                    sized_items,
                    ..
                },
            ) => {
                set.check_insert(&batch, *min_items, *sized_items)?;
                trace!("Inserting {} items into `{}`", batch.len(), self.kind.name());
                set.insert(batch);
                Ok(())
            }
            _ => Err(StuffError::DomainMismatch {
                kind: self.kind.name().to_string(),
                domain: self.kind.domain(),
                requested: "an item insertion",
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Merging
    // ─────────────────────────────────────────────────────────────────────────────

    /// Moves all of `self` and `other` into a new quantity, leaving both empty.
    ///
    /// # Errors
    ///
    /// `KindMismatch` for different kinds, `TypeRestrictionViolation` or `DuplicateItem`
    /// for identity sets that cannot be combined, `InvalidAmount` on overflow. Neither
    /// operand changes on failure.
    #[must_use = "the merged quantity holds all of the stuff"]
    pub fn merge(&mut self, other: &mut Quantity) -> Result<Quantity> {
        self.kind.ensure_same(&other.kind)?;
        let mut target = self.amount.combined(&self.kind, &other.amount)?;
        trace!(
            "Merging {} and {} of `{}`",
            self.amount(),
            other.amount(),
            self.kind.name()
        );
        target.absorb(self.amount.take_all());
        target.absorb(other.amount.take_all());
        Ok(Quantity::from_parts(self.kind.clone(), target))
    }

    /// Moves all of `other` into `self`, leaving `other` empty.
    ///
    /// # Errors
    ///
    /// `KindMismatch` for different kinds, `TypeRestrictionViolation` if `other` holds
    /// items `self` does not accept, `DuplicateItem`, or `InvalidAmount` on overflow.
    /// Neither operand changes on failure.
    pub fn merge_into(&mut self, other: &mut Quantity) -> Result<()> {
        self.kind.ensure_same(&other.kind)?;
        self.amount.check_absorb(&self.kind, &other.amount)?;
        trace!(
            "Moving {} into {} of `{}`",
            other.amount(),
            self.amount(),
            self.kind.name()
        );
        self.amount.absorb(other.amount.take_all());
        Ok(())
    }

    /// Moves all of `other` into `self`. Same as [`Quantity::merge_into`].
    pub fn transfer_left(&mut self, other: &mut Quantity) -> Result<()> {
        self.merge_into(other)
    }

    /// Moves all of `self` into `other`. Same as `other.merge_into(self)`.
    pub fn transfer_right(&mut self, other: &mut Quantity) -> Result<()> {
        other.merge_into(self)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Taking
    // ─────────────────────────────────────────────────────────────────────────────

    /// Moves `portion` out of `self` into a new quantity.
    ///
    /// # Errors
    ///
    /// - `InsufficientAmount` if more is requested than held.
    /// - `GranularityViolation` for integer amounts that are not a unit multiple.
    /// - `BelowMinimum` if the remainder (or, under [`MinimumRule::Strict`], the new
    ///   quantity) would be nonzero but below the kind's minimum.
    /// - `ItemNotPresent` for an item that is not held.
    /// - `InvalidAmount` for negative or non-finite amounts.
    /// - `DomainMismatch` for a request of the wrong domain.
    ///
    /// `self` is unchanged on failure.
    ///
    /// [`MinimumRule::Strict`]: crate::MinimumRule::Strict
    #[must_use = "the taken quantity holds the removed stuff"]
    pub fn take(&mut self, portion: impl Into<Portion>) -> Result<Quantity> {
        let portion = portion.into();
        let taken = self.amount.take(&self.kind, &portion)?;
        trace!(
            "Took {} of `{}`, {} left",
            taken.measure(),
            self.kind.name(),
            self.amount()
        );
        Ok(Quantity::from_parts(self.kind.clone(), taken))
    }

    /// Moves everything out of `self` into a new quantity.
    #[must_use = "the taken quantity holds the removed stuff"]
    pub fn take_rest(&mut self) -> Quantity {
        Quantity::from_parts(self.kind.clone(), self.amount.take_all())
    }

    /// Moves the held items matching `predicate` into a new quantity.
    ///
    /// # Errors
    ///
    /// `DomainMismatch` for scalar quantities, otherwise as [`Quantity::take`].
    #[must_use = "the taken quantity holds the removed stuff"]
    pub fn take_where(&mut self, predicate: impl FnMut(&dyn Item) -> bool) -> Result<Quantity> {
        let ids = match self.item_set() {
            Some(set) => set.select(predicate),
            None => {
                return Err(StuffError::DomainMismatch {
                    kind: self.kind.name().to_string(),
                    domain: self.kind.domain(),
                    requested: "an item predicate",
                })
            }
        };
        self.take(ids)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Splitting
    // ─────────────────────────────────────────────────────────────────────────────

    /// Takes each portion in order.
    ///
    /// If any take fails, every earlier take of the call is undone and `self` holds
    /// exactly what it held before.
    ///
    /// ```rust
    /// use stuff_core::{Kind, Measure};
    ///
    /// let ammo = Kind::integer("Ammo").min_amount(6.0).unit_size(3.0).build().unwrap();
    /// let mut a = ammo.create(18).unwrap();
    /// assert!(a.split([6, 30]).is_err());
    /// assert_eq!(a.amount(), Measure::Count(18));
    /// ```
    #[must_use = "the split parts hold the removed stuff"]
    pub fn split<I>(&mut self, portions: I) -> Result<Vec<Quantity>>
    where
        I: IntoIterator,
        I::Item: Into<Portion>,
    {
        let mut transaction = TakeTransaction::begin(self);
        for portion in portions {
            transaction.take(portion)?;
        }
        Ok(transaction.commit())
    }

    /// Checks whether [`Quantity::split`] would succeed, without changing anything.
    ///
    /// # Errors
    ///
    /// The error the split would fail with.
    pub fn check_split<I>(&self, portions: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Portion>,
    {
        let mut shadow = self.amount.shadow();
        for portion in portions {
            shadow.take(&self.kind, &portion.into())?;
        }
        Ok(())
    }

    /// Returns `true` if [`Quantity::split`] would succeed.
    pub fn can_split<I>(&self, portions: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Portion>,
    {
        self.check_split(portions).is_ok()
    }

    /// Splits all of `self` into `pieces` near-equal parts.
    ///
    /// Integer amounts spread leftover units over the first parts, real amounts are cut
    /// equally with the last part absorbing rounding, and items are dealt out in id order.
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for zero pieces, `BelowMinimum` if a part would fall below the
    /// kind's smallest allowed amount. `self` is unchanged on failure.
    #[must_use = "the parts hold all of the stuff"]
    pub fn divide(&mut self, pieces: usize) -> Result<Vec<Quantity>> {
        let portions = self.amount.plan_divide(&self.kind, pieces)?;
        let mut transaction = TakeTransaction::begin(self);
        for portion in portions {
            transaction.take(portion)?;
        }
        transaction.take_rest();
        Ok(transaction.commit())
    }

    /// Checks whether [`Quantity::divide`] would succeed, without changing anything.
    ///
    /// # Errors
    ///
    /// The error the division would fail with.
    pub fn check_divide(&self, pieces: usize) -> Result<()> {
        let portions = self.amount.plan_divide(&self.kind, pieces)?;
        self.check_split(portions)
    }

    /// Returns `true` if [`Quantity::divide`] would succeed.
    pub fn can_divide(&self, pieces: usize) -> bool {
        self.check_divide(pieces).is_ok()
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "[{} of {}]", self.amount(), self.kind.name())
    }
}
