//! Statically typed kinds.
//!
//! A [`StuffKind`] is a marker type bound to one static [`Kind`]. [`Stuff<K>`] wraps a
//! [`Quantity`] of that kind, so mixing two kinds is rejected by the compiler instead of
//! failing with `KindMismatch` at runtime.
//!
//! Marker types are normally declared with `#[derive(StuffKind)]` from the `stuff` crate;
//! a hand-written impl only has to return a reference to a kind that lives for the whole
//! process:
//!
//! ```rust
//! use once_cell::sync::Lazy;
//! use stuff_core::{Kind, Measure, StuffKind};
//!
//! struct Ammo;
//!
//! impl StuffKind for Ammo {
//!     fn kind() -> &'static Kind {
//!         static KIND: Lazy<Kind> = Lazy::new(|| {
//!             stuff_core::__private::build_static_kind(
//!                 Kind::integer("Ammo").min_amount(6.0).unit_size(3.0),
//!             )
//!         });
//!         &KIND
//!     }
//! }
//!
//! let mut x = Ammo::create(9).unwrap();
//! let mut y = Ammo::create(18).unwrap();
//! x.merge_into(&mut y.take(6).unwrap()).unwrap();
//! assert_eq!(x.amount(), Measure::Count(15));
//! assert_eq!(y.amount(), Measure::Count(12));
//! ```

use crate::error::Result;
use crate::item::{Item, ItemBatch, ItemId};
use crate::kind::Kind;
use crate::measure::{Measure, Portion};
use crate::quantity::Quantity;
use crate::summary::Summary;
use core::fmt::{self, Debug, Display, Formatter};
use core::marker::PhantomData;

/// Marker type bound to one static kind.
pub trait StuffKind: 'static {
    /// The kind every `Stuff<Self>` belongs to.
    fn kind() -> &'static Kind;

    /// Creates new scalar stuff of this kind. See [`Kind::create`].
    fn create(amount: impl Into<Portion>) -> Result<Stuff<Self>>
    where
        Self: Sized,
    {
        Self::kind().create(amount).map(Stuff::wrap)
    }

    /// Creates stuff owning `items`. See [`Kind::create_items`].
    fn create_items<T: Item>(items: impl IntoIterator<Item = T>) -> Result<Stuff<Self>>
    where
        Self: Sized,
    {
        Self::kind().create_items(items).map(Stuff::wrap)
    }

    /// Creates an empty quantity of this kind.
    fn empty() -> Stuff<Self>
    where
        Self: Sized,
    {
        Stuff::wrap(Self::kind().empty())
    }
}

/// A quantity whose kind is known at compile time.
pub struct Stuff<K: StuffKind> {
    quantity: Quantity,
    _kind: PhantomData<fn() -> K>,
}

impl<K: StuffKind> Stuff<K> {
    fn wrap(quantity: Quantity) -> Self {
        Self {
            quantity,
            _kind: PhantomData,
        }
    }

    /// Wraps a runtime quantity, handing it back if it belongs to another kind.
    pub fn try_from_quantity(quantity: Quantity) -> core::result::Result<Self, Quantity> {
        if quantity.kind() == K::kind() {
            Ok(Self::wrap(quantity))
        } else {
            Err(quantity)
        }
    }

    /// Unwraps the runtime quantity.
    pub fn into_quantity(self) -> Quantity {
        self.quantity
    }

    /// Borrows the runtime quantity.
    pub fn as_quantity(&self) -> &Quantity {
        &self.quantity
    }

    /// Current amount.
    pub fn amount(&self) -> Measure {
        self.quantity.amount()
    }

    /// See [`Quantity::units`].
    pub fn units(&self) -> Option<u64> {
        self.quantity.units()
    }

    /// See [`Quantity::size`].
    pub fn size(&self) -> f64 {
        self.quantity.size()
    }

    /// Returns `true` when nothing is held.
    pub fn is_empty(&self) -> bool {
        self.quantity.is_empty()
    }

    /// See [`Quantity::describe`].
    pub fn describe(&self) -> Summary {
        self.quantity.describe()
    }

    /// See [`Quantity::item_ids`].
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.quantity.item_ids()
    }

    /// See [`Quantity::contains`].
    pub fn contains(&self, id: ItemId) -> bool {
        self.quantity.contains(id)
    }

    /// See [`Quantity::insert`].
    pub fn insert<T: Item>(&mut self, item: T) -> Result<()> {
        self.quantity.insert(item)
    }

    /// See [`Quantity::insert_batch`].
    pub fn insert_batch(&mut self, batch: ItemBatch) -> Result<()> {
        self.quantity.insert_batch(batch)
    }

    /// See [`Quantity::merge`].
    #[must_use = "the merged quantity holds all of the stuff"]
    pub fn merge(&mut self, other: &mut Self) -> Result<Self> {
        self.quantity.merge(&mut other.quantity).map(Self::wrap)
    }

    /// See [`Quantity::merge_into`].
    pub fn merge_into(&mut self, other: &mut Self) -> Result<()> {
        self.quantity.merge_into(&mut other.quantity)
    }

    /// See [`Quantity::transfer_left`].
    pub fn transfer_left(&mut self, other: &mut Self) -> Result<()> {
        self.quantity.transfer_left(&mut other.quantity)
    }

    /// See [`Quantity::transfer_right`].
    pub fn transfer_right(&mut self, other: &mut Self) -> Result<()> {
        self.quantity.transfer_right(&mut other.quantity)
    }

    /// See [`Quantity::take`].
    #[must_use = "the taken quantity holds the removed stuff"]
    pub fn take(&mut self, portion: impl Into<Portion>) -> Result<Self> {
        self.quantity.take(portion).map(Self::wrap)
    }

    /// See [`Quantity::take_rest`].
    #[must_use = "the taken quantity holds the removed stuff"]
    pub fn take_rest(&mut self) -> Self {
        Self::wrap(self.quantity.take_rest())
    }

    /// See [`Quantity::take_where`].
    #[must_use = "the taken quantity holds the removed stuff"]
    pub fn take_where(&mut self, predicate: impl FnMut(&dyn Item) -> bool) -> Result<Self> {
        self.quantity.take_where(predicate).map(Self::wrap)
    }

    /// See [`Quantity::split`].
    #[must_use = "the split parts hold the removed stuff"]
    pub fn split<I>(&mut self, portions: I) -> Result<Vec<Self>>
    where
        I: IntoIterator,
        I::Item: Into<Portion>,
    {
        let parts = self.quantity.split(portions)?;
        Ok(parts.into_iter().map(Self::wrap).collect())
    }

    /// See [`Quantity::can_split`].
    pub fn can_split<I>(&self, portions: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Portion>,
    {
        self.quantity.can_split(portions)
    }

    /// See [`Quantity::divide`].
    #[must_use = "the parts hold all of the stuff"]
    pub fn divide(&mut self, pieces: usize) -> Result<Vec<Self>> {
        let parts = self.quantity.divide(pieces)?;
        Ok(parts.into_iter().map(Self::wrap).collect())
    }

    /// See [`Quantity::can_divide`].
    pub fn can_divide(&self, pieces: usize) -> bool {
        self.quantity.can_divide(pieces)
    }
}

impl<K: StuffKind> Debug for Stuff<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Stuff").field(&self.quantity).finish()
    }
}

impl<K: StuffKind> Display for Stuff<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.quantity, f)
    }
}

impl<K: StuffKind> From<Stuff<K>> for Quantity {
    fn from(stuff: Stuff<K>) -> Self {
        stuff.quantity
    }
}
