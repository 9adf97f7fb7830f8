//! Kinds: the immutable identities that tell one family of stuff from another.
//!
//! A [`Kind`] is defined once through a [`KindBuilder`] and is never mutated afterwards.
//! Cloning a kind is cheap and yields the *same* kind; two separately built kinds are
//! always distinct, even when their names and policies agree.
//!
//! The kind's constructors ([`Kind::create`], [`Kind::create_items`],
//! [`Kind::create_batch`]) are the only place new stuff comes from.

use crate::amount::{integer, real, Amount, ItemSet};
use crate::error::{Result, StuffError};
use crate::item::{Item, ItemBatch, ItemType};
use crate::measure::{Measure, Portion};
use crate::policy::{Domain, MinimumRule, UnitPolicy};
use crate::quantity::Quantity;
use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_KIND_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KindId(u64);

impl KindId {
    fn next() -> Self {
        Self(NEXT_KIND_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct KindDef {
    id: KindId,
    name: String,
    policy: UnitPolicy,
    minimum_rule: MinimumRule,
}

/// Immutable identity of a family of stuff.
///
/// ```rust
/// use stuff_core::{Kind, Measure};
///
/// let ammo = Kind::integer("Ammo").min_amount(6.0).unit_size(3.0).build().unwrap();
/// let clip = ammo.create(9).unwrap();
/// assert_eq!(clip.amount(), Measure::Count(9));
/// assert_eq!(clip.to_string(), "[9 of Ammo]");
/// ```
#[derive(Clone, Debug)]
pub struct Kind(Arc<KindDef>);

impl Kind {
    /// Starts defining an integer-counted kind.
    pub fn integer(name: impl Into<String>) -> KindBuilder {
        KindBuilder::new(name, Domain::Integer)
    }

    /// Starts defining a real-valued kind.
    pub fn real(name: impl Into<String>) -> KindBuilder {
        KindBuilder::new(name, Domain::Real)
    }

    /// Starts defining an identity-set kind.
    pub fn identity_set(name: impl Into<String>) -> KindBuilder {
        KindBuilder::new(name, Domain::IdentitySet)
    }

    /// Identity of this kind.
    pub fn id(&self) -> KindId {
        self.0.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Unit policy.
    pub fn policy(&self) -> &UnitPolicy {
        &self.0.policy
    }

    /// Numeric domain.
    pub fn domain(&self) -> Domain {
        self.0.policy.domain()
    }

    /// Which quantities the minimum-amount rule applies to on `take`.
    pub fn minimum_rule(&self) -> MinimumRule {
        self.0.minimum_rule
    }

    /// Smallest permitted nonempty amount.
    pub fn min_amount(&self) -> Measure {
        self.0.policy.min_amount()
    }

    /// Smallest amount a nonempty quantity of this kind can hold.
    pub fn smallest_allowed_amount(&self) -> Measure {
        self.0.policy.smallest_allowed_amount()
    }

    /// Item-type restriction of an identity-set kind.
    pub fn item_type(&self) -> Option<ItemType> {
        match &self.0.policy {
            UnitPolicy::IdentitySet { item_type, .. } => *item_type,
            _ => None,
        }
    }

    /// Creates an empty quantity of this kind.
    pub fn empty(&self) -> Quantity {
        let amount = match &self.0.policy {
            UnitPolicy::Integer { .. } => Amount::Integer(0),
            UnitPolicy::Real { .. } => Amount::Real(0.0),
            UnitPolicy::IdentitySet { item_type, .. } => Amount::Items(ItemSet::new(*item_type)),
        };
        Quantity::from_parts(self.clone(), amount)
    }

    /// Creates new scalar stuff of this kind.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` for negative or non-finite amounts.
    /// - `GranularityViolation` when an integer amount is not a multiple of the unit size.
    /// - `BelowMinimum` for nonzero amounts below the kind's minimum.
    /// - `DomainMismatch` for identity-set kinds (use [`Kind::create_items`]).
    pub fn create(&self, amount: impl Into<Portion>) -> Result<Quantity> {
        let portion = amount.into();
        let amount = match &self.0.policy {
            UnitPolicy::Integer {
                min_amount,
                unit_size,
            } => {
                let n = integer::requested(&portion, *unit_size)
                    .ok_or_else(|| self.domain_mismatch(&portion))??;
                integer::validate_initial(n, *min_amount, *unit_size)?;
                Amount::Integer(n)
            }
            UnitPolicy::Real { min_amount, .. } => {
                let x = real::requested(&portion).ok_or_else(|| self.domain_mismatch(&portion))??;
                real::validate_initial(x, *min_amount)?;
                Amount::Real(x)
            }
            UnitPolicy::IdentitySet { .. } => return Err(self.domain_mismatch(&portion)),
        };
        debug!("Created {} of `{}`", amount.measure(), self.name());
        Ok(Quantity::from_parts(self.clone(), amount))
    }

    /// Creates an identity-set quantity owning `items`.
    pub fn create_items<T: Item>(&self, items: impl IntoIterator<Item = T>) -> Result<Quantity> {
        self.create_batch(items.into_iter().collect())
    }

    /// Creates an identity-set quantity owning a batch of possibly mixed item types.
    ///
    /// # Errors
    ///
    /// - `TypeRestrictionViolation` if an item does not match the kind's restriction, or
    ///   the kind has sized items and an item reports no size.
    /// - `DuplicateItem` if two items share an id.
    /// - `BelowMinimum` for a nonempty batch smaller than the kind's minimum.
    /// - `DomainMismatch` for scalar kinds.
    pub fn create_batch(&self, batch: ItemBatch) -> Result<Quantity> {
        let mut quantity = self.empty();
        quantity.insert_batch(batch)?;
        Ok(quantity)
    }

    /// Creates an empty identity-set quantity that only accepts items of `item_type`.
    ///
    /// # Errors
    ///
    /// `TypeRestrictionViolation` if the kind is already restricted to another type, and
    /// `DomainMismatch` for scalar kinds.
    pub fn empty_restricted(&self, item_type: ItemType) -> Result<Quantity> {
        match &self.0.policy {
            UnitPolicy::IdentitySet {
                item_type: Some(kind_type),
                ..
            } if *kind_type != item_type => Err(StuffError::TypeRestrictionViolation {
                expected: kind_type.to_string(),
                found: item_type.to_string(),
            }),
            UnitPolicy::IdentitySet { .. } => Ok(Quantity::from_parts(
                self.clone(),
                Amount::Items(ItemSet::new(Some(item_type))),
            )),
            _ => Err(StuffError::DomainMismatch {
                kind: self.name().to_string(),
                domain: self.domain(),
                requested: "an item-type restriction",
            }),
        }
    }

    pub(crate) fn domain_mismatch(&self, portion: &Portion) -> StuffError {
        StuffError::DomainMismatch {
            kind: self.name().to_string(),
            domain: self.domain(),
            requested: portion.describe(),
        }
    }

    pub(crate) fn ensure_same(&self, other: &Kind) -> Result<()> {
        if self == other {
            Ok(())
        } else {
            Err(StuffError::kind_mismatch(self.name(), other.name()))
        }
    }
}

impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Kind {}

impl core::hash::Hash for Kind {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

/// Builder for a [`Kind`].
///
/// Defaults: `min_amount = 1` (integer and identity-set) or `0` (real), `unit_size = 1`,
/// no item restriction, unsized items, [`MinimumRule::Strict`].
#[derive(Clone, Debug)]
pub struct KindBuilder {
    name: String,
    domain: Domain,
    min_amount: Option<f64>,
    unit_size: f64,
    item_type: Option<ItemType>,
    sized_items: bool,
    minimum_rule: MinimumRule,
}

impl KindBuilder {
    /// Starts a definition for the given domain.
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            domain,
            min_amount: None,
            unit_size: 1.0,
            item_type: None,
            sized_items: false,
            minimum_rule: MinimumRule::Strict,
        }
    }

    /// Smallest nonempty amount (item count for identity-set kinds).
    ///
    /// Integer literals work directly: `.min_amount(6)`.
    pub fn min_amount(mut self, min_amount: impl Into<f64>) -> Self {
        self.min_amount = Some(min_amount.into());
        self
    }

    /// Unit size: granularity and size factor for integer kinds, size factor otherwise.
    pub fn unit_size(mut self, unit_size: impl Into<f64>) -> Self {
        self.unit_size = unit_size.into();
        self
    }

    /// Restricts an identity-set kind to items of type `T`.
    pub fn restricted_to<T: Item>(self) -> Self {
        self.item_type(ItemType::of::<T>())
    }

    /// Restricts an identity-set kind to items of `item_type`.
    pub fn item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    /// Requires identity-set items to report a size.
    pub fn sized_items(mut self, sized: bool) -> Self {
        self.sized_items = sized;
        self
    }

    /// Sets the minimum rule.
    pub fn minimum_rule(mut self, rule: MinimumRule) -> Self {
        self.minimum_rule = rule;
        self
    }

    /// Validates the definition and creates the kind.
    ///
    /// # Errors
    ///
    /// `InvalidKind` for an empty name, non-integral integer settings, item settings on
    /// scalar kinds, or any policy value rejected by [`UnitPolicy::validate`].
    pub fn build(self) -> Result<Kind> {
        if self.name.trim().is_empty() {
            return Err(StuffError::InvalidKind("kind name must not be empty".into()));
        }
        if self.domain != Domain::IdentitySet && (self.item_type.is_some() || self.sized_items) {
            return Err(StuffError::InvalidKind(format!(
                "item settings only apply to identity-set kinds, `{}` is {}",
                self.name, self.domain
            )));
        }

        let policy = match self.domain {
            Domain::Integer => UnitPolicy::Integer {
                min_amount: whole("min_amount", self.min_amount.unwrap_or(1.0))?,
                unit_size: whole("unit_size", self.unit_size)?,
            },
            Domain::Real => UnitPolicy::Real {
                min_amount: self.min_amount.unwrap_or(0.0),
                unit_size: self.unit_size,
            },
            Domain::IdentitySet => UnitPolicy::IdentitySet {
                min_items: whole("min_amount", self.min_amount.unwrap_or(1.0))? as usize,
                unit_size: self.unit_size,
                item_type: self.item_type,
                sized_items: self.sized_items,
            },
        };
        policy.validate()?;

        let kind = Kind(Arc::new(KindDef {
            id: KindId::next(),
            name: self.name,
            policy,
            minimum_rule: self.minimum_rule,
        }));
        debug!(
            "Defined kind `{}` ({} domain, min {}, unit size {})",
            kind.name(),
            kind.domain(),
            kind.min_amount(),
            kind.policy().unit_size()
        );
        Ok(kind)
    }
}

fn whole(field: &str, value: f64) -> Result<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(StuffError::InvalidKind(format!(
            "{field} must be a whole number, got {value}"
        )))
    }
}
