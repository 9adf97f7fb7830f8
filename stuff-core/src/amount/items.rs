//! Identity-set stuff.
//!
//! The amount is a set of distinct owned items keyed by id. Counts (and sizes, for sized
//! items) are derived from the set. An optional per-set restriction limits which item
//! types the set accepts.

use crate::error::{Result, StuffError};
use crate::item::{HeldItem, Item, ItemBatch, ItemId, ItemType};
use crate::measure::Measure;
use crate::policy::MinimumRule;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
pub(crate) struct ItemSet {
    restriction: Option<ItemType>,
    items: BTreeMap<ItemId, HeldItem>,
}

impl ItemSet {
    pub(crate) fn new(restriction: Option<ItemType>) -> Self {
        Self {
            restriction,
            items: BTreeMap::new(),
        }
    }

    /// An empty set with the same restriction.
    pub(crate) fn emptied(&self) -> Self {
        Self::new(self.restriction)
    }

    pub(crate) fn restriction(&self) -> Option<ItemType> {
        self.restriction
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn Item> + '_ {
        self.items.values().map(|held| held.item.as_ref())
    }

    /// Ids of the held items matching `predicate`, in id order.
    pub(crate) fn select(&self, mut predicate: impl FnMut(&dyn Item) -> bool) -> Vec<ItemId> {
        self.items
            .iter()
            .filter(|(_, held)| predicate(held.item.as_ref()))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Sum of item sizes for sized kinds, `count * unit_size` otherwise.
    pub(crate) fn size(&self, sized_items: bool, unit_size: f64) -> f64 {
        if sized_items {
            self.items
                .values()
                .map(|held| held.item.size().unwrap_or(0.0))
                .sum()
        } else {
            self.items.len() as f64 * unit_size
        }
    }

    fn check_type(&self, item_type: ItemType) -> Result<()> {
        match self.restriction {
            Some(expected) if expected != item_type => Err(StuffError::TypeRestrictionViolation {
                expected: expected.to_string(),
                found: item_type.to_string(),
            }),
            _ => Ok(()),
        }
    }

    fn check_compatible(&self, other: &ItemSet) -> Result<()> {
        match (self.restriction, other.restriction) {
            (Some(a), Some(b)) if a != b => Err(StuffError::TypeRestrictionViolation {
                expected: a.to_string(),
                found: b.to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Checks that every item of `batch` may enter this set.
    pub(crate) fn check_insert(
        &self,
        batch: &ItemBatch,
        min_items: usize,
        sized_items: bool,
    ) -> Result<()> {
        let mut seen = BTreeSet::new();
        for held in &batch.items {
            self.check_type(held.item_type)?;
            if sized_items {
                match held.item.size() {
                    None => {
                        return Err(StuffError::TypeRestrictionViolation {
                            expected: "sized item".into(),
                            found: held.item_type.to_string(),
                        })
                    }
                    Some(size) if !size.is_finite() || size < 0.0 => {
                        return Err(StuffError::InvalidAmount(format!(
                            "item {} has invalid size {size}",
                            held.id()
                        )))
                    }
                    Some(_) => {}
                }
            }
            let id = held.id();
            if self.contains(id) || !seen.insert(id) {
                return Err(StuffError::DuplicateItem(id));
            }
        }
        check_minimum(self.len() + batch.len(), min_items)
    }

    /// Adds a batch that passed [`ItemSet::check_insert`].
    pub(crate) fn insert(&mut self, batch: ItemBatch) {
        for held in batch.items {
            self.items.insert(held.id(), held);
        }
    }

    /// Checks that all of `other` may move into this set.
    pub(crate) fn check_absorb(&self, other: &ItemSet) -> Result<()> {
        self.check_compatible(other)?;
        for (id, held) in &other.items {
            self.check_type(held.item_type)?;
            if self.contains(*id) {
                return Err(StuffError::DuplicateItem(*id));
            }
        }
        Ok(())
    }

    /// Checks that `self` and `other` may be merged into a new set, and returns that set
    /// still empty.
    pub(crate) fn combined(&self, other: &ItemSet) -> Result<ItemSet> {
        self.check_compatible(other)?;
        let target = ItemSet::new(self.restriction.or(other.restriction));
        for held in self.items.values() {
            target.check_type(held.item_type)?;
        }
        for (id, held) in &other.items {
            target.check_type(held.item_type)?;
            if self.contains(*id) {
                return Err(StuffError::DuplicateItem(*id));
            }
        }
        Ok(target)
    }

    /// Moves every item of `other` into this set. Callers check first.
    pub(crate) fn absorb(&mut self, other: ItemSet) {
        self.items.extend(other.items);
    }

    /// Removes the given items into a new set with the same restriction.
    pub(crate) fn remove(&mut self, ids: &[ItemId]) -> ItemSet {
        let mut removed = self.emptied();
        for id in ids {
            if let Some(held) = self.items.remove(id) {
                removed.items.insert(*id, held);
            }
        }
        removed
    }
}

pub(crate) fn check_minimum(count: usize, min_items: usize) -> Result<()> {
    if count != 0 && count < min_items {
        return Err(StuffError::below_minimum(
            Measure::Items(count),
            Measure::Items(min_items),
        ));
    }
    Ok(())
}

/// Plans taking the items `ids` out of a set of `held` items.
///
/// `present` answers whether an id is currently held. A repeated id counts as not present
/// the second time.
pub(crate) fn plan_take(
    held: usize,
    present: impl Fn(ItemId) -> bool,
    ids: &[ItemId],
    min_items: usize,
    rule: MinimumRule,
) -> Result<()> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !present(*id) || !seen.insert(*id) {
            return Err(StuffError::ItemNotPresent(*id));
        }
    }
    check_minimum(held - ids.len(), min_items)?;
    if rule == MinimumRule::Strict {
        check_minimum(ids.len(), min_items)?;
    }
    Ok(())
}

/// Plans distributing `ids` over `pieces` parts of near-equal count, in id order.
pub(crate) fn plan_divide(
    ids: Vec<ItemId>,
    min_items: usize,
    pieces: usize,
) -> Result<Vec<Vec<ItemId>>> {
    let base = ids.len() / pieces;
    let extra = ids.len() % pieces;
    if base == 0 || base < min_items {
        return Err(StuffError::below_minimum(
            Measure::Items(base),
            Measure::Items(min_items),
        ));
    }
    let mut rest = ids.into_iter();
    Ok((0..pieces)
        .map(|i| rest.by_ref().take(base + usize::from(i < extra)).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Bolt(u64);
    impl Item for Bolt {
        fn id(&self) -> ItemId {
            ItemId::new(self.0)
        }
    }

    #[derive(Debug)]
    struct Plank {
        id: u64,
        length: f64,
    }
    impl Item for Plank {
        fn id(&self) -> ItemId {
            ItemId::new(self.id)
        }
        fn size(&self) -> Option<f64> {
            Some(self.length)
        }
    }

    fn bolts(ids: &[u64]) -> ItemSet {
        let mut set = ItemSet::new(None);
        set.insert(ids.iter().copied().map(Bolt).collect());
        set
    }

    fn id(raw: u64) -> ItemId {
        ItemId::new(raw)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Insertion
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn insert_checks_restriction() {
        let set = ItemSet::new(Some(ItemType::of::<Bolt>()));
        let batch = ItemBatch::new().with(Plank { id: 1, length: 2.0 });
        assert!(matches!(
            set.check_insert(&batch, 1, false),
            Err(StuffError::TypeRestrictionViolation { .. })
        ));
        assert!(set.check_insert(&ItemBatch::new().with(Bolt(1)), 1, false).is_ok());
    }

    #[test]
    fn insert_checks_duplicates() {
        let set = bolts(&[1, 2]);
        assert_eq!(
            set.check_insert(&ItemBatch::new().with(Bolt(2)), 1, false),
            Err(StuffError::DuplicateItem(id(2)))
        );
        assert_eq!(
            set.check_insert(&ItemBatch::new().with(Bolt(5)).with(Bolt(5)), 1, false),
            Err(StuffError::DuplicateItem(id(5)))
        );
    }

    #[test]
    fn insert_checks_sizes() {
        let set = ItemSet::new(None);
        let err = set
            .check_insert(&ItemBatch::new().with(Bolt(1)), 1, true)
            .unwrap_err();
        assert!(matches!(err, StuffError::TypeRestrictionViolation { .. }));
        let bad = ItemBatch::new().with(Plank {
            id: 1,
            length: f64::NAN,
        });
        assert!(matches!(
            set.check_insert(&bad, 1, true),
            Err(StuffError::InvalidAmount(_))
        ));
    }

    #[test]
    fn size_of_sized_and_unsized_sets() {
        let mut planks = ItemSet::new(None);
        planks.insert(
            ItemBatch::new()
                .with(Plank { id: 1, length: 2.0 })
                .with(Plank { id: 2, length: 0.5 }),
        );
        assert_eq!(planks.size(true, 1.0), 2.5);
        assert_eq!(bolts(&[1, 2, 3]).size(false, 0.5), 1.5);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Merging
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn absorb_respects_receiver_restriction() {
        let mut planks = ItemSet::new(Some(ItemType::of::<Plank>()));
        planks.insert(ItemBatch::new().with(Plank { id: 10, length: 1.0 }));
        let loose = bolts(&[1]);
        assert!(matches!(
            planks.check_absorb(&loose),
            Err(StuffError::TypeRestrictionViolation { .. })
        ));
        assert!(loose.check_absorb(&planks).is_ok());
    }

    #[test]
    fn incompatible_restrictions() {
        let a = ItemSet::new(Some(ItemType::of::<Plank>()));
        let b = ItemSet::new(Some(ItemType::of::<Bolt>()));
        assert!(a.check_absorb(&b).is_err());
        assert!(a.combined(&b).is_err());
    }

    #[test]
    fn combined_takes_the_stricter_restriction() {
        let a = ItemSet::new(Some(ItemType::of::<Bolt>()));
        let b = bolts(&[1, 2]);
        let target = a.combined(&b).unwrap();
        assert_eq!(target.restriction(), Some(ItemType::of::<Bolt>()));
        assert_eq!(
            b.combined(&bolts(&[2])).unwrap_err(),
            StuffError::DuplicateItem(id(2))
        );
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Taking and dividing
    // ─────────────────────────────────────────────────────────────────────────────

    #[test]
    fn take_requires_presence() {
        let set = bolts(&[1, 2, 3]);
        let present = |i| set.contains(i);
        assert!(plan_take(3, present, &[id(1)], 1, MinimumRule::Strict).is_ok());
        assert_eq!(
            plan_take(3, present, &[id(9)], 1, MinimumRule::Strict),
            Err(StuffError::ItemNotPresent(id(9)))
        );
        assert_eq!(
            plan_take(3, present, &[id(1), id(1)], 1, MinimumRule::Strict),
            Err(StuffError::ItemNotPresent(id(1)))
        );
    }

    #[test]
    fn take_minimum() {
        let set = bolts(&[1, 2, 3]);
        let present = |i| set.contains(i);
        assert!(matches!(
            plan_take(3, present, &[id(1), id(2)], 2, MinimumRule::RemainderOnly),
            Err(StuffError::BelowMinimum { .. })
        ));
        assert!(matches!(
            plan_take(3, present, &[id(1)], 2, MinimumRule::Strict),
            Err(StuffError::BelowMinimum { .. })
        ));
        assert!(plan_take(3, present, &[id(1)], 2, MinimumRule::RemainderOnly).is_ok());
    }

    #[test]
    fn remove_keeps_restriction() {
        let mut set = ItemSet::new(Some(ItemType::of::<Bolt>()));
        set.insert((1..=4).map(Bolt).collect());
        let removed = set.remove(&[id(2), id(4)]);
        assert_eq!(removed.len(), 2);
        assert_eq!(removed.restriction(), Some(ItemType::of::<Bolt>()));
        assert_eq!(set.ids().collect::<Vec<_>>(), vec![id(1), id(3)]);
    }

    #[test]
    fn select_by_predicate() {
        let set = bolts(&[1, 2, 3, 4]);
        let even = set.select(|item| item.id().get() % 2 == 0);
        assert_eq!(even, vec![id(2), id(4)]);
    }

    #[test]
    fn divide_in_id_order() {
        let ids: Vec<_> = (1..=5).map(id).collect();
        let parts = plan_divide(ids, 1, 2).unwrap();
        assert_eq!(parts[0], vec![id(1), id(2), id(3)]);
        assert_eq!(parts[1], vec![id(4), id(5)]);
        assert!(plan_divide(vec![id(1)], 1, 2).is_err());
    }
}
