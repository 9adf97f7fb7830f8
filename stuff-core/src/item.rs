//! Items held by identity-set quantities.
//!
//! An identity-set quantity does not count undifferentiated units: it owns a set of
//! distinct [`Item`]s, each identified by an [`ItemId`]. The concrete Rust type of an
//! item is captured as an [`ItemType`] when the item enters tracking, which is what
//! item-type restrictions are checked against.

use core::any::TypeId;
use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1 << 32);

/// Identity of a single item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(u64);

impl ItemId {
    /// Wraps a caller-chosen identifier.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Allocates a process-unique identifier.
    ///
    /// Fresh ids start at `2^32`, so they never collide with small hand-picked ids.
    pub fn fresh() -> Self {
        Self(NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something an identity-set quantity can own.
///
/// `size` is the optional per-item sizing capability: kinds defined with sized items
/// only accept items that report a size, and sum those sizes when computing a
/// quantity's size.
pub trait Item: Debug + Send + Sync + 'static {
    /// Identity of this item.
    fn id(&self) -> ItemId;

    /// Size of this item, when the item type is sized.
    fn size(&self) -> Option<f64> {
        None
    }
}

/// Runtime tag for the concrete type of an item.
#[derive(Clone, Copy)]
pub struct ItemType {
    id: TypeId,
    name: &'static str,
}

impl ItemType {
    /// Tag for the item type `T`.
    ///
    /// ```rust
    /// use stuff_core::{Item, ItemId, ItemType};
    ///
    /// #[derive(Debug)]
    /// struct Cartridge(u64);
    /// impl Item for Cartridge {
    ///     fn id(&self) -> ItemId { ItemId::new(self.0) }
    /// }
    ///
    /// assert_eq!(ItemType::of::<Cartridge>().short_name(), "Cartridge");
    /// ```
    pub fn of<T: Item>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for ItemType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ItemType {}

impl Hash for ItemType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Debug for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ItemType").field(&self.name).finish()
    }
}

impl Display for ItemType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// An owned item together with the type it was inserted as.
#[derive(Debug)]
pub(crate) struct HeldItem {
    pub(crate) item_type: ItemType,
    pub(crate) item: Box<dyn Item>,
}

impl HeldItem {
    pub(crate) fn new<T: Item>(item: T) -> Self {
        Self {
            item_type: ItemType::of::<T>(),
            item: Box::new(item),
        }
    }

    pub(crate) fn id(&self) -> ItemId {
        self.item.id()
    }
}

/// A group of items, possibly of different types, waiting to enter tracking.
///
/// ```rust
/// use stuff_core::{Item, ItemBatch, ItemId};
///
/// #[derive(Debug)]
/// struct Gem(u64);
/// impl Item for Gem {
///     fn id(&self) -> ItemId { ItemId::new(self.0) }
/// }
///
/// let batch = ItemBatch::new().with(Gem(1)).with(Gem(2));
/// assert_eq!(batch.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct ItemBatch {
    pub(crate) items: Vec<HeldItem>,
}

impl ItemBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item, builder style.
    pub fn with<T: Item>(mut self, item: T) -> Self {
        self.push(item);
        self
    }

    /// Adds an item.
    pub fn push<T: Item>(&mut self, item: T) {
        self.items.push(HeldItem::new(item));
    }

    /// Number of items in the batch.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the batch holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Item> FromIterator<T> for ItemBatch {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(HeldItem::new).collect(),
        }
    }
}

impl<T: Item> Extend<T> for ItemBatch {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(HeldItem::new));
    }
}
