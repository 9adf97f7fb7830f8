//! Core types for conserved, kind-checked quantities of stuff.
//!
//! `stuff-core` models amounts of things that can be moved around but never duplicated
//! or lost:
//!
//! - A *kind* ([`Kind`]) is an immutable identity with a unit policy: numeric domain,
//!   minimum nonempty amount, unit size and, for identity sets, item-type rules.
//! - A *quantity* ([`Quantity`]) is an owned amount of one kind. Quantities are not
//!   `Clone`; the kind's constructor is the only source of new stuff.
//! - Merges, takes, splits and divisions move amount between quantities and either
//!   succeed completely or leave every operand untouched.
//!
//! Most users should depend on `stuff` (the facade crate), which adds
//! `#[derive(StuffKind)]`.
//!
//! # What this crate solves
//!
//! - Conservation: `amount(a_before) == amount(a_after) + amount(taken)` for every move.
//! - Kind isolation: combining quantities of different kinds fails, or does not compile
//!   when using [`Stuff<K>`].
//! - Granularity and minimum-amount rules checked before anything is mutated.
//! - Multi-part operations with rollback ([`TakeTransaction`]).
//!
//! # What this crate does not try to solve
//!
//! - Thread-safe sharing of quantities; callers serialize access themselves.
//! - Capacity limits: sizes are computed, never enforced.
//! - Persistence.
//!
//! # Quick start
//!
//! ```rust
//! use stuff_core::{Kind, Measure, MinimumRule, StuffError};
//!
//! let my_kind = Kind::integer("MyKind")
//!     .min_amount(6.0)
//!     .unit_size(3.0)
//!     .minimum_rule(MinimumRule::RemainderOnly)
//!     .build()
//!     .unwrap();
//!
//! let mut x = my_kind.create(9).unwrap();
//! assert!(matches!(x.take(2), Err(StuffError::GranularityViolation { .. })));
//!
//! let three = x.take(3).unwrap();
//! assert_eq!(x.amount(), Measure::Count(6));
//! assert!(matches!(x.take(3), Err(StuffError::BelowMinimum { .. })));
//!
//! let six = x.take(6).unwrap();
//! assert!(x.is_empty());
//! assert_eq!(three.amount().as_f64() + six.amount().as_f64(), 9.0);
//! ```
//!
//! # Logging
//!
//! The crate logs through the `log` facade: kind definitions, registrations, catalog
//! loads and rollbacks at `debug`, individual moves at `trace`. It never installs a
//! logger.
//!
//! # Panics and errors
//!
//! Fallible operations return [`Result`] with a [`StuffError`]. Nothing panics on bad
//! input, except building a statically declared kind from an invalid definition.
//!
//! # SemVer and stability
//!
//! This crate is currently `0.x`. Expect breaking changes between minor versions until `1.0`.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

// ─────────────────────────────────────────────────────────────────────────────
// Core modules
// ─────────────────────────────────────────────────────────────────────────────

mod amount;
mod error;
mod item;
mod kind;
mod measure;
mod policy;
mod quantity;
mod size;
mod summary;
mod transaction;

// ─────────────────────────────────────────────────────────────────────────────
// Public re-exports of core types
// ─────────────────────────────────────────────────────────────────────────────

pub use error::{Result, StuffError};
pub use item::{Item, ItemBatch, ItemId, ItemType};
pub use kind::{Kind, KindBuilder, KindId};
pub use measure::{Measure, Portion};
pub use policy::{Domain, MinimumRule, UnitPolicy};
pub use quantity::Quantity;
pub use summary::Summary;
pub use transaction::TakeTransaction;

// ─────────────────────────────────────────────────────────────────────────────
// Kind management and typed kinds
// ─────────────────────────────────────────────────────────────────────────────

mod config;
mod registry;
mod typed;

pub use config::{KindCatalog, KindSettings};
pub use registry::KindRegistry;
pub use typed::{Stuff, StuffKind};

/// Support for `#[derive(StuffKind)]`. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;

    use crate::{Kind, KindBuilder};

    /// Builds the kind behind a statically declared [`StuffKind`](crate::StuffKind).
    ///
    /// # Panics
    ///
    /// If the definition is invalid. The derive checks its literals at compile time, so
    /// this only fires for hand-written impls.
    pub fn build_static_kind(builder: KindBuilder) -> Kind {
        builder
            .build()
            .unwrap_or_else(|err| panic!("invalid static kind definition: {err}"))
    }
}
