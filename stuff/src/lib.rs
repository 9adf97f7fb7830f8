//! Conserved, kind-checked quantities of stuff.
//!
//! `stuff` is the user-facing crate in this workspace. It re-exports the full API from
//! `stuff-core` plus the `#[derive(StuffKind)]` macro.
//!
//! The core idea is: stuff is only ever created by its kind's constructor. Afterwards it
//! is moved between quantities (merged, taken, split, divided) and the total amount of
//! every kind stays exactly the same.
//!
//! # What this crate solves
//!
//! - Prevents combining different kinds of stuff (you can't merge ammo into water).
//! - Enforces granularity and minimum amounts on every move.
//! - Makes multi-part operations all-or-nothing.
//! - Tracks identity-set stuff as sets of distinct owned items.
//!
//! # What this crate does not try to solve
//!
//! - Sharing quantities between threads: quantities are plain owned values.
//! - Capacity limits or containers: sizes are reported, never enforced.
//!
//! # Quick start
//!
//! ```rust
//! use stuff::{Measure, StuffKind};
//!
//! #[derive(StuffKind)]
//! #[stuff(domain = integer, min_amount = 6, unit_size = 3)]
//! struct MyStuff;
//!
//! let mut x = MyStuff::create(9).unwrap();
//! let mut y = MyStuff::create(18).unwrap();
//!
//! let mut piece = y.take(6).unwrap();
//! piece.transfer_right(&mut x).unwrap();
//!
//! assert_eq!(x.amount(), Measure::Count(15));
//! assert_eq!(y.amount(), Measure::Count(12));
//! ```
//!
//! Runtime kinds work the same way, with kind mismatches reported as errors:
//!
//! ```rust
//! use stuff::{Kind, StuffError};
//!
//! let water = Kind::real("Water").build().unwrap();
//! let oil = Kind::real("Oil").build().unwrap();
//!
//! let mut w = water.create(2.5).unwrap();
//! let mut o = oil.create(1.0).unwrap();
//! assert!(matches!(w.merge_into(&mut o), Err(StuffError::KindMismatch { .. })));
//! ```
//!
//! # Incorrect usage (type error)
//!
//! ```compile_fail
//! use stuff::StuffKind;
//!
//! #[derive(StuffKind)]
//! #[stuff(domain = integer)]
//! struct Ammo;
//!
//! #[derive(StuffKind)]
//! #[stuff(domain = integer)]
//! struct Arrows;
//!
//! let mut a = Ammo::create(3).unwrap();
//! let mut b = Arrows::create(3).unwrap();
//! a.merge_into(&mut b).unwrap(); // cannot merge different kinds
//! ```
//!
//! # Kind catalogs
//!
//! Scalar kinds can be declared in TOML and loaded with [`KindCatalog`]:
//!
//! ```rust
//! use stuff::KindCatalog;
//!
//! let registry = KindCatalog::from_toml_str(r#"
//!     [[kind]]
//!     name = "Ammo"
//!     domain = "integer"
//!     min_amount = 6
//!     unit_size = 3
//! "#)
//! .unwrap()
//! .into_registry()
//! .unwrap();
//!
//! let ammo = registry.require("Ammo").unwrap();
//! assert_eq!(ammo.create(9).unwrap().to_string(), "[9 of Ammo]");
//! ```
//!
//! # Panics and errors
//!
//! Fallible operations return [`Result`] with a [`StuffError`]; a failed operation leaves
//! its operands unchanged.
//!
//! # SemVer and stability
//!
//! This crate is currently `0.x`. Expect breaking changes between minor versions until `1.0`.

#![forbid(unsafe_code)]

pub use stuff_core::*;

/// Derive macro used to declare statically typed kinds.
///
/// See the crate-level docs for an example.
pub use stuff_derive::StuffKind;
