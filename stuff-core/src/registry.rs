//! Named kinds.
//!
//! A [`KindRegistry`] is an explicit value owned by the host application. It maps names
//! to kinds and refuses a second kind under a name that is already taken.

use crate::error::{Result, StuffError};
use crate::kind::{Kind, KindBuilder};
use log::debug;
use std::collections::BTreeMap;

/// Name-to-kind lookup table.
#[derive(Clone, Debug, Default)]
pub struct KindRegistry {
    kinds: BTreeMap<String, Kind>,
}

impl KindRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an existing kind under its name.
    ///
    /// # Errors
    ///
    /// `DuplicateKind` if the name is already registered.
    pub fn register(&mut self, kind: Kind) -> Result<()> {
        if self.kinds.contains_key(kind.name()) {
            return Err(StuffError::DuplicateKind(kind.name().to_string()));
        }
        debug!("Registered kind `{}`", kind.name());
        self.kinds.insert(kind.name().to_string(), kind);
        Ok(())
    }

    /// Builds a kind and registers it.
    ///
    /// ```rust
    /// use stuff_core::{Kind, KindRegistry};
    ///
    /// let mut registry = KindRegistry::new();
    /// let ammo = registry.define(Kind::integer("Ammo").unit_size(3.0)).unwrap();
    /// assert_eq!(registry.get("Ammo"), Some(&ammo));
    /// assert!(registry.define(Kind::real("Ammo")).is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// `InvalidKind` from the builder, `DuplicateKind` if the name is taken.
    pub fn define(&mut self, builder: KindBuilder) -> Result<Kind> {
        let kind = builder.build()?;
        self.register(kind.clone())?;
        Ok(kind)
    }

    /// Looks a kind up by name.
    pub fn get(&self, name: &str) -> Option<&Kind> {
        self.kinds.get(name)
    }

    /// Looks a kind up by name, failing if it is missing.
    ///
    /// # Errors
    ///
    /// `UnknownKind` if no kind has this name.
    pub fn require(&self, name: &str) -> Result<&Kind> {
        self.get(name)
            .ok_or_else(|| StuffError::UnknownKind(name.to_string()))
    }

    /// Number of registered kinds.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns `true` if no kind is registered.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.kinds.keys().map(String::as_str)
    }

    /// Registered kinds in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Kind> + '_ {
        self.kinds.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_lookup() {
        let mut registry = KindRegistry::new();
        assert!(registry.is_empty());
        let water = registry.define(Kind::real("Water")).unwrap();
        registry.define(Kind::integer("Ammo")).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.require("Water").unwrap(), &water);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Ammo", "Water"]);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut registry = KindRegistry::new();
        registry.define(Kind::integer("Ammo")).unwrap();
        let err = registry
            .register(Kind::integer("Ammo").build().unwrap())
            .unwrap_err();
        assert_eq!(err, StuffError::DuplicateKind("Ammo".into()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn unknown_names() {
        let registry = KindRegistry::new();
        assert!(registry.get("Gold").is_none());
        assert_eq!(
            registry.require("Gold").unwrap_err(),
            StuffError::UnknownKind("Gold".into())
        );
    }
}
