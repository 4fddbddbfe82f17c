//! Identity-keyed name table for one schema build.

use std::collections::HashMap;

use strato_core::TypeKey;

/// Names assigned to the named types of a schema build.
///
/// Keyed by host-type identity, never by structural equality: two tokens built
/// from the same host type share one entry. Every named type is registered
/// *before* its body is resolved, so a self-reference encountered during that
/// resolution reads the assigned name back and degrades to a reference instead
/// of recursing forever. The same lookup is what makes a type referenced twice
/// in one schema emit once and appear by name thereafter.
///
/// One registry serves one top-level build. A caller producing a family of
/// interrelated schemas can thread a single registry through several builds
/// via [`SchemaBuilder::build_with`](crate::builder::SchemaBuilder::build_with)
/// to share names across them. Sharing a registry across concurrent builds is
/// unsupported; the `&mut` borrow makes that unrepresentable here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRegistry {
    names: HashMap<TypeKey, String>,
}

impl NameRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `name` to the type identified by `key`.
    ///
    /// Re-registering a key overwrites the previous assignment.
    pub fn register(&mut self, key: TypeKey, name: impl Into<String>) {
        self.names.insert(key, name.into());
    }

    /// Name previously assigned to `key`, if any.
    #[must_use]
    pub fn get(&self, key: TypeKey) -> Option<&str> {
        self.names.get(&key).map(String::as_str)
    }

    /// Whether `key` already has an assigned name.
    #[must_use]
    pub fn contains(&self, key: TypeKey) -> bool {
        self.names.contains_key(&key)
    }

    /// Number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
