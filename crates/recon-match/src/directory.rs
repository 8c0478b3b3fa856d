//! Caller-owned name directory of target-system entities.

use std::collections::{BTreeMap, BTreeSet};

use recon_core::entities::TargetEntity;
use recon_core::normalize_name;
use tracing::warn;

/// Case-folded display name to entity, plus in-run pins.
///
/// Canonical entries come from a directory snapshot. Pins are extra keys a
/// resolver adds after accepting a fuzzy match, so the same spelling resolves
/// exactly the next time; they are never scored against.
///
/// Two entities sharing a case-folded name with different ids are a
/// conflict: the key is remembered and lookups on it are ambiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directory {
    entries: BTreeMap<String, TargetEntity>,
    pins: BTreeMap<String, TargetEntity>,
    conflicts: BTreeSet<String>,
}

impl Directory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entities(entities: impl IntoIterator<Item = TargetEntity>) -> Self {
        let mut directory = Self::new();
        for entity in entities {
            directory.insert(entity);
        }
        directory
    }

    /// Add a canonical entry keyed by its display name.
    ///
    /// Returns `false` when another entity id already holds the key; the key
    /// is then marked conflicting and the first entity is kept.
    pub fn insert(&mut self, entity: TargetEntity) -> bool {
        let key = normalize_name(&entity.display_name);
        match self.entries.get(&key) {
            Some(existing) if existing.id != entity.id => {
                warn!(name = %entity.display_name, first = %existing.id, second = %entity.id, "duplicate display name in directory");
                self.conflicts.insert(key);
                false
            }
            Some(_) => true,
            None => {
                self.entries.insert(key, entity);
                true
            }
        }
    }

    /// Entity under `name` (canonical or pinned), if any and unambiguous.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TargetEntity> {
        let key = normalize_name(name);
        if self.conflicts.contains(&key) {
            return None;
        }
        self.entries.get(&key).or_else(|| self.pins.get(&key))
    }

    /// Point `name` at `entity` as a secondary key.
    pub fn pin(&mut self, name: &str, entity: TargetEntity) {
        let key = normalize_name(name);
        if !self.entries.contains_key(&key) {
            self.pins.insert(key, entity);
        }
    }

    #[must_use]
    pub fn is_pinned(&self, name: &str) -> bool {
        self.pins.contains_key(&normalize_name(name))
    }

    /// Whether several entities share the case-folded `name`.
    #[must_use]
    pub fn is_conflicting(&self, name: &str) -> bool {
        self.conflicts.contains(&normalize_name(name))
    }

    /// Pinned spelling to entity, in key order.
    pub fn pins(&self) -> impl Iterator<Item = (&str, &TargetEntity)> {
        self.pins.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Canonical entries with their keys, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &TargetEntity)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Canonical entries only.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
