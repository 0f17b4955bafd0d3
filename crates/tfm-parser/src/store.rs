//! In-memory mass-list store.
//!
//! Keeps items in registry order (verification results depend on it) and
//! precomputes the normalized keys used for matching, so one snapshot can be
//! verified against many documents without renormalizing.

use std::collections::HashMap;
use std::path::Path;

use tfm_types::MassListItem;
use tracing::{debug, warn};

use crate::normalize::normalize_registry_key;
use crate::reader::MassListReader;
use crate::types::{MassListConfig, TfmResult};

/// A mass-list item with its precomputed matching keys.
#[derive(Debug, Clone)]
pub(crate) struct RegistryEntry {
    pub(crate) item: MassListItem,
    pub(crate) tfm_key: String,
    pub(crate) component_key: String,
}

impl RegistryEntry {
    pub(crate) fn new(item: MassListItem) -> Self {
        Self {
            tfm_key: normalize_registry_key(&item.tfm),
            component_key: normalize_registry_key(&item.component),
            item,
        }
    }
}

/// In-memory snapshot of a project's mass list.
///
/// # Example
///
/// ```
/// use tfm_parser::MassListStore;
/// use tfm_types::MassListItem;
///
/// let mut store = MassListStore::new();
/// store.insert_items([MassListItem::new("1", "+1=360.001-RTA001", "360.001", "RTA001")]);
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.find_by_component("rta-001").unwrap().id, "1");
/// ```
#[derive(Default)]
pub struct MassListStore {
    /// Items in registry order.
    entries: Vec<RegistryEntry>,
    /// Position of each item by identifier.
    by_id: HashMap<String, usize>,
    /// Position of the first item with each normalized component.
    by_component: HashMap<String, usize>,
}

impl std::fmt::Debug for MassListStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MassListStore")
            .field("entries", &self.entries.len())
            .field("by_id", &self.by_id.len())
            .field("by_component", &self.by_component.len())
            .finish()
    }
}

impl MassListStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `items` in the given order.
    pub fn from_items(items: impl IntoIterator<Item = MassListItem>) -> Self {
        let mut store = Self::new();
        store.insert_items(items);
        store
    }

    /// Loads items from a mass-list file, skipping invalid rows.
    ///
    /// Returns the number of items loaded.
    pub fn load<P: AsRef<Path>>(&mut self, path: P, config: &MassListConfig) -> TfmResult<usize> {
        let path = path.as_ref();
        let reader = MassListReader::from_path(path, config)?;
        let mut count = 0;

        for result in reader {
            match result {
                Ok(item) => {
                    self.push(item);
                    count += 1;
                }
                Err(e) => warn!(path = %path.display(), "Skipping mass-list row: {}", e),
            }
        }

        debug!(path = %path.display(), count, "Loaded mass list");
        Ok(count)
    }

    /// Appends items to the store.
    pub fn insert_items(&mut self, items: impl IntoIterator<Item = MassListItem>) {
        for item in items {
            self.push(item);
        }
    }

    fn push(&mut self, item: MassListItem) {
        let index = self.entries.len();
        let entry = RegistryEntry::new(item);
        self.by_id.entry(entry.item.id.clone()).or_insert(index);
        if !entry.component_key.is_empty() {
            self.by_component
                .entry(entry.component_key.clone())
                .or_insert(index);
        }
        self.entries.push(entry);
    }

    /// Returns the item with the given identifier.
    pub fn get(&self, id: &str) -> Option<&MassListItem> {
        self.by_id.get(id).map(|&i| &self.entries[i].item)
    }

    /// Returns the first item whose normalized component equals the normalized `code`.
    pub fn find_by_component(&self, code: &str) -> Option<&MassListItem> {
        self.by_component
            .get(&normalize_registry_key(code))
            .map(|&i| &self.entries[i].item)
    }

    /// Iterates over items in registry order.
    pub fn items(&self) -> impl Iterator<Item = &MassListItem> {
        self.entries.iter().map(|e| &e.item)
    }

    pub(crate) fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
