//! Item store
//!
//! Ordered collection of card records. Order is display order; identity is
//! the record id, which stays stable across removals of other records.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a card record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(Uuid);

impl CardId {
    /// Fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CardId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for CardId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A card: an id and an opaque image reference
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: CardId,
    pub image_ref: String,
}

impl CardRecord {
    pub fn new(image_ref: impl Into<String>) -> Self {
        Self {
            id: CardId::new(),
            image_ref: image_ref.into(),
        }
    }
}

/// The default bundled set: `img_1` through `img_{count}`
pub fn sample_records(count: usize) -> Vec<CardRecord> {
    (1..=count)
        .map(|index| CardRecord::new(format!("img_{index}")))
        .collect()
}

/// Ordered card records keyed by id
#[derive(Clone, Debug, Default)]
pub struct ItemStore {
    records: IndexMap<CardId, CardRecord>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new record for `image_ref`, returning its id
    pub fn append(&mut self, image_ref: impl Into<String>) -> CardId {
        let record = CardRecord::new(image_ref);
        let id = record.id;
        self.records.insert(id, record);
        id
    }

    /// Append an existing record. Returns false (and leaves the store
    /// unchanged) if a record with the same id is already present.
    pub fn insert(&mut self, record: CardRecord) -> bool {
        if self.records.contains_key(&record.id) {
            return false;
        }
        self.records.insert(record.id, record);
        true
    }

    /// Remove a record, preserving the relative order of the rest
    pub fn remove(&mut self, id: CardId) -> Option<CardRecord> {
        self.records.shift_remove(&id)
    }

    pub fn get(&self, id: CardId) -> Option<&CardRecord> {
        self.records.get(&id)
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.records.contains_key(&id)
    }

    /// Display position of a record
    pub fn position(&self, id: CardId) -> Option<usize> {
        self.records.get_index_of(&id)
    }

    /// The record displayed right after `id`
    pub fn next_after(&self, id: CardId) -> Option<CardId> {
        let index = self.records.get_index_of(&id)?;
        self.records.get_index(index + 1).map(|(next, _)| *next)
    }

    /// Records in display order
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.records.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.records.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Extend<CardRecord> for ItemStore {
    fn extend<T: IntoIterator<Item = CardRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<CardRecord> for ItemStore {
    fn from_iter<T: IntoIterator<Item = CardRecord>>(iter: T) -> Self {
        let mut store = ItemStore::new();
        store.extend(iter);
        store
    }
}
