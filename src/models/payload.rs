//! Snapshot payloads and entity counts
//!
//! A payload holds the records of every category keyed by category, so
//! restore and comparison work against typed keys instead of an untyped blob.
//! Record schemas belong to the host application; the vault treats each
//! record as an opaque JSON value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::category::EntityCategory;

/// Per-category record counts captured with a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityCounts(BTreeMap<EntityCategory, usize>);

impl EntityCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for a category; missing categories count as zero
    pub fn get(&self, category: EntityCategory) -> usize {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn set(&mut self, category: EntityCategory, count: usize) {
        self.0.insert(category, count);
    }

    /// Sum over all categories
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityCategory, usize)> + '_ {
        self.0.iter().map(|(c, n)| (*c, *n))
    }
}

impl FromIterator<(EntityCategory, usize)> for EntityCounts {
    fn from_iter<I: IntoIterator<Item = (EntityCategory, usize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The captured records of a snapshot, keyed by category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<EntityCategory, Vec<Value>>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for a category; missing categories are empty
    pub fn records(&self, category: EntityCategory) -> &[Value] {
        self.0.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn insert(&mut self, category: EntityCategory, records: Vec<Value>) {
        self.0.insert(category, records);
    }

    /// Derive per-category counts from the records actually present
    ///
    /// Every known category is present in the result, with zero for
    /// categories the payload lacks.
    pub fn counts(&self) -> EntityCounts {
        EntityCategory::all()
            .iter()
            .map(|c| (*c, self.records(*c).len()))
            .collect()
    }

    /// Serialized form, whose byte length is the snapshot size
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Categories whose recorded count disagrees with the payload
    pub fn mismatches(&self, recorded: &EntityCounts) -> Vec<EntityCategory> {
        EntityCategory::all()
            .iter()
            .copied()
            .filter(|c| recorded.get(*c) != self.records(*c).len())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_counts_cover_every_category() {
        let mut payload = Payload::new();
        payload.insert(
            EntityCategory::Meals,
            vec![json!({"name": "Oats"}), json!({"name": "Salad"})],
        );

        let counts = payload.counts();
        assert_eq!(counts.get(EntityCategory::Meals), 2);
        assert_eq!(counts.get(EntityCategory::Vitals), 0);
        assert_eq!(counts.iter().count(), EntityCategory::ALL.len());
        assert_eq!(counts.total(), 2);
    }

    #[test]
    fn test_mismatches_detects_tampered_counts() {
        let mut payload = Payload::new();
        payload.insert(EntityCategory::Weights, vec![json!({"kg": 80.5})]);

        let mut counts = payload.counts();
        assert!(payload.mismatches(&counts).is_empty());

        counts.set(EntityCategory::Weights, 3);
        assert_eq!(payload.mismatches(&counts), vec![EntityCategory::Weights]);
    }

    #[test]
    fn test_payload_serializes_as_category_map() {
        let mut payload = Payload::new();
        payload.insert(EntityCategory::SleepSessions, vec![json!({"hours": 7})]);

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["sleepSessions"][0]["hours"], 7);
    }
}
