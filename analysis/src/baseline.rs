//! The per-player snapshot marking the start of the current season.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::counters::{CounterSchema, CounterSet, Snapshot, WeaponCounterSet};

/// Stored start-of-season values for one player.
///
/// Records written before weapon tracking existed have no `weapons` section,
/// and records written by an older schema miss individual counter keys. Both
/// are repaired by [`BaselineStore::ensure_record`].
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BaselineRecord {
    #[serde(default)]
    pub stats: CounterSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapons: Option<WeaponCounterSet>,
}

impl BaselineRecord {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            stats: snapshot.counters.clone(),
            weapons: Some(snapshot.weapons.clone()),
        }
    }

    pub fn stat(&self, key: &str) -> u64 {
        self.stats.get(key).copied().unwrap_or(0)
    }

    pub fn weapon_kills(&self, weapon: &str) -> u64 {
        self.weapons
            .as_ref()
            .and_then(|w| w.get(weapon))
            .copied()
            .unwrap_or(0)
    }

    /// Adds every counter of `schema` that is missing from this record,
    /// anchored at the current value. Returns the keys that were added.
    pub fn backfill(&mut self, schema: CounterSchema, current: &CounterSet) -> Vec<String> {
        let mut added = Vec::new();

        for key in schema.counter_keys() {
            if self.stats.contains_key(&key) {
                continue;
            }

            let value = current.get(&key).copied().unwrap_or(0);
            self.stats.insert(key.clone(), value);
            added.push(key);
        }

        added
    }
}

/// What [`BaselineStore::ensure_record`] had to do for a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineChange {
    Unchanged,
    /// No usable record existed, a fresh one was taken from the current values.
    Created,
    /// The record existed but lacked these counter keys.
    Patched(Vec<String>),
}

impl BaselineChange {
    pub fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// All baseline records, keyed by the player's source id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaselineStore {
    records: BTreeMap<String, BaselineRecord>,
    dirty: bool,
}

impl BaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: BTreeMap<String, BaselineRecord>) -> Self {
        Self {
            records,
            dirty: false,
        }
    }

    pub fn records(&self) -> &BTreeMap<String, BaselineRecord> {
        &self.records
    }

    pub fn get(&self, steam_id: &str) -> Option<&BaselineRecord> {
        self.records.get(steam_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the store differs from what was loaded or last persisted.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drops every record, starting a new season.
    pub fn reset(&mut self) {
        tracing::info!(records = self.records.len(), "Resetting season baseline");

        self.records.clear();
        self.dirty = true;
    }

    /// Returns the baseline for `steam_id`, creating or repairing it first.
    ///
    /// An existing counter value is never overwritten.
    pub fn ensure_record(
        &mut self,
        steam_id: &str,
        schema: CounterSchema,
        current: &Snapshot,
    ) -> (&BaselineRecord, BaselineChange) {
        let (record, change) = match self.records.entry(steam_id.to_owned()) {
            Entry::Occupied(entry) if entry.get().weapons.is_some() => {
                let record = entry.into_mut();
                let added = record.backfill(schema, &current.counters);
                if added.is_empty() {
                    (record, BaselineChange::Unchanged)
                } else {
                    tracing::info!(steam_id, ?added, "Backfilling new counters into baseline");
                    (record, BaselineChange::Patched(added))
                }
            }
            Entry::Occupied(entry) => {
                tracing::info!(steam_id, "Replacing baseline without weapon section");
                let record = entry.into_mut();
                *record = BaselineRecord::from_snapshot(current);
                (record, BaselineChange::Created)
            }
            Entry::Vacant(entry) => {
                tracing::info!(steam_id, "Creating new baseline");
                (
                    entry.insert(BaselineRecord::from_snapshot(current)),
                    BaselineChange::Created,
                )
            }
        };

        if change.is_change() {
            self.dirty = true;
        }

        (&*record, change)
    }

    /// Hands the records to `write` if anything changed since the last
    /// persist. Returns whether a write happened.
    pub fn persist<F, E>(&mut self, write: F) -> Result<bool, E>
    where
        F: FnOnce(&BTreeMap<String, BaselineRecord>) -> Result<(), E>,
    {
        if !self.dirty {
            tracing::debug!("Baseline unchanged, skipping write");
            return Ok(false);
        }

        write(&self.records)?;
        self.dirty = false;

        Ok(true)
    }
}
