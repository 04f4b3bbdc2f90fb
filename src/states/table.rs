use std::collections::BTreeMap;

use super::parser::{parse_record, split_records, StateParseError};
use super::types::{ExtensionState, StateEntry, StateNumber};

/// The installed set of state records, keyed by state number.
///
/// A table is replaced wholesale on every load; it is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateTable {
    entries: BTreeMap<StateNumber, StateEntry>,
    records: Vec<String>,
}

impl StateTable {
    /// Build a table from payload chunks. Each chunk may hold several
    /// separator-delimited records. Fails on the first malformed record or
    /// when no record is present at all.
    pub fn parse<'a, I>(chunks: I) -> Result<Self, StateParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut table = StateTable::default();

        for record in chunks.into_iter().flat_map(split_records) {
            let entry = parse_record(record)?;
            if let Some(previous) = table.entries.insert(entry.number(), entry) {
                tracing::debug!(
                    state = %previous.number(),
                    "State record replaced by a later record in the same load"
                );
            }
            table.records.push(record.to_string());
        }

        if table.entries.is_empty() {
            return Err(StateParseError::Empty);
        }
        Ok(table)
    }

    pub fn get(&self, number: StateNumber) -> Option<&StateEntry> {
        self.entries.get(&number)
    }

    pub fn contains(&self, number: StateNumber) -> bool {
        self.entries.contains_key(&number)
    }

    /// Extension state linked from `entry`, if it has one and it is loaded.
    pub fn extension_for(&self, entry: &StateEntry) -> Option<&ExtensionState> {
        match self.get(entry.extension_state()?)? {
            StateEntry::Extension(extension) => Some(extension),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw records in load order, suitable for persisting and reloading.
    pub fn records(&self) -> &[String] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateEntry> {
        self.entries.values()
    }
}
