//! Insertion ordered store of issued path records

use std::collections::HashMap;

use super::path_record::PathRecord;

/// Path records in issuance order, indexed by path and by address.
#[derive(Debug, Clone, Default)]
pub(crate) struct IssuedPaths {
    records: Vec<PathRecord>,
    by_path: HashMap<String, usize>,
    by_address: HashMap<String, usize>,
}

impl IssuedPaths {
    pub(crate) fn contains(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    pub(crate) fn position(&self, path: &str) -> Option<usize> {
        self.by_path.get(path).copied()
    }

    pub(crate) fn position_of_address(&self, address: &str) -> Option<usize> {
        self.by_address.get(address).copied()
    }

    /// Stores a new record and returns its position.
    ///
    /// The first record issued for an address keeps the address index.
    pub(crate) fn insert(&mut self, record: PathRecord) -> usize {
        let position = self.records.len();
        self.by_path.insert(record.path.clone(), position);
        self.by_address.entry(record.address.clone()).or_insert(position);
        self.records.push(record);
        position
    }

    pub(crate) fn get(&self, position: usize) -> Option<&PathRecord> {
        self.records.get(position)
    }

    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut PathRecord> {
        self.records.get_mut(position)
    }

    pub(crate) fn records(&self) -> &[PathRecord] {
        &self.records
    }
}
