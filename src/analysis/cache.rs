// Snapshot cache — built frequency tables shared across analyses.
//
// Keyed by category. A table is inserted only once fully built and is never
// mutated afterwards, so concurrent readers either see a complete snapshot or
// nothing.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::corpus::Category;
use crate::table::FrequencyTable;

#[derive(Debug, Default)]
pub struct SnapshotCache {
    tables: RwLock<HashMap<Category, Arc<FrequencyTable>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> Option<Arc<FrequencyTable>> {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        tables.get(&category).cloned()
    }

    /// Store `table` for `category` and return the cached snapshot.
    ///
    /// If another analysis cached the same category first, that snapshot
    /// wins and is returned instead. Both were built from the same corpus so
    /// they are equal.
    pub fn insert(&self, category: Category, table: Arc<FrequencyTable>) -> Arc<FrequencyTable> {
        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        let cached = tables.entry(category).or_insert(table).clone();
        debug!(category = %category, cached = tables.len(), "Cached frequency table");
        cached
    }

    pub fn len(&self) -> usize {
        self.tables.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
