use crate::domain::property::Property;
use std::sync::{Arc, RwLock};

/// The in-memory listing collection shared by every request thread.
///
/// Readers take a snapshot `Arc`; a reload swaps in a whole new collection, so a reader
/// sees either the old set or the new one, never a mix.
#[derive(Debug, Default)]
pub struct WorkingSet {
    inner: RwLock<Arc<Vec<Property>>>,
}

impl WorkingSet {
    pub fn new(properties: Vec<Property>) -> Self {
        Self {
            inner: RwLock::new(Arc::new(properties)),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<Property>> {
        match self.inner.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn replace(&self, properties: Vec<Property>) {
        let next = Arc::new(properties);
        match self.inner.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
