//! Typed access to the event log store
//!
//! Every collection is read and written as a whole JSON document. The journal
//! layers types on top of that:
//!
//! - `Record` collections are arrays with a fixed ordering and an optional
//!   cap, accessed through a [`Repository`].
//! - `Document` collections hold a single object (water log, survey).
//!
//! Each collection has its own mutex, so a read-modify-write on one collection
//! is a critical section and concurrent writers cannot lose updates.
//!
//! Reads never fail: a missing or undecodable collection reads as empty and is
//! logged. Writes come in two flavours: `try_*` returns the error, the plain
//! variant logs and swallows it.

use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::models::{
    ActivityLogEntry, DailyGoalRecord, DailyWin, EnergyRecord, MealEntry, SatietyRecord,
    SurveyProfile, WaterLog, WeightEntry,
};
use crate::store::{Collection, LogStore, MemoryStore};

/// A record stored in an array collection
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    const COLLECTION: Collection;
    /// Oldest entries are evicted beyond this many
    const CAPACITY: Option<usize> = None;
    /// Whether new entries are prepended (newest first) or appended
    const NEWEST_FIRST: bool;
}

impl Record for ActivityLogEntry {
    const COLLECTION: Collection = Collection::ActivityLog;
    const NEWEST_FIRST: bool = false;
}

impl Record for MealEntry {
    const COLLECTION: Collection = Collection::FoodLog;
    const NEWEST_FIRST: bool = false;
}

impl Record for SatietyRecord {
    const COLLECTION: Collection = Collection::SatietyHistory;
    const CAPACITY: Option<usize> = Some(100);
    const NEWEST_FIRST: bool = true;
}

impl Record for EnergyRecord {
    const COLLECTION: Collection = Collection::EnergyHistory;
    const CAPACITY: Option<usize> = Some(100);
    const NEWEST_FIRST: bool = true;
}

impl Record for WeightEntry {
    const COLLECTION: Collection = Collection::WeightHistory;
    const NEWEST_FIRST: bool = true;
}

impl Record for DailyWin {
    const COLLECTION: Collection = Collection::DailyWins;
    const CAPACITY: Option<usize> = Some(30);
    const NEWEST_FIRST: bool = true;
}

impl Record for DailyGoalRecord {
    const COLLECTION: Collection = Collection::DailyGoals;
    const NEWEST_FIRST: bool = false;
}

/// A single-object collection
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const COLLECTION: Collection;
}

impl Document for WaterLog {
    const COLLECTION: Collection = Collection::WaterLog;
}

impl Document for SurveyProfile {
    const COLLECTION: Collection = Collection::SurveyData;
}

/// Typed, lock-protected view over a [`LogStore`]
pub struct Journal {
    store: Arc<dyn LogStore>,
    locks: HashMap<Collection, Mutex<()>>,
}

impl Journal {
    pub fn new(store: Arc<dyn LogStore>) -> Self {
        let locks = Collection::all()
            .iter()
            .map(|&c| (c, Mutex::new(())))
            .collect();
        Self { store, locks }
    }

    /// Journal over a fresh in-process store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &dyn LogStore {
        self.store.as_ref()
    }

    /// Typed repository for an array collection
    pub fn repo<T: Record>(&self) -> Repository<'_, T> {
        Repository {
            journal: self,
            _record: PhantomData,
        }
    }

    fn lock(&self, collection: Collection) -> Option<MutexGuard<'_, ()>> {
        // A panic while holding the lock leaves no partial write behind
        self.locks
            .get(&collection)
            .map(|m| m.lock().unwrap_or_else(|poisoned| poisoned.into_inner()))
    }

    /// Strict read: store and decode errors are returned
    fn read_strict<V: DeserializeOwned>(&self, collection: Collection) -> Result<Option<V>> {
        match self.store.read(collection)? {
            None => Ok(None),
            Some(document) => serde_json::from_str(&document).map(Some).map_err(|e| {
                Error::InvalidData(format!("Undecodable {} collection: {}", collection, e))
            }),
        }
    }

    /// Lenient read: any failure reads as absent
    fn read_lenient<V: DeserializeOwned>(&self, collection: Collection) -> Option<V> {
        match self.read_strict(collection) {
            Ok(value) => value,
            Err(e) => {
                warn!(store = self.store.name(), collection = %collection, error = %e, "Failed to read collection, treating as empty");
                None
            }
        }
    }

    fn write<V: Serialize + ?Sized>(&self, collection: Collection, value: &V) -> Result<()> {
        let document = serde_json::to_string(value)?;
        self.store.write(collection, &document)
    }

    /// Load a single-object collection, `None` if never saved or unreadable
    pub fn load<D: Document>(&self) -> Option<D> {
        let _guard = self.lock(D::COLLECTION);
        self.read_lenient(D::COLLECTION)
    }

    /// Replace a single-object collection
    pub fn try_save<D: Document>(&self, document: &D) -> Result<()> {
        let _guard = self.lock(D::COLLECTION);
        self.write(D::COLLECTION, document)
    }

    /// Read-modify-write a single-object collection under its lock
    pub fn try_update_document<D, R>(&self, f: impl FnOnce(Option<D>) -> (D, R)) -> Result<R>
    where
        D: Document,
    {
        let _guard = self.lock(D::COLLECTION);
        let current = self.read_strict(D::COLLECTION)?;
        let (next, result) = f(current);
        self.write(D::COLLECTION, &next)?;
        Ok(result)
    }

    /// Number of entries per collection: array length, 1 for a stored object
    pub fn counts(&self) -> Vec<(Collection, usize)> {
        Collection::all()
            .iter()
            .map(|&collection| {
                let _guard = self.lock(collection);
                let count = match self.read_lenient::<serde_json::Value>(collection) {
                    None | Some(serde_json::Value::Null) => 0,
                    Some(serde_json::Value::Array(items)) => items.len(),
                    Some(_) => 1,
                };
                (collection, count)
            })
            .collect()
    }
}

/// Typed access to one array collection
///
/// Ordering and caps are enforced on every write: `NEWEST_FIRST` collections
/// are prepended and truncated from the end, the others are appended and
/// evicted from the front.
pub struct Repository<'a, T: Record> {
    journal: &'a Journal,
    _record: PhantomData<T>,
}

impl<T: Record> Repository<'_, T> {
    /// Every entry in stored order
    pub fn all(&self) -> Vec<T> {
        let _guard = self.journal.lock(T::COLLECTION);
        self.journal
            .read_lenient::<Vec<T>>(T::COLLECTION)
            .unwrap_or_default()
    }

    /// The `n` most recent entries, newest first
    pub fn list_recent(&self, n: usize) -> Vec<T> {
        let all = self.all();
        if T::NEWEST_FIRST {
            all.into_iter().take(n).collect()
        } else {
            all.into_iter().rev().take(n).collect()
        }
    }

    /// Entries newest first
    pub fn newest_first(&self) -> Vec<T> {
        let mut all = self.all();
        if !T::NEWEST_FIRST {
            all.reverse();
        }
        all
    }

    pub fn count(&self) -> usize {
        self.all().len()
    }

    /// Read-modify-write the whole collection under its lock
    ///
    /// Nothing is written if the stored document cannot be read or decoded.
    pub fn try_update<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Result<R> {
        let _guard = self.journal.lock(T::COLLECTION);
        let mut items: Vec<T> = self
            .journal
            .read_strict(T::COLLECTION)?
            .unwrap_or_default();
        let result = f(&mut items);
        enforce_capacity::<T>(&mut items);
        self.journal.write(T::COLLECTION, &items)?;
        Ok(result)
    }

    /// Add an entry at the collection's "newest" end
    pub fn try_append(&self, item: T) -> Result<()> {
        self.try_update(|items| insert_newest(items, item))
    }

    /// Add an entry, logging failures
    pub fn append(&self, item: T) {
        if let Err(e) = self.try_append(item) {
            warn!(store = self.journal.store().name(), collection = %T::COLLECTION, error = %e, "Failed to append to collection");
        }
    }

    /// Add an entry unless an existing one matches `exists`
    ///
    /// Returns whether the entry was added.
    pub fn try_append_unless(&self, item: T, exists: impl Fn(&T) -> bool) -> Result<bool> {
        self.try_update(|items| {
            if items.iter().any(|existing| exists(existing)) {
                false
            } else {
                insert_newest(items, item);
                true
            }
        })
    }

    /// Remove every entry matching `pred`, returning how many were removed
    pub fn try_remove_where(&self, pred: impl Fn(&T) -> bool) -> Result<usize> {
        self.try_update(|items| {
            let before = items.len();
            items.retain(|item| !pred(item));
            before - items.len()
        })
    }
}

fn insert_newest<T: Record>(items: &mut Vec<T>, item: T) {
    if T::NEWEST_FIRST {
        items.insert(0, item);
    } else {
        items.push(item);
    }
}

fn enforce_capacity<T: Record>(items: &mut Vec<T>) {
    let Some(cap) = T::CAPACITY else {
        return;
    };
    if items.len() <= cap {
        return;
    }
    if T::NEWEST_FIRST {
        items.truncate(cap);
    } else {
        let excess = items.len() - cap;
        items.drain(..excess);
    }
}
