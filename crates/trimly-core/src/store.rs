//! Event log store port
//!
//! The store knows nothing about record types: it maps a collection name to
//! a JSON document and reads or writes that document as a whole. Typed access,
//! caps and locking live one level up in [`crate::journal`].

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{Error, Result};

/// Named collections persisted by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    ActivityLog,
    FoodLog,
    SatietyHistory,
    EnergyHistory,
    WaterLog,
    WeightHistory,
    SurveyData,
    DailyGoals,
    DailyWins,
}

impl Collection {
    /// Stable key the collection is stored under
    pub fn key(&self) -> &'static str {
        match self {
            Self::ActivityLog => "activityLog",
            Self::FoodLog => "foodLog",
            Self::SatietyHistory => "satietyHistory",
            Self::EnergyHistory => "energyHistory",
            Self::WaterLog => "waterLog",
            Self::WeightHistory => "weightHistory",
            Self::SurveyData => "surveyData",
            Self::DailyGoals => "dailyGoals",
            Self::DailyWins => "dailyWins",
        }
    }

    pub fn all() -> &'static [Collection] {
        &[
            Self::ActivityLog,
            Self::FoodLog,
            Self::SatietyHistory,
            Self::EnergyHistory,
            Self::WaterLog,
            Self::WeightHistory,
            Self::SurveyData,
            Self::DailyGoals,
            Self::DailyWins,
        ]
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Whole-document persistence for named collections
///
/// Implementations do not need to be transactional; the journal serializes
/// read-modify-write cycles per collection.
pub trait LogStore: Send + Sync {
    /// Read the raw JSON document for a collection, `None` if never written
    fn read(&self, collection: Collection) -> Result<Option<String>>;

    /// Replace the JSON document for a collection
    fn write(&self, collection: Collection, document: &str) -> Result<()>;

    /// Short name for logging
    fn name(&self) -> &str;
}

/// In-process store, used by tests and as a scratch store
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<Collection, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogStore for MemoryStore {
    fn read(&self, collection: Collection) -> Result<Option<String>> {
        let documents = self
            .documents
            .read()
            .map_err(|_| Error::InvalidData("Memory store lock poisoned".into()))?;
        Ok(documents.get(&collection).cloned())
    }

    fn write(&self, collection: Collection, document: &str) -> Result<()> {
        let mut documents = self
            .documents
            .write()
            .map_err(|_| Error::InvalidData("Memory store lock poisoned".into()))?;
        documents.insert(collection, document.to_string());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
