use chrono::NaiveDate;
use serde::Deserialize;

use super::{KeyValueStore, PersistError};
use crate::models::{default_stages, AppData, IntakeRecord, IntakeStage, Medication};
use crate::models::{date_format, MedicationIntake};

/// The single key the document lives under.
pub const STORAGE_KEY: &str = "medication-schedule-data";

/// Loads and saves the document through a [`KeyValueStore`].
///
/// Neither operation fails from the caller's point of view: a missing or
/// unreadable document loads as the default one, and a failed write is
/// logged while the caller keeps its in-memory copy.
#[derive(Debug)]
pub struct DocumentStore<S> {
    store: S,
}

impl<S: KeyValueStore> DocumentStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the document, repairing what older or partial blobs lack.
    ///
    /// - nothing stored, a store error or unparseable JSON: default document
    /// - missing or empty `stages`: the seed stages
    /// - missing `medications`/`records`/`intakes`: empty
    /// - `null` intake quantity: no dose
    /// - medication without an `order` (or `0`): its 1-based position
    pub fn load(&self) -> AppData {
        let blob = match self.store.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                tracing::debug!("No stored document, starting with defaults");
                return AppData::default();
            }
            Err(e) => {
                tracing::warn!("Failed to read stored document: {}", e);
                return AppData::default();
            }
        };

        match serde_json::from_str::<StoredDocument>(&blob) {
            Ok(stored) => {
                let data = stored.repair();
                tracing::debug!(
                    "Loaded {} stage(s), {} medication(s), {} record(s)",
                    data.stages.len(),
                    data.medications.len(),
                    data.records.len()
                );
                data
            }
            Err(e) => {
                tracing::warn!("Failed to parse stored document: {}", e);
                AppData::default()
            }
        }
    }

    /// Writes the full document. Failures are logged, not returned.
    pub fn save(&self, data: &AppData) {
        match self.write(data) {
            Ok(()) => tracing::debug!("Saved document under '{}'", STORAGE_KEY),
            Err(e) => tracing::error!("Failed to save document: {}", e),
        }
    }

    fn write(&self, data: &AppData) -> Result<(), PersistError> {
        let blob = serde_json::to_string(data)?;
        self.store.set(STORAGE_KEY, &blob)?;
        Ok(())
    }
}

/// The document as it may be found in storage.
#[derive(Deserialize)]
struct StoredDocument {
    #[serde(default)]
    stages: Option<Vec<IntakeStage>>,
    #[serde(default)]
    medications: Option<Vec<StoredMedication>>,
    #[serde(default)]
    records: Option<Vec<IntakeRecord>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMedication {
    id: String,
    name: String,
    #[serde(default)]
    intakes: Option<Vec<MedicationIntake>>,
    start_date: NaiveDate,
    #[serde(default, with = "date_format::optional")]
    end_date: Option<NaiveDate>,
    #[serde(default)]
    order: Option<i64>,
}

impl StoredDocument {
    fn repair(self) -> AppData {
        let stages = match self.stages {
            Some(stages) if !stages.is_empty() => stages,
            _ => {
                tracing::debug!("Stored document has no stages, using defaults");
                default_stages()
            }
        };

        let medications = self
            .medications
            .unwrap_or_default()
            .into_iter()
            .zip(1..)
            .map(|(m, position)| Medication {
                id: m.id,
                name: m.name,
                intakes: m.intakes.unwrap_or_default(),
                start_date: m.start_date,
                end_date: m.end_date,
                order: m.order.filter(|&o| o != 0).unwrap_or(position),
            })
            .collect();

        AppData {
            stages,
            medications,
            records: self.records.unwrap_or_default(),
        }
    }
}
