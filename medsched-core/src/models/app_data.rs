use serde::{Deserialize, Serialize};

use super::medication::Medication;
use super::record::IntakeRecord;
use super::stage::{default_stages, IntakeStage};

/// The whole persisted document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppData {
    pub stages: Vec<IntakeStage>,
    pub medications: Vec<Medication>,
    pub records: Vec<IntakeRecord>,
}

impl Default for AppData {
    /// A fresh document: the seed stages, no medications, no records.
    fn default() -> Self {
        Self {
            stages: default_stages(),
            medications: Vec::new(),
            records: Vec::new(),
        }
    }
}

impl AppData {
    pub fn stage(&self, stage_id: &str) -> Option<&IntakeStage> {
        self.stages.iter().find(|s| s.id == stage_id)
    }

    pub fn medication(&self, medication_id: &str) -> Option<&Medication> {
        self.medications.iter().find(|m| m.id == medication_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document() {
        let data = AppData::default();
        assert_eq!(data.stages.len(), 7);
        assert!(data.medications.is_empty());
        assert!(data.records.is_empty());
    }

    #[test]
    fn test_lookup_by_id() {
        let data = AppData::default();
        assert_eq!(data.stage("7").map(|s| s.name.as_str()), Some("At night"));
        assert!(data.stage("8").is_none());
        assert!(data.medication("1").is_none());
    }
}
