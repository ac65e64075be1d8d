use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::new_id;

/// Completion mark for one (medication, stage, date) triple.
///
/// Created on the first toggle of a triple with `taken = true`; later toggles
/// flip `taken` on the same record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    pub id: String,
    pub medication_id: String,
    pub stage_id: String,
    pub date: NaiveDate,
    pub taken: bool,
}

impl IntakeRecord {
    pub fn new(
        medication_id: impl Into<String>,
        stage_id: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: new_id(),
            medication_id: medication_id.into(),
            stage_id: stage_id.into(),
            date,
            taken: true,
        }
    }

    pub fn matches(&self, medication_id: &str, stage_id: &str, date: NaiveDate) -> bool {
        self.medication_id == medication_id && self.stage_id == stage_id && self.date == date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_taken() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let record = IntakeRecord::new("m1", "1", date);
        assert!(record.taken);
        assert!(!record.id.is_empty());
        assert!(record.matches("m1", "1", date));
        assert!(!record.matches("m1", "2", date));
        assert!(!record.matches("m1", "1", date.succ_opt().unwrap()));
    }

    #[test]
    fn test_record_json_shape() {
        let record = IntakeRecord {
            id: "r1".to_string(),
            medication_id: "m1".to_string(),
            stage_id: "3".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            taken: false,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "r1",
                "medicationId": "m1",
                "stageId": "3",
                "date": "2024-02-29",
                "taken": false
            })
        );
    }
}
