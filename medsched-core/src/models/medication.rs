use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{date_format, lenient};
use super::stage::IntakeStage;

/// Per-stage dosing embedded in a medication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicationIntake {
    pub stage_id: String,
    /// Free-text dose. Empty (or `null` in storage) means no dose is
    /// configured for this stage.
    #[serde(default, deserialize_with = "lenient::null_as_empty")]
    pub quantity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
}

impl MedicationIntake {
    pub fn new(stage_id: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            stage_id: stage_id.into(),
            quantity: quantity.into(),
            recommendations: None,
        }
    }

    pub fn with_recommendations(mut self, recommendations: impl Into<String>) -> Self {
        self.recommendations = Some(recommendations.into());
        self
    }

    /// Whether a dose is configured, i.e. whether the stage gets a checkbox.
    pub fn has_dosage(&self) -> bool {
        !self.quantity.is_empty()
    }
}

/// Everything about a medication that the caller controls.
///
/// `id` and `order` are assigned by the document on add and carried over on
/// update, so they are not part of this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MedicationFields {
    pub name: String,
    pub intakes: Vec<MedicationIntake>,
    pub start_date: NaiveDate,
    #[serde(default, with = "date_format::optional")]
    pub end_date: Option<NaiveDate>,
}

impl MedicationFields {
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            intakes: Vec::new(),
            start_date,
            end_date: None,
        }
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn with_intake(mut self, intake: MedicationIntake) -> Self {
        self.set_intake(intake);
        self
    }

    /// Replaces the intakes with one identical entry per stage.
    pub fn with_uniform_dose(
        mut self,
        stages: &[IntakeStage],
        quantity: &str,
        recommendations: Option<&str>,
    ) -> Self {
        self.intakes = stages
            .iter()
            .map(|stage| MedicationIntake {
                stage_id: stage.id.clone(),
                quantity: quantity.to_string(),
                recommendations: recommendations.map(str::to_string),
            })
            .collect();
        self
    }

    /// Inserts the intake, replacing any existing entry for the same stage.
    pub fn set_intake(&mut self, intake: MedicationIntake) {
        match self
            .intakes
            .iter_mut()
            .find(|i| i.stage_id == intake.stage_id)
        {
            Some(existing) => *existing = intake,
            None => self.intakes.push(intake),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub intakes: Vec<MedicationIntake>,
    pub start_date: NaiveDate,
    #[serde(default, with = "date_format::optional")]
    pub end_date: Option<NaiveDate>,
    pub order: i64,
}

impl Medication {
    pub fn from_fields(id: impl Into<String>, order: i64, fields: MedicationFields) -> Self {
        Self {
            id: id.into(),
            name: fields.name,
            intakes: fields.intakes,
            start_date: fields.start_date,
            end_date: fields.end_date,
            order,
        }
    }

    /// The caller-controlled part of this medication.
    pub fn fields(&self) -> MedicationFields {
        MedicationFields {
            name: self.name.clone(),
            intakes: self.intakes.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// Active from `start_date` through `end_date` inclusive, or indefinitely
    /// when there is no end date.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.end_date.map_or(true, |end| date <= end)
    }

    pub fn intake_for(&self, stage_id: &str) -> Option<&MedicationIntake> {
        self.intakes.iter().find(|i| i.stage_id == stage_id)
    }

    /// True when every configured stage has the same non-empty dose and the
    /// same recommendations. Recomputed on every call, never stored.
    pub fn has_uniform_dose(&self, stage_count: usize) -> bool {
        let Some(first) = self.intakes.first() else {
            return false;
        };
        self.intakes.len() == stage_count
            && first.has_dosage()
            && self.intakes.iter().all(|i| {
                i.quantity == first.quantity && i.recommendations == first.recommendations
            })
    }
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Medication: {}", self.name)?;
        writeln!(f, "{}", "=".repeat(30))?;
        match self.end_date {
            Some(end) => writeln!(f, "Period: {} - {}", self.start_date, end)?,
            None => writeln!(f, "Period: from {}", self.start_date)?,
        }

        if !self.intakes.is_empty() {
            writeln!(f, "Intakes:")?;
            for intake in &self.intakes {
                write!(f, "  - stage {}: {}", intake.stage_id, intake.quantity)?;
                if let Some(rec) = &intake.recommendations {
                    write!(f, " ({})", rec)?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}
