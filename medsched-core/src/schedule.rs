//! Read-only views derived from the document.
//!
//! Nothing here is stored: display order, activity and the per-day grid are
//! recomputed from [`AppData`] on every call.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AppData, IntakeStage, Medication, MedicationIntake};
use crate::mutations::get_intake_record;

/// Stages in display order. Equal orders keep their stored order.
pub fn sorted_stages(data: &AppData) -> Vec<&IntakeStage> {
    let mut stages: Vec<_> = data.stages.iter().collect();
    stages.sort_by_key(|s| s.order);
    stages
}

/// Medications in display order. Equal orders keep their stored order.
pub fn sorted_medications(data: &AppData) -> Vec<&Medication> {
    let mut medications: Vec<_> = data.medications.iter().collect();
    medications.sort_by_key(|m| m.order);
    medications
}

/// Whether a record exists for the triple and is marked taken.
pub fn is_intake_taken(
    data: &AppData,
    medication_id: &str,
    stage_id: &str,
    date: NaiveDate,
) -> bool {
    get_intake_record(data, medication_id, stage_id, date).is_some_and(|r| r.taken)
}

/// One stage column of a schedule row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleCell<'a> {
    pub stage: &'a IntakeStage,
    pub intake: Option<&'a MedicationIntake>,
    pub taken: bool,
}

impl ScheduleCell<'_> {
    /// A checkbox is offered only for a configured dose on an active day.
    pub fn is_checkable(&self, active: bool) -> bool {
        active && self.intake.is_some_and(MedicationIntake::has_dosage)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow<'a> {
    pub medication: &'a Medication,
    pub active: bool,
    pub uniform_dose: bool,
    pub cells: Vec<ScheduleCell<'a>>,
}

impl ScheduleRow<'_> {
    /// True when every stage is taken; used for the merged uniform-dose cell.
    pub fn all_taken(&self) -> bool {
        self.cells.iter().all(|c| c.taken)
    }
}

/// The medication-by-stage grid for a single day.
#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule<'a> {
    pub date: NaiveDate,
    pub stages: Vec<&'a IntakeStage>,
    pub rows: Vec<ScheduleRow<'a>>,
}

pub fn day_schedule(data: &AppData, date: NaiveDate) -> DaySchedule<'_> {
    let stages = sorted_stages(data);
    let rows = sorted_medications(data)
        .into_iter()
        .map(|medication| ScheduleRow {
            medication,
            active: medication.is_active_on(date),
            uniform_dose: medication.has_uniform_dose(stages.len()),
            cells: stages
                .iter()
                .map(|&stage| ScheduleCell {
                    stage,
                    intake: medication.intake_for(&stage.id),
                    taken: is_intake_taken(data, &medication.id, &stage.id, date),
                })
                .collect(),
        })
        .collect();

    DaySchedule { date, stages, rows }
}
