use chrono::NaiveDate;

use crate::models::{AppData, IntakeRecord};
use crate::schedule::{is_intake_taken, sorted_stages};

/// Flips the record for the triple, creating it as taken on first toggle.
///
/// Records are never removed by toggling; a second toggle leaves a record
/// with `taken == false` and the same id.
pub fn toggle_intake_record(
    data: &AppData,
    medication_id: &str,
    stage_id: &str,
    date: NaiveDate,
) -> AppData {
    let mut next = data.clone();
    match next
        .records
        .iter_mut()
        .find(|r| r.matches(medication_id, stage_id, date))
    {
        Some(record) => record.taken = !record.taken,
        None => next
            .records
            .push(IntakeRecord::new(medication_id, stage_id, date)),
    }
    next
}

pub fn get_intake_record<'a>(
    data: &'a AppData,
    medication_id: &str,
    stage_id: &str,
    date: NaiveDate,
) -> Option<&'a IntakeRecord> {
    data.records
        .iter()
        .find(|r| r.matches(medication_id, stage_id, date))
}

/// Toggles every stage of a medication on `date` as one checkbox.
///
/// When all stages are already taken they are all cleared; otherwise the
/// stages not yet taken are marked taken.
pub fn toggle_all_stages(data: &AppData, medication_id: &str, date: NaiveDate) -> AppData {
    let stages = sorted_stages(data);
    let all_taken = stages
        .iter()
        .all(|stage| is_intake_taken(data, medication_id, &stage.id, date));

    stages
        .iter()
        .filter(|stage| is_intake_taken(data, medication_id, &stage.id, date) == all_taken)
        .fold(data.clone(), |next, stage| {
            toggle_intake_record(&next, medication_id, &stage.id, date)
        })
}
