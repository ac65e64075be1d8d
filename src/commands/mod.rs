mod config_cmd;
mod day;
mod medication;
mod stage;
mod take;

pub use config_cmd::ConfigCommand;
pub use day::DayCommand;
pub use medication::MedCommand;
pub use stage::StageCommand;
pub use take::TakeCommand;

use chrono::NaiveDate;
use clap::ValueEnum;
use medsched_core::{
    sorted_medications, sorted_stages, AppData, DocumentStore, FileStore, IntakeStage, Medication,
};

/// The document store every command works against.
pub type Schedule = DocumentStore<FileStore>;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Finds a stage by id, then by case-insensitive name.
fn resolve_stage<'a>(data: &'a AppData, reference: &str) -> Result<&'a IntakeStage, String> {
    data.stage(reference)
        .or_else(|| {
            data.stages
                .iter()
                .find(|s| s.name.eq_ignore_ascii_case(reference.trim()))
        })
        .ok_or_else(|| format!("Stage not found: {}", reference))
}

/// Finds a medication by id, then by case-insensitive name.
fn resolve_medication<'a>(data: &'a AppData, reference: &str) -> Result<&'a Medication, String> {
    data.medication(reference)
        .or_else(|| {
            data.medications
                .iter()
                .find(|m| m.name.eq_ignore_ascii_case(reference.trim()))
        })
        .ok_or_else(|| format!("Medication not found: {}", reference))
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", value))
}

/// Trims a user-supplied name and rejects empty ones.
fn required_name(value: &str, what: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{} name must not be empty", what));
    }
    Ok(trimmed.to_string())
}

/// Converts a 1-based display position to an index into `len` items.
fn position_index(position: usize, len: usize) -> Result<usize, String> {
    if position == 0 || position > len {
        return Err(format!("Position must be between 1 and {}", len));
    }
    Ok(position - 1)
}

fn stage_display_index(data: &AppData, stage_id: &str) -> Option<usize> {
    sorted_stages(data).iter().position(|s| s.id == stage_id)
}

fn medication_display_index(data: &AppData, medication_id: &str) -> Option<usize> {
    sorted_medications(data)
        .iter()
        .position(|m| m.id == medication_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medsched_core::{add_medication, MedicationFields};

    fn sample() -> AppData {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        add_medication(&AppData::default(), MedicationFields::new("Vitamin D", date))
    }

    #[test]
    fn test_resolve_stage_by_id_or_name() {
        let data = AppData::default();
        assert_eq!(resolve_stage(&data, "3").unwrap().name, "Before lunch");
        assert_eq!(resolve_stage(&data, "at night").unwrap().id, "7");
        assert!(resolve_stage(&data, "brunch").is_err());
    }

    #[test]
    fn test_resolve_medication_by_id_or_name() {
        let data = sample();
        let id = data.medications[0].id.clone();
        assert_eq!(resolve_medication(&data, &id).unwrap().name, "Vitamin D");
        assert_eq!(resolve_medication(&data, "VITAMIN D").unwrap().id, id);
        let err = resolve_medication(&data, "Iron").unwrap_err();
        assert_eq!(err, "Medication not found: Iron");
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date("29.02.2024").is_err());
    }

    #[test]
    fn test_required_name() {
        assert_eq!(required_name("  Iron ", "Medication").unwrap(), "Iron");
        assert!(required_name("   ", "Stage").is_err());
    }

    #[test]
    fn test_position_index() {
        assert_eq!(position_index(1, 3).unwrap(), 0);
        assert_eq!(position_index(3, 3).unwrap(), 2);
        assert!(position_index(0, 3).is_err());
        assert!(position_index(4, 3).is_err());
    }

    #[test]
    fn test_display_indices() {
        let mut data = AppData::default();
        data.stages.reverse();
        assert_eq!(stage_display_index(&data, "1"), Some(0));
        assert_eq!(stage_display_index(&data, "x"), None);

        let data = sample();
        let id = data.medications[0].id.clone();
        assert_eq!(medication_display_index(&data, &id), Some(0));
    }
}
