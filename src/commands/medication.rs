use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use medsched_core::{
    add_medication, delete_medication, move_medication, sorted_medications, update_medication,
    AppData, Medication, MedicationFields, MedicationIntake,
};

use super::{
    medication_display_index, parse_date, position_index, required_name, resolve_medication,
    resolve_stage, OutputFormat, Schedule,
};

#[derive(Args)]
pub struct MedCommand {
    #[command(subcommand)]
    pub command: MedSubcommand,
}

/// Dosing options shared by `add` and `update`
#[derive(Args, Default)]
pub struct DoseArgs {
    /// Dose for one stage: STAGE=QUANTITY[;RECOMMENDATIONS] (can be repeated)
    #[arg(long = "intake", value_name = "SPEC")]
    intakes: Vec<String>,

    /// Same dose for every stage
    #[arg(long, value_name = "QUANTITY", conflicts_with = "intakes")]
    all: Option<String>,

    /// Recommendations for the dose given with --all
    #[arg(long, requires = "all")]
    note: Option<String>,
}

impl DoseArgs {
    fn is_empty(&self) -> bool {
        self.intakes.is_empty() && self.all.is_none()
    }

    /// Applies the dosing options to `fields`, replacing its intakes.
    fn apply(&self, data: &AppData, mut fields: MedicationFields) -> Result<MedicationFields, String> {
        if let Some(quantity) = &self.all {
            return Ok(fields.with_uniform_dose(&data.stages, quantity.trim(), self.note.as_deref()));
        }

        fields.intakes.clear();
        for spec in &self.intakes {
            fields.set_intake(parse_intake(data, spec)?);
        }
        Ok(fields)
    }
}

#[derive(Subcommand)]
pub enum MedSubcommand {
    /// List medications in display order
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a medication with its doses
    Show {
        /// Medication ID or name
        medication: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a medication
    Add {
        /// Medication name
        name: String,

        /// First day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        start: Option<String>,

        /// Last day (YYYY-MM-DD); omit for no end
        #[arg(long)]
        end: Option<String>,

        #[command(flatten)]
        doses: DoseArgs,
    },

    /// Update a medication; unspecified fields keep their values
    Update {
        /// Medication ID or name
        medication: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<String>,

        /// Last day (YYYY-MM-DD), or "none" to remove the end date
        #[arg(long)]
        end: Option<String>,

        #[command(flatten)]
        doses: DoseArgs,
    },

    /// Delete a medication and its intake marks
    Delete {
        /// Medication ID or name
        medication: String,
    },

    /// Move a medication to a new position (1 = first)
    Move {
        /// Medication ID or name
        medication: String,

        /// Target position
        position: usize,
    },
}

impl MedCommand {
    pub fn run(&self, schedule: &Schedule) -> Result<(), Box<dyn std::error::Error>> {
        let data = schedule.load();

        match &self.command {
            MedSubcommand::List { format } => list(&data, format),
            MedSubcommand::Show { medication, format } => {
                let medication = resolve_medication(&data, medication)?;
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(medication)?),
                    OutputFormat::Text => print_details(&data, medication),
                }
                Ok(())
            }
            MedSubcommand::Add {
                name,
                start,
                end,
                doses,
            } => {
                let start_date = match start {
                    Some(s) => parse_date(s)?,
                    None => Local::now().date_naive(),
                };
                let mut fields = MedicationFields::new(required_name(name, "Medication")?, start_date);
                if let Some(e) = end {
                    fields = fields.with_end_date(parse_date(e)?);
                }
                check_period(&fields)?;
                let fields = doses.apply(&data, fields)?;

                let next = add_medication(&data, fields);
                schedule.save(&next);

                if let Some(added) = next.medications.last() {
                    println!("Added medication:");
                    println!();
                    print_details(&next, added);
                }
                Ok(())
            }
            MedSubcommand::Update {
                medication,
                name,
                start,
                end,
                doses,
            } => {
                let current = resolve_medication(&data, medication)?;
                let mut fields = current.fields();
                if let Some(n) = name {
                    fields.name = required_name(n, "Medication")?;
                }
                if let Some(s) = start {
                    fields.start_date = parse_date(s)?;
                }
                if let Some(e) = end {
                    fields.end_date = parse_end_date(e)?;
                }
                check_period(&fields)?;
                if !doses.is_empty() {
                    fields = doses.apply(&data, fields)?;
                }

                let next = update_medication(&data, &current.id, fields);
                schedule.save(&next);

                if let Some(updated) = next.medication(&current.id) {
                    println!("Updated medication:");
                    println!();
                    print_details(&next, updated);
                }
                Ok(())
            }
            MedSubcommand::Delete { medication } => {
                let current = resolve_medication(&data, medication)?;
                let next = delete_medication(&data, &current.id);
                schedule.save(&next);

                let removed = data.records.len() - next.records.len();
                println!(
                    "Deleted medication '{}' ({} intake mark(s) removed)",
                    current.name, removed
                );
                Ok(())
            }
            MedSubcommand::Move {
                medication,
                position,
            } => {
                let current = resolve_medication(&data, medication)?;
                let to = position_index(*position, data.medications.len())?;
                let from = medication_display_index(&data, &current.id)
                    .ok_or_else(|| format!("Medication not found: {}", medication))?;
                let next = move_medication(&data, from, to);
                schedule.save(&next);

                println!("Moved medication '{}' to position {}", current.name, position);
                Ok(())
            }
        }
    }
}

fn list(data: &AppData, format: &OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let medications = sorted_medications(data);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&medications)?);
        }
        OutputFormat::Text => {
            if medications.is_empty() {
                println!("No medications yet. Add one with 'meds med add <name>'.");
                return Ok(());
            }
            let today = Local::now().date_naive();
            for (i, med) in medications.iter().enumerate() {
                let status = if med.is_active_on(today) {
                    ""
                } else {
                    " (inactive)"
                };
                println!(
                    "{:3}. {:24} {}{}",
                    i + 1,
                    med.name,
                    format_period(med),
                    status
                );
            }
            println!("\nTotal: {} medication(s)", medications.len());
        }
    }

    Ok(())
}

/// Parses `STAGE=QUANTITY[;RECOMMENDATIONS]`.
fn parse_intake(data: &AppData, spec: &str) -> Result<MedicationIntake, String> {
    let (stage, dose) = spec
        .split_once('=')
        .ok_or_else(|| format!("Invalid intake '{}'. Use STAGE=QUANTITY[;RECOMMENDATIONS].", spec))?;
    let stage = resolve_stage(data, stage.trim())?;

    let intake = match dose.split_once(';') {
        Some((quantity, rec)) if !rec.trim().is_empty() => {
            MedicationIntake::new(stage.id.as_str(), quantity.trim()).with_recommendations(rec.trim())
        }
        Some((quantity, _)) => MedicationIntake::new(stage.id.as_str(), quantity.trim()),
        None => MedicationIntake::new(stage.id.as_str(), dose.trim()),
    };
    Ok(intake)
}

fn parse_end_date(value: &str) -> Result<Option<NaiveDate>, String> {
    match value.trim() {
        "" | "none" => Ok(None),
        other => parse_date(other).map(Some),
    }
}

fn check_period(fields: &MedicationFields) -> Result<(), String> {
    match fields.end_date {
        Some(end) if end < fields.start_date => Err(format!(
            "End date {} is before start date {}",
            end, fields.start_date
        )),
        _ => Ok(()),
    }
}

fn format_period(med: &Medication) -> String {
    match med.end_date {
        Some(end) => format!("{} - {}", med.start_date, end),
        None => format!("from {}", med.start_date),
    }
}

fn print_details(data: &AppData, med: &Medication) {
    println!("  Name:   {}", med.name);
    println!("  Period: {}", format_period(med));
    if med.has_uniform_dose(data.stages.len()) {
        if let Some(first) = med.intakes.first() {
            print!("  Dose:   {} at every stage", first.quantity);
            if let Some(rec) = &first.recommendations {
                print!(" ({})", rec);
            }
            println!();
        }
    } else if !med.intakes.is_empty() {
        println!("  Doses:");
        for intake in med.intakes.iter().filter(|i| i.has_dosage()) {
            let stage = data
                .stage(&intake.stage_id)
                .map(|s| s.name.as_str())
                .unwrap_or("(deleted stage)");
            print!("    - {}: {}", stage, intake.quantity);
            if let Some(rec) = &intake.recommendations {
                print!(" ({})", rec);
            }
            println!();
        }
    }
    println!();
    println!("Medication ID: {}", med.id);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_parse_intake_by_stage_name() {
        let data = AppData::default();
        let intake = parse_intake(&data, "Before lunch=2 tablets;after a glass of water").unwrap();
        assert_eq!(intake.stage_id, "3");
        assert_eq!(intake.quantity, "2 tablets");
        assert_eq!(
            intake.recommendations.as_deref(),
            Some("after a glass of water")
        );
    }

    #[test]
    fn test_parse_intake_without_recommendations() {
        let data = AppData::default();
        let intake = parse_intake(&data, "7=1 capsule").unwrap();
        assert_eq!(intake.stage_id, "7");
        assert_eq!(intake.recommendations, None);

        let intake = parse_intake(&data, "7=1 capsule; ").unwrap();
        assert_eq!(intake.recommendations, None);
    }

    #[test]
    fn test_parse_intake_errors() {
        let data = AppData::default();
        assert!(parse_intake(&data, "1 tablet").is_err());
        assert!(parse_intake(&data, "brunch=1").is_err());
    }

    #[test]
    fn test_dose_args_uniform() {
        let data = AppData::default();
        let args = DoseArgs {
            intakes: Vec::new(),
            all: Some("5 ml".to_string()),
            note: Some("shake well".to_string()),
        };
        let fields = args
            .apply(&data, MedicationFields::new("Syrup", date(1)))
            .unwrap();
        assert_eq!(fields.intakes.len(), 7);
        let med = Medication::from_fields("m", 1, fields);
        assert!(med.has_uniform_dose(7));
    }

    #[test]
    fn test_dose_args_replace_previous_intakes() {
        let data = AppData::default();
        let existing = MedicationFields::new("Iron", date(1))
            .with_intake(MedicationIntake::new("1", "1 tablet"));
        let args = DoseArgs {
            intakes: vec!["5=2 tablets".to_string(), "5=3 tablets".to_string()],
            ..DoseArgs::default()
        };
        let fields = args.apply(&data, existing).unwrap();
        assert_eq!(fields.intakes, vec![MedicationIntake::new("5", "3 tablets")]);
    }

    #[test]
    fn test_parse_end_date() {
        assert_eq!(parse_end_date("none").unwrap(), None);
        assert_eq!(parse_end_date("2024-01-05").unwrap(), Some(date(5)));
        assert!(parse_end_date("soon").is_err());
    }

    #[test]
    fn test_check_period() {
        let fields = MedicationFields::new("X", date(10));
        assert!(check_period(&fields.clone().with_end_date(date(10))).is_ok());
        assert!(check_period(&fields.clone().with_end_date(date(9))).is_err());
        assert!(check_period(&fields).is_ok());
    }
}
