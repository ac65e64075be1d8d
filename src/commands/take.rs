use chrono::Local;
use clap::Args;
use medsched_core::{is_intake_taken, toggle_all_stages, toggle_intake_record};

use super::{parse_date, resolve_medication, resolve_stage, Schedule};

/// Toggle whether a dose was taken
#[derive(Args)]
pub struct TakeCommand {
    /// Medication ID or name
    medication: String,

    /// Stage ID or name; omit to toggle every stage of a uniform dose
    stage: Option<String>,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    date: Option<String>,
}

impl TakeCommand {
    pub fn run(&self, schedule: &Schedule) -> Result<(), Box<dyn std::error::Error>> {
        let data = schedule.load();
        let date = match &self.date {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        };

        let medication = resolve_medication(&data, &self.medication)?;
        if !medication.is_active_on(date) {
            return Err(format!("'{}' is not scheduled on {}", medication.name, date).into());
        }

        match &self.stage {
            Some(stage_ref) => {
                let stage = resolve_stage(&data, stage_ref)?;
                let has_dose = medication
                    .intake_for(&stage.id)
                    .is_some_and(|i| i.has_dosage());
                if !has_dose {
                    return Err(format!(
                        "'{}' has no dose configured for stage '{}'",
                        medication.name, stage.name
                    )
                    .into());
                }

                let next = toggle_intake_record(&data, &medication.id, &stage.id, date);
                schedule.save(&next);

                let state = if is_intake_taken(&next, &medication.id, &stage.id, date) {
                    "taken"
                } else {
                    "not taken"
                };
                println!("{} - {} on {}: {}", medication.name, stage.name, date, state);
            }
            None => {
                if !medication.has_uniform_dose(data.stages.len()) {
                    return Err(format!(
                        "'{}' has different doses per stage; name the stage to toggle",
                        medication.name
                    )
                    .into());
                }

                let next = toggle_all_stages(&data, &medication.id, date);
                schedule.save(&next);

                let all_taken = next
                    .stages
                    .iter()
                    .all(|s| is_intake_taken(&next, &medication.id, &s.id, date));
                let state = if all_taken { "taken" } else { "not taken" };
                println!("{} - all stages on {}: {}", medication.name, date, state);
            }
        }

        Ok(())
    }
}
