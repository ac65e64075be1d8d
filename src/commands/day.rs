use chrono::{Duration, Local};
use clap::Args;
use medsched_core::{day_schedule, DaySchedule, MedicationIntake, ScheduleRow};

use super::{parse_date, OutputFormat, Schedule};

/// Show the intake schedule for a day
#[derive(Args)]
pub struct DayCommand {
    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    date: Option<String>,

    /// Shift the date by this many days (e.g. -1 for the previous day)
    #[arg(long, short, default_value_t = 0, allow_hyphen_values = true)]
    offset: i64,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl DayCommand {
    pub fn run(&self, schedule: &Schedule) -> Result<(), Box<dyn std::error::Error>> {
        let data = schedule.load();
        let base = match &self.date {
            Some(d) => parse_date(d)?,
            None => Local::now().date_naive(),
        };
        let date = base
            .checked_add_signed(Duration::days(self.offset))
            .ok_or_else(|| format!("Date out of range: {} + {} day(s)", base, self.offset))?;

        let day = day_schedule(&data, date);
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&day)?),
            OutputFormat::Text => print!("{}", render_day(&day)),
        }

        Ok(())
    }
}

fn render_day(day: &DaySchedule<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", day.date.format("%A, %Y-%m-%d")));
    out.push_str(&format!("{}\n", "-".repeat(60)));

    if day.rows.is_empty() {
        out.push_str("No medications. Add one with 'meds med add <name>'.\n");
        return out;
    }

    for row in &day.rows {
        render_row(&mut out, row);
    }
    out
}

fn render_row(out: &mut String, row: &ScheduleRow<'_>) {
    let status = if row.active { "" } else { " (not scheduled)" };
    out.push_str(&format!("{}{}\n", row.medication.name, status));

    if row.uniform_dose {
        if let Some(first) = row.medication.intakes.first() {
            let mark = checkbox(row.active, row.all_taken());
            out.push_str(&format!("  {} all stages: {}\n", mark, describe(first)));
        }
        return;
    }

    for cell in &row.cells {
        let Some(intake) = cell.intake.filter(|i| i.has_dosage()) else {
            continue;
        };
        let mark = checkbox(cell.is_checkable(row.active), cell.taken);
        out.push_str(&format!("  {} {}: {}\n", mark, cell.stage.name, describe(intake)));
    }
}

fn checkbox(checkable: bool, taken: bool) -> &'static str {
    match (checkable, taken) {
        (false, _) => "   ",
        (true, true) => "[x]",
        (true, false) => "[ ]",
    }
}

fn describe(intake: &MedicationIntake) -> String {
    match &intake.recommendations {
        Some(rec) if !rec.is_empty() => format!("{} ({})", intake.quantity, rec),
        _ => intake.quantity.clone(),
    }
}
