use clap::{Args, Subcommand};
use medsched_core::{add_stage, delete_stage, move_stage, sorted_stages, update_stage};

use super::{
    position_index, required_name, resolve_stage, stage_display_index, OutputFormat, Schedule,
};

#[derive(Args)]
pub struct StageCommand {
    #[command(subcommand)]
    pub command: StageSubcommand,
}

#[derive(Subcommand)]
pub enum StageSubcommand {
    /// List intake stages in display order
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a stage after the existing ones
    Add {
        /// Stage name (e.g. "After workout")
        name: String,
    },

    /// Rename a stage
    Rename {
        /// Stage ID or name
        stage: String,

        /// New name
        name: String,
    },

    /// Delete a stage along with its doses and intake marks
    Delete {
        /// Stage ID or name
        stage: String,
    },

    /// Move a stage to a new position (1 = first)
    Move {
        /// Stage ID or name
        stage: String,

        /// Target position
        position: usize,
    },
}

impl StageCommand {
    pub fn run(&self, schedule: &Schedule) -> Result<(), Box<dyn std::error::Error>> {
        let data = schedule.load();

        match &self.command {
            StageSubcommand::List { format } => {
                let stages = sorted_stages(&data);
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&stages)?);
                    }
                    OutputFormat::Text => {
                        for (i, stage) in stages.iter().enumerate() {
                            println!("{:3}. {:24} (id: {})", i + 1, stage.name, stage.id);
                        }
                    }
                }
            }
            StageSubcommand::Add { name } => {
                let name = required_name(name, "Stage")?;
                let next = add_stage(&data, name.as_str());
                schedule.save(&next);

                if let Some(stage) = next.stages.last() {
                    println!("Added stage '{}' (id: {})", stage.name, stage.id);
                }
            }
            StageSubcommand::Rename { stage, name } => {
                let name = required_name(name, "Stage")?;
                let current = resolve_stage(&data, stage)?;
                let next = update_stage(&data, &current.id, name.as_str());
                schedule.save(&next);

                println!("Renamed stage '{}' to '{}'", current.name, name);
            }
            StageSubcommand::Delete { stage } => {
                let current = resolve_stage(&data, stage)?;
                let next = delete_stage(&data, &current.id);
                schedule.save(&next);

                let removed = data.records.len() - next.records.len();
                println!(
                    "Deleted stage '{}' ({} intake mark(s) removed)",
                    current.name, removed
                );
            }
            StageSubcommand::Move { stage, position } => {
                let current = resolve_stage(&data, stage)?;
                let to = position_index(*position, data.stages.len())?;
                let from = stage_display_index(&data, &current.id)
                    .ok_or_else(|| format!("Stage not found: {}", stage))?;
                let next = move_stage(&data, from, to);
                schedule.save(&next);

                println!("Moved stage '{}' to position {}", current.name, position);
            }
        }

        Ok(())
    }
}
