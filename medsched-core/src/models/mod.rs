mod app_data;
pub(crate) mod date_format;
mod lenient;
mod medication;
mod record;
mod stage;

pub use app_data::AppData;
pub use medication::{Medication, MedicationFields, MedicationIntake};
pub use record::IntakeRecord;
pub use stage::{default_stages, IntakeStage};

/// Generates a fresh opaque identifier for a stage, medication or record.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
