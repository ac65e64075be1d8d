//! Medication Schedule Core Library
//!
//! Data model, document mutations and persistence for the medication
//! schedule tracker. Every mutation takes the current [`AppData`] by
//! reference and returns the next one; the caller owns the document and
//! decides when to hand it to a [`DocumentStore`].

pub mod models;
pub mod mutations;
pub mod schedule;
pub mod storage;

pub use models::{
    default_stages, AppData, IntakeRecord, IntakeStage, Medication, MedicationFields,
    MedicationIntake,
};
pub use mutations::{
    add_medication, add_stage, delete_medication, delete_stage, get_intake_record,
    move_medication, move_stage, reorder_medications, reorder_stages, toggle_all_stages,
    toggle_intake_record, update_medication, update_stage,
};
pub use schedule::{
    day_schedule, is_intake_taken, sorted_medications, sorted_stages, DaySchedule,
    ScheduleCell, ScheduleRow,
};
pub use storage::{
    DocumentStore, FileStore, KeyValueStore, MemoryStore, PersistError, StoreError, STORAGE_KEY,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
