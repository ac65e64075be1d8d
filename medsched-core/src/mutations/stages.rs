use crate::models::{new_id, AppData, IntakeStage};
use crate::schedule::sorted_stages;

use super::{move_item, next_order};

/// Appends a stage ordered after every existing one.
pub fn add_stage(data: &AppData, name: impl Into<String>) -> AppData {
    let order = next_order(data.stages.iter().map(|s| s.order));
    let mut next = data.clone();
    next.stages.push(IntakeStage::new(new_id(), name, order));
    next
}

/// Renames the matching stage.
pub fn update_stage(data: &AppData, stage_id: &str, name: impl Into<String>) -> AppData {
    let mut next = data.clone();
    if let Some(stage) = next.stages.iter_mut().find(|s| s.id == stage_id) {
        stage.name = name.into();
    }
    next
}

/// Removes the stage along with every intake and record that references it.
pub fn delete_stage(data: &AppData, stage_id: &str) -> AppData {
    let mut next = data.clone();
    next.stages.retain(|s| s.id != stage_id);
    for medication in &mut next.medications {
        medication.intakes.retain(|i| i.stage_id != stage_id);
    }
    next.records.retain(|r| r.stage_id != stage_id);

    tracing::debug!(
        "Deleted stage {}: {} record(s) removed",
        stage_id,
        data.records.len() - next.records.len()
    );
    next
}

/// Replaces the stage list with `stages`, renumbering `order` from 1.
///
/// The sequence is expected to be a permutation of the current stages; this
/// is not checked.
pub fn reorder_stages(data: &AppData, stages: Vec<IntakeStage>) -> AppData {
    let mut next = data.clone();
    next.stages = stages
        .into_iter()
        .zip(1..)
        .map(|(stage, order)| IntakeStage { order, ..stage })
        .collect();
    next
}

/// Moves the stage at display position `from` to position `to` (both
/// 0-based) and renumbers. Out-of-range positions leave the document as is.
pub fn move_stage(data: &AppData, from: usize, to: usize) -> AppData {
    let sorted = sorted_stages(data).into_iter().cloned().collect();
    match move_item(sorted, from, to) {
        Some(stages) => reorder_stages(data, stages),
        None => data.clone(),
    }
}
