//! Document mutations.
//!
//! Each function takes the current document by reference and returns the
//! next one. Inputs are never modified, so several mutations can be chained
//! before a single save. Unknown ids are silently ignored.

mod medications;
mod records;
mod stages;

pub use medications::{
    add_medication, delete_medication, move_medication, reorder_medications, update_medication,
};
pub use records::{get_intake_record, toggle_all_stages, toggle_intake_record};
pub use stages::{add_stage, delete_stage, move_stage, reorder_stages, update_stage};

/// Next order value after everything in `orders`, starting at 1.
/// Saturates at `i64::MAX`.
fn next_order(orders: impl Iterator<Item = i64>) -> i64 {
    orders.fold(0, i64::max).saturating_add(1)
}

/// Moves the item at `from` to `to`, drag-and-drop style.
///
/// Returns `None` when either index is out of range.
fn move_item<T>(mut items: Vec<T>, from: usize, to: usize) -> Option<Vec<T>> {
    if from >= items.len() || to >= items.len() {
        return None;
    }
    let item = items.remove(from);
    items.insert(to, item);
    Some(items)
}
