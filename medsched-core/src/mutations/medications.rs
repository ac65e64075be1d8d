use crate::models::{new_id, AppData, Medication, MedicationFields};
use crate::schedule::sorted_medications;

use super::{move_item, next_order};

/// Appends a medication with a fresh id, ordered after every existing one.
pub fn add_medication(data: &AppData, fields: MedicationFields) -> AppData {
    let order = next_order(data.medications.iter().map(|m| m.order));
    let mut next = data.clone();
    next.medications
        .push(Medication::from_fields(new_id(), order, fields));
    next
}

/// Replaces every field of the matching medication except `id` and `order`.
pub fn update_medication(data: &AppData, medication_id: &str, fields: MedicationFields) -> AppData {
    let mut next = data.clone();
    if let Some(medication) = next.medications.iter_mut().find(|m| m.id == medication_id) {
        *medication = Medication::from_fields(medication_id, medication.order, fields);
    }
    next
}

/// Removes the medication and every record that references it.
pub fn delete_medication(data: &AppData, medication_id: &str) -> AppData {
    let mut next = data.clone();
    next.medications.retain(|m| m.id != medication_id);
    next.records.retain(|r| r.medication_id != medication_id);

    tracing::debug!(
        "Deleted medication {}: {} record(s) removed",
        medication_id,
        data.records.len() - next.records.len()
    );
    next
}

/// Replaces the medication list with `medications`, renumbering `order`
/// from 1. Membership is not checked.
pub fn reorder_medications(data: &AppData, medications: Vec<Medication>) -> AppData {
    let mut next = data.clone();
    next.medications = medications
        .into_iter()
        .zip(1..)
        .map(|(medication, order)| Medication { order, ..medication })
        .collect();
    next
}

/// Moves the medication at display position `from` to `to` (0-based) and
/// renumbers. Out-of-range positions leave the document as is.
pub fn move_medication(data: &AppData, from: usize, to: usize) -> AppData {
    let sorted = sorted_medications(data).into_iter().cloned().collect();
    match move_item(sorted, from, to) {
        Some(medications) => reorder_medications(data, medications),
        None => data.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IntakeRecord, MedicationIntake};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn fields(name: &str) -> MedicationFields {
        MedicationFields::new(name, date(1)).with_intake(MedicationIntake::new("1", "1 tablet"))
    }

    fn three_medications() -> AppData {
        let data = add_medication(&AppData::default(), fields("A"));
        let data = add_medication(&data, fields("B"));
        add_medication(&data, fields("C"))
    }

    #[test]
    fn test_add_medication_assigns_id_and_order() {
        let data = AppData::default();
        let next = add_medication(&data, fields("Vitamin D"));

        assert!(data.medications.is_empty());
        let med = &next.medications[0];
        assert_eq!(med.order, 1);
        assert!(!med.id.is_empty());
        assert_eq!(med.fields(), fields("Vitamin D"));
    }

    #[test]
    fn test_add_medication_orders_after_max() {
        let mut data = three_medications();
        data.medications[1].order = 12;
        let next = add_medication(&data, fields("D"));
        assert_eq!(next.medications[3].order, 13);
    }

    #[test]
    fn test_update_preserves_id_and_order() {
        let data = three_medications();
        let target = data.medications[1].clone();
        let replacement = MedicationFields::new("B forte", date(5))
            .with_end_date(date(25))
            .with_intake(MedicationIntake::new("4", "2 drops").with_recommendations("in water"));

        let next = update_medication(&data, &target.id, replacement.clone());
        let updated = next.medication(&target.id).unwrap();

        assert_eq!(updated.id, target.id);
        assert_eq!(updated.order, target.order);
        assert_eq!(updated.fields(), replacement);
        assert_eq!(data.medications[1], target);
    }

    #[test]
    fn test_update_unknown_medication_is_noop() {
        let data = three_medications();
        assert_eq!(update_medication(&data, "missing", fields("Z")), data);
    }

    #[test]
    fn test_delete_medication_cascades_to_its_records_only() {
        let data = three_medications();
        let a = data.medications[0].id.clone();
        let b = data.medications[1].id.clone();
        let mut data = data;
        data.records.push(IntakeRecord::new(a.clone(), "1", date(1)));
        data.records.push(IntakeRecord::new(a.clone(), "1", date(2)));
        data.records.push(IntakeRecord::new(b.clone(), "1", date(1)));

        let next = delete_medication(&data, &a);

        assert!(next.medication(&a).is_none());
        assert_eq!(next.medications.len(), 2);
        assert_eq!(next.records.len(), 1);
        assert_eq!(next.records[0].medication_id, b);
    }

    #[test]
    fn test_delete_unknown_medication_is_noop() {
        let data = three_medications();
        assert_eq!(delete_medication(&data, "missing"), data);
    }

    #[test]
    fn test_reorder_medications() {
        let data = three_medications();
        let mut permuted = data.medications.clone();
        permuted.rotate_left(1);

        let next = reorder_medications(&data, permuted);

        let names: Vec<_> = next.medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);
        let orders: Vec<_> = next.medications.iter().map(|m| m.order).collect();
        assert_eq!(orders, [1, 2, 3]);
    }

    #[test]
    fn test_move_medication() {
        let data = three_medications();
        let next = move_medication(&data, 0, 2);

        let names: Vec<_> = next.medications.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["B", "C", "A"]);
        assert_eq!(next.medications[2].order, 3);
        assert_eq!(move_medication(&data, 0, 3), data);
    }
}
