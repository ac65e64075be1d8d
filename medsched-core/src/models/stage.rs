use serde::{Deserialize, Serialize};
use std::fmt;

/// A named time slot within a day (e.g. "Before breakfast").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntakeStage {
    pub id: String,
    pub name: String,
    pub order: i64,
}

impl IntakeStage {
    pub fn new(id: impl Into<String>, name: impl Into<String>, order: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            order,
        }
    }
}

impl fmt::Display for IntakeStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const DEFAULT_STAGE_NAMES: [&str; 7] = [
    "Before breakfast",
    "During breakfast",
    "Before lunch",
    "During lunch",
    "Before dinner",
    "During dinner",
    "At night",
];

/// The seed stages of a fresh document: ids "1".."7", orders 1..7.
pub fn default_stages() -> Vec<IntakeStage> {
    DEFAULT_STAGE_NAMES
        .iter()
        .zip(1..)
        .map(|(name, n)| IntakeStage::new(n.to_string(), *name, n))
        .collect()
}
