/// Per-day completion index
///
/// Maps each date to the ids of the habits completed that day. Entries are
/// created lazily by `toggle`; a date with an empty list means the same as a
/// date with no entry at all.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::HabitId;

/// Date → completed habit ids, stored as `{"2024-01-01": [1, 2]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionIndex(BTreeMap<NaiveDate, Vec<HabitId>>);

impl CompletionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids completed on `date`, empty when the date has no entry
    pub fn completed_on(&self, date: NaiveDate) -> &[HabitId] {
        self.0.get(&date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_completed(&self, date: NaiveDate, habit_id: HabitId) -> bool {
        self.completed_on(date).contains(&habit_id)
    }

    /// Flip completion of `habit_id` on `date`
    ///
    /// Returns whether the habit is completed after the flip.
    pub fn toggle(&mut self, date: NaiveDate, habit_id: HabitId) -> bool {
        let ids = self.0.entry(date).or_default();
        if ids.contains(&habit_id) {
            ids.retain(|id| *id != habit_id);
            false
        } else {
            ids.push(habit_id);
            true
        }
    }

    /// Remove `habit_id` from every date
    ///
    /// Returns true if any entry changed.
    pub fn remove_habit(&mut self, habit_id: HabitId) -> bool {
        let mut changed = false;
        for ids in self.0.values_mut() {
            let before = ids.len();
            ids.retain(|id| *id != habit_id);
            changed |= ids.len() != before;
        }
        changed
    }

    /// Whether `habit_id` appears on any date
    pub fn references(&self, habit_id: HabitId) -> bool {
        self.0.values().any(|ids| ids.contains(&habit_id))
    }

    /// Largest id mentioned anywhere in the index
    pub fn highest_id(&self) -> Option<HabitId> {
        self.0.values().flatten().copied().max()
    }

    /// Dates that have an entry, in calendar order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.keys().copied()
    }
}
