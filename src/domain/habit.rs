/// Habit entity and its stop/resume lifecycle
///
/// This module defines the core Habit struct that represents something the
/// user tracks day by day, along with name normalization and the rule that
/// decides whether a habit is stopped on a given date.

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::{HabitId, ValidationError};

/// A habit the user wants to do every day
///
/// Field names are serialized in camelCase so stored blobs look like
/// `{"id":1,"name":"Exercise","createdDate":"2024-01-01","resumeDate":null}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Unique identifier, never reassigned
    pub id: HabitId,
    /// Display name, stored trimmed
    pub name: String,
    /// Day on which the habit became trackable
    pub created_date: NaiveDate,
    /// Day tracking was paused, if it ever was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_date: Option<NaiveDate>,
    /// Day tracking resumed; `None` is the cleared marker written on stop
    #[serde(default)]
    pub resume_date: Option<NaiveDate>,
}

impl Habit {
    /// Create a new habit with a validated name
    ///
    /// The name is trimmed before it is stored. Uniqueness is not checked
    /// here because it depends on the rest of the collection.
    pub fn new(id: HabitId, name: &str, created_date: NaiveDate) -> Result<Self, ValidationError> {
        let name = Self::normalize_name(name)?;

        Ok(Self {
            id,
            name: name.to_string(),
            created_date,
            stop_date: None,
            resume_date: None,
        })
    }

    /// Trim a candidate name, rejecting names that are blank
    pub fn normalize_name(name: &str) -> Result<&str, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        Ok(trimmed)
    }

    /// Case- and whitespace-insensitive name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.trim().to_lowercase() == name.trim().to_lowercase()
    }

    /// Whether the habit existed on `date`
    pub fn is_trackable_on(&self, date: NaiveDate) -> bool {
        self.created_date <= date
    }

    /// Whether tracking is paused on `date`
    ///
    /// A date is stopped when it falls on or after the stop date and before
    /// the resume date (if any).
    pub fn is_stopped_on(&self, date: NaiveDate) -> bool {
        let Some(stop_date) = self.stop_date else {
            return false;
        };
        if let Some(resume_date) = self.resume_date {
            if date >= resume_date {
                return false;
            }
        }
        date >= stop_date
    }

    /// Pause tracking from `date` onwards, clearing any earlier resume
    pub fn stop(&mut self, date: NaiveDate) {
        self.stop_date = Some(date);
        self.resume_date = None;
    }

    /// Resume tracking from `date` onwards
    pub fn resume(&mut self, date: NaiveDate) {
        self.resume_date = Some(date);
    }
}
