/// Core identifier types used throughout the domain layer

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Unique identifier for a habit
/// 
/// Stored as a plain integer (a millisecond timestamp taken at creation) so
/// the persisted JSON stays `{"id": 1704067200000, ...}`. The wrapper keeps
/// habit ids from being confused with other integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(pub i64);

impl HabitId {
    /// Generate a fresh id from the current timestamp
    /// 
    /// The id is strictly greater than `highest`, so two habits created in
    /// the same millisecond (or after a clock step backwards) never collide
    /// with an id already handed out. When `highest` is already `i64::MAX`
    /// the smallest positive id for which `in_use` is false is returned.
    pub fn generate(highest: Option<HabitId>, in_use: impl Fn(HabitId) -> bool) -> Self {
        let now = Utc::now().timestamp_millis();
        match highest {
            Some(HabitId(max)) if max >= now => match max.checked_add(1) {
                Some(next) => Self(next),
                None => (1..).map(Self).find(|id| !in_use(*id)).unwrap_or(Self(now)),
            },
            _ => Self(now),
        }
    }
    
    /// Create a habit ID from a string (useful for parsing user input)
    pub fn from_string(s: &str) -> Result<Self, ParseIntError> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HabitId {
    type Err = ParseIntError;
    
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn test_generate_is_past_highest() {
        let far_future = HabitId(i64::MAX - 10);
        assert_eq!(HabitId::generate(Some(far_future), |_| false), HabitId(i64::MAX - 9));
        
        let fresh = HabitId::generate(Some(HabitId(1)), |_| false);
        assert!(fresh > HabitId(1));
    }
    
    #[test]
    fn test_generate_at_max_reuses_smallest_free_id() {
        let taken = [HabitId(1), HabitId(2), HabitId(i64::MAX)];
        let id = HabitId::generate(Some(HabitId(i64::MAX)), |id| taken.contains(&id));
        assert_eq!(id, HabitId(3));
    }
    
    #[test]
    fn test_parse_habit_id() {
        assert_eq!(HabitId::from_string(" 42 ").unwrap(), HabitId(42));
        assert!("abc".parse::<HabitId>().is_err());
        assert_eq!(HabitId(7).to_string(), "7");
    }
    
    #[test]
    fn test_serializes_as_plain_integer() {
        let json = serde_json::to_string(&HabitId(1704067200000)).unwrap();
        assert_eq!(json, "1704067200000");
    }
}
