//! Workout entry data model.
//!
//! Entries are persisted as a JSON array of objects with camelCase keys:
//!
//! ```text
//! [{"id":"…","userName":"John Doe","workoutType":"Running","workoutMinutes":30}]
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Workout category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutType {
    Running,
    Walking,
    Cycling,
    Swimming,
    Weightlifting,
    Yoga,
    Pilates,
    #[serde(rename = "HIIT")]
    Hiit,
    Dance,
    #[serde(rename = "Martial Arts")]
    MartialArts,
}

impl WorkoutType {
    /// All categories in display order
    pub const ALL: [WorkoutType; 10] = [
        WorkoutType::Running,
        WorkoutType::Walking,
        WorkoutType::Cycling,
        WorkoutType::Swimming,
        WorkoutType::Weightlifting,
        WorkoutType::Yoga,
        WorkoutType::Pilates,
        WorkoutType::Hiit,
        WorkoutType::Dance,
        WorkoutType::MartialArts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkoutType::Running => "Running",
            WorkoutType::Walking => "Walking",
            WorkoutType::Cycling => "Cycling",
            WorkoutType::Swimming => "Swimming",
            WorkoutType::Weightlifting => "Weightlifting",
            WorkoutType::Yoga => "Yoga",
            WorkoutType::Pilates => "Pilates",
            WorkoutType::Hiit => "HIIT",
            WorkoutType::Dance => "Dance",
            WorkoutType::MartialArts => "Martial Arts",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// Next category, wrapping around
    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    /// Previous category, wrapping around
    pub fn previous(self) -> Self {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }

    /// Cycle an optional selection: `None → first → … → last → None`
    pub fn cycle_next(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::ALL[0]),
            Some(t) if t.position() + 1 == Self::ALL.len() => None,
            Some(t) => Some(t.next()),
        }
    }

    /// Reverse of [`WorkoutType::cycle_next`]
    pub fn cycle_previous(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::ALL[Self::ALL.len() - 1]),
            Some(t) if t.position() == 0 => None,
            Some(t) => Some(t.previous()),
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for WorkoutType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or(())
    }
}

/// One recorded workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub id: String,
    pub user_name: String,
    pub workout_type: WorkoutType,
    pub workout_minutes: u32,
}

impl WorkoutEntry {
    /// True if this entry records the same (user, type, minutes) as `candidate`.
    /// The id is not compared and the user name must match exactly.
    pub fn matches(&self, candidate: &NewWorkout) -> bool {
        self.user_name == candidate.user_name
            && self.workout_type == candidate.workout_type
            && self.workout_minutes == candidate.workout_minutes
    }
}

/// A workout submitted for insertion, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkout {
    pub user_name: String,
    pub workout_type: WorkoutType,
    pub workout_minutes: u32,
}

impl NewWorkout {
    pub fn new(user_name: impl Into<String>, workout_type: WorkoutType, workout_minutes: u32) -> Self {
        Self {
            user_name: user_name.into(),
            workout_type,
            workout_minutes,
        }
    }

    pub(crate) fn with_id(self, id: String) -> WorkoutEntry {
        WorkoutEntry {
            id,
            user_name: self.user_name,
            workout_type: self.workout_type,
            workout_minutes: self.workout_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_field_names() {
        let entry = NewWorkout::new("John Doe", WorkoutType::MartialArts, 30).with_id("abc".into());
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"id":"abc","userName":"John Doe","workoutType":"Martial Arts","workoutMinutes":30}"#
        );
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = r#"[{"id":"1","userName":"A","workoutType":"Curling","workoutMinutes":5}]"#;
        assert!(serde_json::from_str::<Vec<WorkoutEntry>>(json).is_err());
    }

    #[test]
    fn test_from_str_ignores_case() {
        assert_eq!("hiit".parse::<WorkoutType>(), Ok(WorkoutType::Hiit));
        assert_eq!("martial arts".parse::<WorkoutType>(), Ok(WorkoutType::MartialArts));
        assert_eq!("Curling".parse::<WorkoutType>(), Err(()));
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(WorkoutType::MartialArts.next(), WorkoutType::Running);
        assert_eq!(WorkoutType::Running.previous(), WorkoutType::MartialArts);

        assert_eq!(WorkoutType::cycle_next(None), Some(WorkoutType::Running));
        assert_eq!(WorkoutType::cycle_next(Some(WorkoutType::MartialArts)), None);
        assert_eq!(WorkoutType::cycle_previous(None), Some(WorkoutType::MartialArts));
        assert_eq!(WorkoutType::cycle_previous(Some(WorkoutType::Running)), None);
    }

    #[test]
    fn test_matches_ignores_id() {
        let entry = NewWorkout::new("Jane", WorkoutType::Yoga, 20).with_id("x".into());
        assert!(entry.matches(&NewWorkout::new("Jane", WorkoutType::Yoga, 20)));
        assert!(!entry.matches(&NewWorkout::new("jane", WorkoutType::Yoga, 20)));
        assert!(!entry.matches(&NewWorkout::new("Jane", WorkoutType::Yoga, 21)));
    }
}
