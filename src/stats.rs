//! Per-user aggregates over the full (unfiltered) entry list.

use crate::entry::{WorkoutEntry, WorkoutType};

fn for_user<'a>(
    entries: &'a [WorkoutEntry],
    user_name: &'a str,
) -> impl Iterator<Item = &'a WorkoutEntry> + 'a {
    entries.iter().filter(move |e| e.user_name == user_name)
}

/// Number of entries recorded by `user_name` (exact match)
pub fn count_for_user(entries: &[WorkoutEntry], user_name: &str) -> usize {
    for_user(entries, user_name).count()
}

/// Sum of minutes recorded by `user_name`
pub fn total_minutes_for_user(entries: &[WorkoutEntry], user_name: &str) -> u64 {
    for_user(entries, user_name)
        .map(|e| u64::from(e.workout_minutes))
        .sum()
}

/// Distinct user names in first-seen order
pub fn unique_users(entries: &[WorkoutEntry]) -> Vec<String> {
    let mut users: Vec<String> = Vec::new();
    for entry in entries {
        if !users.iter().any(|u| *u == entry.user_name) {
            users.push(entry.user_name.clone());
        }
    }
    users
}

/// Minutes per workout type for one user, types in first-seen order.
/// This is the data behind the per-user bar chart.
pub fn minutes_by_type(entries: &[WorkoutEntry], user_name: &str) -> Vec<(WorkoutType, u64)> {
    let mut totals: Vec<(WorkoutType, u64)> = Vec::new();
    for entry in for_user(entries, user_name) {
        let minutes = u64::from(entry.workout_minutes);
        match totals.iter_mut().find(|(ty, _)| *ty == entry.workout_type) {
            Some((_, total)) => *total += minutes,
            None => totals.push((entry.workout_type, minutes)),
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::NewWorkout;

    fn sample() -> Vec<WorkoutEntry> {
        [
            ("John Doe", WorkoutType::Running, 30),
            ("John Doe", WorkoutType::Cycling, 45),
            ("Jane Smith", WorkoutType::Swimming, 60),
            ("Jane Smith", WorkoutType::Running, 20),
            ("Mike Johnson", WorkoutType::Yoga, 50),
            ("Mike Johnson", WorkoutType::Cycling, 40),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (name, ty, min))| NewWorkout::new(name, ty, min).with_id(i.to_string()))
        .collect()
    }

    #[test]
    fn test_user_aggregates() {
        let entries = sample();
        assert_eq!(count_for_user(&entries, "John Doe"), 2);
        assert_eq!(total_minutes_for_user(&entries, "John Doe"), 75);
    }

    #[test]
    fn test_unknown_user_aggregates() {
        let entries = sample();
        assert_eq!(count_for_user(&entries, "Nonexistent"), 0);
        assert_eq!(total_minutes_for_user(&entries, "Nonexistent"), 0);
        assert!(minutes_by_type(&entries, "Nonexistent").is_empty());
    }

    #[test]
    fn test_user_match_is_exact() {
        let entries = sample();
        assert_eq!(count_for_user(&entries, "john doe"), 0);
    }

    #[test]
    fn test_unique_users_first_seen() {
        let mut entries = sample();
        entries.push(NewWorkout::new("Jane Smith", WorkoutType::Dance, 5).with_id("x".into()));
        assert_eq!(unique_users(&entries), vec!["John Doe", "Jane Smith", "Mike Johnson"]);
        assert!(unique_users(&[]).is_empty());
    }

    #[test]
    fn test_minutes_by_type_sums_repeats() {
        let mut entries = sample();
        entries.push(NewWorkout::new("John Doe", WorkoutType::Running, 15).with_id("x".into()));

        assert_eq!(
            minutes_by_type(&entries, "John Doe"),
            vec![(WorkoutType::Running, 45), (WorkoutType::Cycling, 45)]
        );
    }
}
