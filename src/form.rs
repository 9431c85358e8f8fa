//! New-entry form state and validation.

use thiserror::Error;

use crate::entry::{NewWorkout, WorkoutType};

/// Why a form submission was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("user name is required")]
    MissingUserName,
    #[error("workout type is required")]
    MissingWorkoutType,
    #[error("workout minutes are required")]
    MissingMinutes,
    #[error("workout minutes must be a whole number, got {0:?}")]
    InvalidMinutes(String),
}

/// Form field with input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    UserName,
    WorkoutType,
    Minutes,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::UserName => FormField::WorkoutType,
            FormField::WorkoutType => FormField::Minutes,
            FormField::Minutes => FormField::UserName,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::UserName => FormField::Minutes,
            FormField::WorkoutType => FormField::UserName,
            FormField::Minutes => FormField::WorkoutType,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EntryForm {
    pub user_name: String,
    pub workout_type: Option<WorkoutType>,
    pub minutes: String,
    pub focus: FormField,
}

impl EntryForm {
    /// Type a character into the focused text field.
    /// The minutes field only takes digits.
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormField::UserName => self.user_name.push(c),
            FormField::Minutes if c.is_ascii_digit() => self.minutes.push(c),
            _ => {}
        }
    }

    pub fn pop_char(&mut self) {
        match self.focus {
            FormField::UserName => {
                self.user_name.pop();
            }
            FormField::Minutes => {
                self.minutes.pop();
            }
            FormField::WorkoutType => self.workout_type = None,
        }
    }

    pub fn next_type(&mut self) {
        self.workout_type = Some(self.workout_type.map_or(WorkoutType::ALL[0], WorkoutType::next));
    }

    pub fn previous_type(&mut self) {
        self.workout_type = Some(
            self.workout_type
                .map_or(WorkoutType::ALL[WorkoutType::ALL.len() - 1], WorkoutType::previous),
        );
    }

    /// Check required fields and build the candidate entry
    pub fn validate(&self) -> Result<NewWorkout, FormError> {
        let user_name = self.user_name.trim();
        if user_name.is_empty() {
            return Err(FormError::MissingUserName);
        }

        let workout_type = self.workout_type.ok_or(FormError::MissingWorkoutType)?;

        let minutes = self.minutes.trim();
        if minutes.is_empty() {
            return Err(FormError::MissingMinutes);
        }
        let workout_minutes = minutes
            .parse::<u32>()
            .map_err(|_| FormError::InvalidMinutes(minutes.to_string()))?;

        Ok(NewWorkout::new(user_name, workout_type, workout_minutes))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EntryForm {
        EntryForm {
            user_name: "  Alice ".to_string(),
            workout_type: Some(WorkoutType::Yoga),
            minutes: "40".to_string(),
            focus: FormField::Minutes,
        }
    }

    #[test]
    fn test_validate_trims_name() {
        let candidate = filled().validate().unwrap();
        assert_eq!(candidate, NewWorkout::new("Alice", WorkoutType::Yoga, 40));
    }

    #[test]
    fn test_required_fields() {
        let mut form = filled();
        form.user_name = "   ".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingUserName));

        let mut form = filled();
        form.workout_type = None;
        assert_eq!(form.validate(), Err(FormError::MissingWorkoutType));

        let mut form = filled();
        form.minutes.clear();
        assert_eq!(form.validate(), Err(FormError::MissingMinutes));
    }

    #[test]
    fn test_minutes_overflow_rejected() {
        let mut form = filled();
        form.minutes = "99999999999".to_string();
        assert!(matches!(form.validate(), Err(FormError::InvalidMinutes(_))));
    }

    #[test]
    fn test_minutes_accept_digits_only() {
        let mut form = EntryForm {
            focus: FormField::Minutes,
            ..Default::default()
        };
        for c in "4a5-".chars() {
            form.push_char(c);
        }
        assert_eq!(form.minutes, "45");
        form.pop_char();
        assert_eq!(form.minutes, "4");
    }

    #[test]
    fn test_type_selection_cycles() {
        let mut form = EntryForm::default();
        form.next_type();
        assert_eq!(form.workout_type, Some(WorkoutType::Running));
        form.previous_type();
        assert_eq!(form.workout_type, Some(WorkoutType::MartialArts));

        form.focus = FormField::WorkoutType;
        form.pop_char();
        assert_eq!(form.workout_type, None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut form = filled();
        form.reset();
        assert!(form.user_name.is_empty());
        assert!(form.minutes.is_empty());
        assert_eq!(form.workout_type, None);
        assert_eq!(form.focus, FormField::UserName);
    }
}
