//! View model tying the entry store to the filtered view and chart selection.
//!
//! Every mutating call recomputes the derived state before returning, so a
//! renderer can read `page()`, `current_page()`, `total_pages()` and
//! `chart()` at any time without triggering work of its own.

use crate::entry::{NewWorkout, WorkoutEntry, WorkoutType};
use crate::stats;
use crate::storage::KeyValueStore;
use crate::store::{AddOutcome, EntryStore};
use crate::view::EntryView;

/// Minutes per workout type for the selected user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChart {
    pub user_name: String,
    pub minutes_by_type: Vec<(WorkoutType, u64)>,
}

pub struct Tracker<S> {
    store: EntryStore<S>,
    view: EntryView,
    selected_user: Option<String>,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn open(storage: S, key: &str, items_per_page: usize) -> Self {
        let store = EntryStore::open(storage, key);
        let mut view = EntryView::new(items_per_page);
        view.apply(store.entries());
        Self {
            store,
            view,
            selected_user: None,
        }
    }

    /// All entries, unfiltered
    pub fn entries(&self) -> &[WorkoutEntry] {
        self.store.entries()
    }

    pub fn view(&self) -> &EntryView {
        &self.view
    }

    /// Entries on the current page
    pub fn page(&self) -> Vec<&WorkoutEntry> {
        self.view.page(self.store.entries())
    }

    pub fn current_page(&self) -> usize {
        self.view.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.view.total_pages()
    }

    /// Add a new entry and select its user for the chart.
    /// Duplicates leave everything untouched.
    pub fn submit(&mut self, candidate: NewWorkout) -> AddOutcome {
        let user_name = candidate.user_name.clone();
        let outcome = self.store.add(candidate);
        if let AddOutcome::Added(ref id) = outcome {
            tracing::info!("Added workout {} for {}", id, user_name);
            self.view.refresh(self.store.entries());
            self.selected_user = Some(user_name);
        }
        outcome
    }

    pub fn delete(&mut self, id: &str) -> bool {
        if !self.store.delete(id) {
            return false;
        }
        tracing::info!("Deleted workout {}", id);
        self.view.refresh(self.store.entries());

        let orphaned = self
            .selected_user
            .as_deref()
            .is_some_and(|user| stats::count_for_user(self.store.entries(), user) == 0);
        if orphaned {
            self.selected_user = None;
        }
        true
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.view.set_search_term(term, self.store.entries());
    }

    pub fn set_type_filter(&mut self, type_filter: Option<WorkoutType>) {
        self.view.set_type_filter(type_filter, self.store.entries());
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.view.set_items_per_page(items_per_page, self.store.entries());
    }

    pub fn change_page(&mut self, delta: isize) -> bool {
        self.view.change_page(delta)
    }

    pub fn count_for_user(&self, user_name: &str) -> usize {
        stats::count_for_user(self.store.entries(), user_name)
    }

    pub fn total_minutes_for_user(&self, user_name: &str) -> u64 {
        stats::total_minutes_for_user(self.store.entries(), user_name)
    }

    pub fn unique_users(&self) -> Vec<String> {
        stats::unique_users(self.store.entries())
    }

    pub fn select_user(&mut self, user_name: Option<String>) {
        tracing::debug!("Selected user: {:?}", user_name);
        self.selected_user = user_name;
    }

    pub fn selected_user(&self) -> Option<&str> {
        self.selected_user.as_deref()
    }

    /// Chart data for the selected user, if any
    pub fn chart(&self) -> Option<UserChart> {
        let user_name = self.selected_user.as_ref()?;
        Some(UserChart {
            user_name: user_name.clone(),
            minutes_by_type: stats::minutes_by_type(self.store.entries(), user_name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::store::DEFAULT_STORAGE_KEY;

    fn tracker(per_page: usize) -> Tracker<MemoryStorage> {
        Tracker::open(MemoryStorage::new(), DEFAULT_STORAGE_KEY, per_page)
    }

    #[test]
    fn test_open_builds_view() {
        let t = tracker(5);
        assert_eq!(t.entries().len(), 6);
        assert_eq!(t.total_pages(), 2);
        assert_eq!(t.page().len(), 5);
        assert_eq!(t.current_page(), 1);
    }

    #[test]
    fn test_sample_aggregates() {
        let t = tracker(5);
        assert_eq!(t.count_for_user("John Doe"), 2);
        assert_eq!(t.total_minutes_for_user("John Doe"), 75);
        assert_eq!(t.count_for_user("Nonexistent"), 0);
        assert_eq!(t.total_minutes_for_user("Nonexistent"), 0);
        assert_eq!(t.unique_users(), vec!["John Doe", "Jane Smith", "Mike Johnson"]);
    }

    #[test]
    fn test_aggregates_ignore_filters() {
        let mut t = tracker(5);
        t.set_search_term("jane");
        assert_eq!(t.view().filtered_count(), 2);
        assert_eq!(t.count_for_user("John Doe"), 2);
        assert_eq!(t.unique_users().len(), 3);
    }

    #[test]
    fn test_submit_updates_view_and_selection() {
        let mut t = tracker(5);
        let outcome = t.submit(NewWorkout::new("Alice", WorkoutType::Dance, 35));
        assert!(matches!(outcome, AddOutcome::Added(_)));

        assert_eq!(t.view().filtered_count(), 7);
        assert_eq!(t.total_pages(), 2);
        assert_eq!(t.selected_user(), Some("Alice"));

        let chart = t.chart().unwrap();
        assert_eq!(chart.minutes_by_type, vec![(WorkoutType::Dance, 35)]);
    }

    #[test]
    fn test_duplicate_submit_keeps_selection() {
        let mut t = tracker(5);
        t.select_user(Some("Jane Smith".to_string()));
        let outcome = t.submit(NewWorkout::new("John Doe", WorkoutType::Running, 30));
        assert_eq!(outcome, AddOutcome::Duplicate);
        assert_eq!(t.selected_user(), Some("Jane Smith"));
        assert_eq!(t.entries().len(), 6);
    }

    #[test]
    fn test_delete_last_entry_of_selected_user() {
        let mut t = tracker(5);
        t.submit(NewWorkout::new("Alice", WorkoutType::Yoga, 10));
        let id = t.entries().last().unwrap().id.clone();

        assert!(t.delete(&id));
        assert_eq!(t.selected_user(), None);
        assert!(t.chart().is_none());
        assert!(!t.delete(&id));
    }

    #[test]
    fn test_delete_keeps_page_when_possible() {
        let mut t = tracker(2);
        assert!(t.change_page(2));
        assert_eq!(t.current_page(), 3);

        let first = t.entries()[0].id.clone();
        t.delete(&first);
        assert_eq!(t.total_pages(), 3);
        assert_eq!(t.current_page(), 3);
        assert_eq!(t.page().len(), 1);

        let second = t.entries()[0].id.clone();
        t.delete(&second);
        assert_eq!(t.total_pages(), 2);
        assert_eq!(t.current_page(), 2);
    }

    #[test]
    fn test_chart_for_sample_user() {
        let mut t = tracker(5);
        assert!(t.chart().is_none());

        t.select_user(Some("John Doe".to_string()));
        let chart = t.chart().unwrap();
        assert_eq!(chart.user_name, "John Doe");
        assert_eq!(
            chart.minutes_by_type,
            vec![(WorkoutType::Running, 30), (WorkoutType::Cycling, 45)]
        );
    }

    #[test]
    fn test_page_navigation_scenario() {
        let mut t = tracker(1);
        assert_eq!(t.total_pages(), 6);
        assert!(!t.change_page(-1));
        assert_eq!(t.current_page(), 1);
        assert!(t.change_page(1));
        assert_eq!(t.current_page(), 2);
    }
}
