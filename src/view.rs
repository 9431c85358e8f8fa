//! Filtered and paginated view over the entry list.
//!
//! Pages are 1-based. `total_pages` is never below 1, even with nothing to
//! show, so "Page 1 of 1" is always a valid position.

use std::ops::Range;

use crate::entry::{WorkoutEntry, WorkoutType};

/// Whether `entry` passes the search term and type filter.
/// `needle` must already be lowercased.
fn matches_filters(entry: &WorkoutEntry, needle: &str, type_filter: Option<WorkoutType>) -> bool {
    let name_match = needle.is_empty() || entry.user_name.to_lowercase().contains(needle);
    let type_match = type_filter.map_or(true, |ty| entry.workout_type == ty);
    name_match && type_match
}

fn filter_indices(
    entries: &[WorkoutEntry],
    search_term: &str,
    type_filter: Option<WorkoutType>,
) -> Vec<usize> {
    let needle = search_term.to_lowercase();
    entries
        .iter()
        .enumerate()
        .filter(|(_, e)| matches_filters(e, &needle, type_filter))
        .map(|(i, _)| i)
        .collect()
}

/// Entries whose user name contains `search_term` (case-insensitive) and
/// whose type equals `type_filter` when one is set. Input order is kept.
#[allow(dead_code)] // Public API; `EntryView` keeps indices instead
pub fn apply_filters<'a>(
    entries: &'a [WorkoutEntry],
    search_term: &str,
    type_filter: Option<WorkoutType>,
) -> Vec<&'a WorkoutEntry> {
    filter_indices(entries, search_term, type_filter)
        .into_iter()
        .map(|i| &entries[i])
        .collect()
}

/// `ceil(count / per_page)`, or 1 when either is zero
pub fn total_pages(count: usize, per_page: usize) -> usize {
    if per_page == 0 || count == 0 {
        return 1;
    }
    count.div_ceil(per_page)
}

/// Index range of `page` (1-based) clipped to `len`. Empty when out of range.
fn page_range(len: usize, page: usize, per_page: usize) -> Range<usize> {
    if page == 0 || per_page == 0 {
        return 0..0;
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= len {
        return 0..0;
    }
    let end = start.saturating_add(per_page).min(len);
    start..end
}

/// Slice of `items` shown on `page`
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    &items[page_range(items.len(), page, per_page)]
}

/// Search/type/page state plus the derived filtered list
#[derive(Debug, Clone)]
pub struct EntryView {
    search_term: String,
    type_filter: Option<WorkoutType>,
    items_per_page: usize,
    current_page: usize,
    /// Indices into the source entries that pass the filters
    filtered: Vec<usize>,
    total_pages: usize,
}

impl EntryView {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            search_term: String::new(),
            type_filter: None,
            items_per_page,
            current_page: 1,
            filtered: Vec::new(),
            total_pages: 1,
        }
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn type_filter(&self) -> Option<WorkoutType> {
        self.type_filter
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>, entries: &[WorkoutEntry]) {
        self.search_term = term.into();
        self.apply(entries);
    }

    pub fn set_type_filter(&mut self, type_filter: Option<WorkoutType>, entries: &[WorkoutEntry]) {
        self.type_filter = type_filter;
        self.apply(entries);
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize, entries: &[WorkoutEntry]) {
        self.items_per_page = items_per_page;
        self.apply(entries);
    }

    /// Re-run the filters and go back to page 1
    pub fn apply(&mut self, entries: &[WorkoutEntry]) {
        self.recompute(entries);
        self.current_page = 1;
    }

    /// Re-run the filters after the source list changed, keeping the
    /// current page when it still exists
    pub fn refresh(&mut self, entries: &[WorkoutEntry]) {
        self.recompute(entries);
        self.current_page = self.current_page.clamp(1, self.total_pages);
    }

    fn recompute(&mut self, entries: &[WorkoutEntry]) {
        self.filtered = filter_indices(entries, &self.search_term, self.type_filter);
        self.total_pages = total_pages(self.filtered.len(), self.items_per_page);
    }

    /// Move by `delta` pages. Rejected (returns false) outside `1..=total_pages`.
    pub fn change_page(&mut self, delta: isize) -> bool {
        let Some(proposed) = self.current_page.checked_add_signed(delta) else {
            return false;
        };
        if proposed < 1 || proposed > self.total_pages {
            return false;
        }
        self.current_page = proposed;
        true
    }

    /// Entries on the current page
    pub fn page<'a>(&self, entries: &'a [WorkoutEntry]) -> Vec<&'a WorkoutEntry> {
        paginate(&self.filtered, self.current_page, self.items_per_page)
            .iter()
            .filter_map(|&i| entries.get(i))
            .collect()
    }
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

    fn ids(entries: &[&WorkoutEntry]) -> Vec<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let entries = sample();
        let found = apply_filters(&entries, "john d", None);
        assert_eq!(ids(&found), vec!["0", "1"]);
        assert!(found.iter().all(|e| e.user_name == "John Doe"));

        // substring match: "john" is also inside "Mike Johnson"
        let found = apply_filters(&entries, "JOHN", None);
        assert_eq!(ids(&found), vec!["0", "1", "4", "5"]);
    }

    #[test]
    fn test_type_filter() {
        let entries = sample();
        let found = apply_filters(&entries, "", Some(WorkoutType::Running));
        assert_eq!(ids(&found), vec!["0", "3"]);

        let found = apply_filters(&entries, "jane", Some(WorkoutType::Running));
        assert_eq!(ids(&found), vec!["3"]);

        assert_eq!(apply_filters(&entries, "", None).len(), 6);
        assert!(apply_filters(&entries, "", Some(WorkoutType::Dance)).is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(6, 5), 2);
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
        assert_eq!(total_pages(6, 1), 6);
        assert_eq!(total_pages(0, 5), 1);
        assert_eq!(total_pages(6, 0), 1);
    }

    #[test]
    fn test_paginate_bounds() {
        let items = [1, 2, 3, 4, 5, 6, 7];
        assert_eq!(paginate(&items, 1, 3), &[1, 2, 3]);
        assert_eq!(paginate(&items, 3, 3), &[7]);
        assert!(paginate(&items, 4, 3).is_empty());
        assert!(paginate(&items, 0, 3).is_empty());
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate(&items, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn test_zero_page_size_shows_nothing() {
        let entries = sample();
        let mut view = EntryView::new(5);
        view.set_items_per_page(0, &entries);
        assert_eq!(view.total_pages(), 1);
        assert!(view.page(&entries).is_empty());
        assert_eq!(view.filtered_count(), 6);
    }

    #[test]
    fn test_change_page_single_item_pages() {
        let entries = sample();
        let mut view = EntryView::new(1);
        view.apply(&entries);
        assert_eq!(view.total_pages(), 6);

        assert!(!view.change_page(-1));
        assert_eq!(view.current_page(), 1);

        assert!(view.change_page(1));
        assert_eq!(view.current_page(), 2);
        assert_eq!(ids(&view.page(&entries)), vec!["1"]);

        assert!(!view.change_page(5));
        assert_eq!(view.current_page(), 2);

        assert!(view.change_page(4));
        assert_eq!(view.current_page(), 6);
        assert!(!view.change_page(1));
    }

    #[test]
    fn test_parameter_change_resets_page() {
        let entries = sample();
        let mut view = EntryView::new(2);
        view.apply(&entries);
        assert!(view.change_page(2));
        assert_eq!(view.current_page(), 3);

        view.set_search_term("j", &entries);
        assert_eq!(view.current_page(), 1);

        view.change_page(1);
        view.set_type_filter(Some(WorkoutType::Cycling), &entries);
        assert_eq!(view.current_page(), 1);
        assert_eq!(view.total_pages(), 1);

        view.set_type_filter(None, &entries);
        view.change_page(1);
        view.set_items_per_page(3, &entries);
        assert_eq!(view.current_page(), 1);
    }

    #[test]
    fn test_refresh_clamps_page() {
        let mut entries = sample();
        let mut view = EntryView::new(2);
        view.apply(&entries);
        view.change_page(2);
        assert_eq!(view.current_page(), 3);

        entries.truncate(3);
        view.refresh(&entries);
        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.current_page(), 2);
        assert_eq!(ids(&view.page(&entries)), vec!["2"]);
    }

    #[test]
    fn test_empty_source() {
        let mut view = EntryView::new(5);
        view.apply(&[]);
        assert_eq!(view.total_pages(), 1);
        assert!(view.page(&[]).is_empty());
        assert!(!view.change_page(1));
    }
}
