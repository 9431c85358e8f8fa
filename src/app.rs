use crate::config::Config;
use crate::entry::{WorkoutEntry, WorkoutType};
use crate::form::EntryForm;
use crate::storage::KeyValueStore;
use crate::store::AddOutcome;
use crate::tracker::Tracker;

/// Pane that receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// New-entry form
    Form,
    /// Entries table with search and paging
    Table,
    /// User list driving the chart
    Users,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Form => Focus::Table,
            Focus::Table => Focus::Users,
            Focus::Users => Focus::Form,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Form => Focus::Users,
            Focus::Table => Focus::Form,
            Focus::Users => Focus::Table,
        }
    }
}

/// Outcome of the last user action, shown in the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Application state
pub struct App<S> {
    tracker: Tracker<S>,
    config: Config,
    focus: Focus,
    form: EntryForm,
    /// Whether keystrokes currently edit the search term
    editing_search: bool,
    /// Selected row on the current table page
    table_selected: usize,
    /// Selected row in the user list
    user_selected: usize,
    page_sizes: Vec<usize>,
    status: Option<StatusMessage>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(tracker: Tracker<S>, config: Config) -> Self {
        let page_sizes = config.page_sizes();
        Self {
            tracker,
            config,
            focus: Focus::Form,
            form: EntryForm::default(),
            editing_search: false,
            table_selected: 0,
            user_selected: 0,
            page_sizes,
            status: None,
        }
    }

    pub fn tracker(&self) -> &Tracker<S> {
        &self.tracker
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn form(&self) -> &EntryForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EntryForm {
        &mut self.form
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn is_editing_search(&self) -> bool {
        self.editing_search
    }

    pub fn table_selected(&self) -> usize {
        self.table_selected
    }

    pub fn user_selected(&self) -> usize {
        self.user_selected
    }

    pub fn focus_next(&mut self) {
        self.editing_search = false;
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.editing_search = false;
        self.focus = self.focus.previous();
    }

    // ---- form ----

    /// Validate the form and add the entry
    pub fn submit_form(&mut self) {
        let candidate = match self.form.validate() {
            Ok(candidate) => candidate,
            Err(e) => {
                self.status = Some(StatusMessage::Error(e.to_string()));
                return;
            }
        };

        let user_name = candidate.user_name.clone();
        match self.tracker.submit(candidate) {
            AddOutcome::Added(_) => {
                self.form.reset();
                self.clamp_table_selection();
                self.sync_user_selection(&user_name);
                self.status = Some(StatusMessage::Info(format!("Added workout for {user_name}")));
            }
            AddOutcome::Duplicate => {
                self.status = Some(StatusMessage::Error("Duplicate entry ignored".to_string()));
            }
        }
    }

    // ---- table ----

    pub fn start_search(&mut self) {
        self.editing_search = true;
    }

    pub fn stop_search(&mut self) {
        self.editing_search = false;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut term = self.tracker.view().search_term().to_string();
        term.push(c);
        self.tracker.set_search_term(term);
        self.table_selected = 0;
    }

    pub fn pop_search_char(&mut self) {
        let mut term = self.tracker.view().search_term().to_string();
        if term.pop().is_some() {
            self.tracker.set_search_term(term);
            self.table_selected = 0;
        }
    }

    pub fn clear_search(&mut self) {
        self.editing_search = false;
        if !self.tracker.view().search_term().is_empty() {
            self.tracker.set_search_term(String::new());
            self.table_selected = 0;
        }
    }

    pub fn cycle_type_filter(&mut self, forward: bool) {
        let current = self.tracker.view().type_filter();
        let next = if forward {
            WorkoutType::cycle_next(current)
        } else {
            WorkoutType::cycle_previous(current)
        };
        self.tracker.set_type_filter(next);
        self.table_selected = 0;
    }

    /// Switch to the next configured page size
    pub fn cycle_page_size(&mut self) {
        let current = self.tracker.view().items_per_page();
        let next = self
            .page_sizes
            .iter()
            .copied()
            .find(|&n| n > current)
            .or_else(|| self.page_sizes.first().copied())
            .unwrap_or(current);
        self.tracker.set_items_per_page(next);
        self.table_selected = 0;
    }

    pub fn change_page(&mut self, delta: isize) {
        if self.tracker.change_page(delta) {
            self.table_selected = 0;
        }
    }

    pub fn table_up(&mut self) {
        self.table_selected = self.table_selected.saturating_sub(1);
    }

    pub fn table_down(&mut self) {
        let rows = self.tracker.page().len();
        if self.table_selected + 1 < rows {
            self.table_selected += 1;
        }
    }

    /// Entry under the table cursor
    pub fn selected_entry(&self) -> Option<&WorkoutEntry> {
        self.tracker.page().get(self.table_selected).copied()
    }

    pub fn delete_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        let id = entry.id.clone();
        let label = format!("{} / {}", entry.user_name, entry.workout_type);

        if self.tracker.delete(&id) {
            self.clamp_table_selection();
            let users = self.tracker.unique_users().len();
            self.user_selected = self.user_selected.min(users.saturating_sub(1));
            self.status = Some(StatusMessage::Info(format!("Deleted {label}")));
        }
    }

    fn clamp_table_selection(&mut self) {
        let rows = self.tracker.page().len();
        self.table_selected = self.table_selected.min(rows.saturating_sub(1));
    }

    // ---- users ----

    pub fn users_up(&mut self) {
        self.user_selected = self.user_selected.saturating_sub(1);
    }

    pub fn users_down(&mut self) {
        let users = self.tracker.unique_users().len();
        if self.user_selected + 1 < users {
            self.user_selected += 1;
        }
    }

    /// Show the chart for the user under the cursor
    pub fn select_highlighted_user(&mut self) {
        let user = self.tracker.unique_users().into_iter().nth(self.user_selected);
        self.tracker.select_user(user);
    }

    fn sync_user_selection(&mut self, user_name: &str) {
        if let Some(pos) = self.tracker.unique_users().iter().position(|u| u == user_name) {
            self.user_selected = pos;
        }
    }
}
