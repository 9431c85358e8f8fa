//! Drawing functions for the TUI
//!
//! Layout, top to bottom:
//! - entry form
//! - entries table (search bar, rows, page footer)
//! - user list and minutes-by-type chart
//! - status bar

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row,
        Table, TableState,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus, StatusMessage};
use crate::form::FormField;
use crate::storage::KeyValueStore;
use crate::ui::theme::Theme;

/// Width of each chart bar in cells
const BAR_WIDTH: u16 = 9;
/// Width of the label column in the form
const LABEL_WIDTH: u16 = 18;

/// Main draw function
pub fn draw<S: KeyValueStore>(f: &mut Frame, app: &App<S>, theme: &Theme) {
    let area = f.area();
    let bg_block = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(bg_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Form
            Constraint::Min(8),     // Entries table
            Constraint::Length(12), // Users + chart
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_form(f, app, chunks[0], theme);
    draw_entries(f, app, chunks[1], theme);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(chunks[2]);
    draw_users(f, app, bottom[0], theme);
    draw_chart(f, app, bottom[1], theme);

    draw_status_bar(f, app, chunks[3], theme);
}

fn pane_block<'a>(title: &'a str, focused: bool, theme: &Theme) -> Block<'a> {
    let border = if focused { theme.accent } else { theme.dimmed };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title)
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(theme.background).fg(theme.foreground))
}

fn draw_form<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect, theme: &Theme) {
    let focused = app.focus() == Focus::Form;
    let form = app.form();
    let prefix = &app.config().appearance.selected_prefix;

    let type_text = match form.workout_type {
        Some(ty) => format!("◀ {ty} ▶"),
        None => "◀ Select a workout type ▶".to_string(),
    };
    let fields = [
        (FormField::UserName, "User Name*", form.user_name.clone()),
        (FormField::WorkoutType, "Workout Type*", type_text),
        (FormField::Minutes, "Workout Minutes*", form.minutes.clone()),
    ];

    let lines: Vec<Line> = fields
        .into_iter()
        .map(|(field, label, value)| {
            let active = focused && form.focus == field;
            let marker = if active { prefix.clone() } else { " ".repeat(prefix.width()) };
            let label_style = if active {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.dimmed)
            };
            let width = (LABEL_WIDTH as usize).saturating_sub(prefix.width());
            let padded = format!("{marker}{label:<width$}");
            Line::from(vec![
                Span::styled(padded, label_style),
                Span::styled(value, Style::default().fg(theme.foreground)),
            ])
        })
        .collect();

    let form_widget = Paragraph::new(lines).block(pane_block(" Add Workout ", focused, theme));
    f.render_widget(form_widget, area);

    // Cursor on text fields
    if focused && form.focus != FormField::WorkoutType {
        let (row, text) = match form.focus {
            FormField::UserName => (0, &form.user_name),
            _ => (2, &form.minutes),
        };
        let cursor_x = area.x + 1 + LABEL_WIDTH + text.width() as u16;
        let cursor_y = area.y + 1 + row;
        f.set_cursor_position((cursor_x, cursor_y));
    }
}

fn draw_entries<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect, theme: &Theme) {
    let focused = app.focus() == Focus::Table;
    let block = pane_block(" Workout Entries ", focused, theme);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.width == 0 || inner.height < 3 {
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Search
            Constraint::Min(1),    // Rows
            Constraint::Length(1), // Pagination
        ])
        .split(inner);

    draw_search_bar(f, app, chunks[0], theme);
    draw_table(f, app, chunks[1], theme);
    draw_page_footer(f, app, chunks[2], theme);
}

fn draw_search_bar<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect, theme: &Theme) {
    let prompt = &app.config().appearance.prompt;
    let term = app.tracker().view().search_term();
    let editing = app.is_editing_search();

    let (text, style) = if editing || !term.is_empty() {
        let color = if editing { theme.search_highlight } else { theme.foreground };
        (format!("{prompt}{term}"), Style::default().fg(color))
    } else {
        (format!("{prompt}Search by name (/)"), Style::default().fg(theme.dimmed))
    };

    f.render_widget(Paragraph::new(text).style(style), area);

    if editing {
        let cursor_x = area.x + prompt.width() as u16 + term.width() as u16;
        f.set_cursor_position((cursor_x, area.y));
    }
}

fn draw_table<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect, theme: &Theme) {
    let tracker = app.tracker();
    let page = tracker.page();

    let header = Row::new(["Name", "Workout", "Number of Workouts", "Total Minutes"])
        .style(Style::default().fg(theme.dimmed).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = page
        .iter()
        .map(|entry| {
            Row::new(vec![
                Cell::from(entry.user_name.clone()),
                Cell::from(format!("{} ({} min)", entry.workout_type, entry.workout_minutes)),
                Cell::from(tracker.count_for_user(&entry.user_name).to_string()),
                Cell::from(tracker.total_minutes_for_user(&entry.user_name).to_string()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(30),
        Constraint::Percentage(30),
        Constraint::Percentage(20),
        Constraint::Percentage(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .style(Style::default().fg(theme.foreground))
        .row_highlight_style(
            Style::default()
                .bg(theme.selection_bg)
                .fg(theme.selection_fg)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    if app.focus() == Focus::Table && !page.is_empty() {
        state.select(Some(app.table_selected()));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_page_footer<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect, theme: &Theme) {
    let tracker = app.tracker();
    let view = tracker.view();
    let type_label = view
        .type_filter()
        .map_or_else(|| "All Workout Types".to_string(), |ty| ty.to_string());

    let footer = format!(
        " ◀ Page {} of {} ▶ | {} | {} per page | {} of {} entries",
        tracker.current_page(),
        tracker.total_pages(),
        type_label,
        view.items_per_page(),
        view.filtered_count(),
        tracker.entries().len()
    );
    f.render_widget(
        Paragraph::new(footer).style(Style::default().fg(theme.dimmed)),
        area,
    );
}

fn draw_users<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect, theme: &Theme) {
    let focused = app.focus() == Focus::Users;
    let tracker = app.tracker();
    let selected_user = tracker.selected_user();

    let items: Vec<ListItem> = tracker
        .unique_users()
        .into_iter()
        .map(|user| {
            let style = if Some(user.as_str()) == selected_user {
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.foreground)
            };
            ListItem::new(Line::from(Span::styled(user, style)))
        })
        .collect();

    let list = List::new(items)
        .block(pane_block(" Users ", focused, theme))
        .highlight_style(Style::default().bg(theme.selection_bg).fg(theme.selection_fg));

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.user_selected()));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_chart<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect, theme: &Theme) {
    let Some(chart) = app.tracker().chart() else {
        let hint = Paragraph::new("Select a user (Enter) to see their workout progress")
            .style(Style::default().fg(theme.dimmed))
            .block(pane_block(" Progress ", false, theme));
        f.render_widget(hint, area);
        return;
    };

    let title = format!(" {}'s workout progress (minutes) ", chart.user_name);
    let bars: Vec<Bar> = chart
        .minutes_by_type
        .iter()
        .map(|(ty, minutes)| {
            Bar::default()
                .label(Line::from(ty.label()))
                .value(*minutes)
                .style(Style::default().fg(theme.bar))
                .value_style(Style::default().fg(theme.background).bg(theme.bar))
        })
        .collect();

    let barchart = BarChart::default()
        .block(pane_block(&title, false, theme))
        .data(BarGroup::default().bars(&bars))
        .bar_width(BAR_WIDTH)
        .bar_gap(2)
        .label_style(Style::default().fg(theme.dimmed));
    f.render_widget(barchart, area);
}

fn draw_status_bar<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect, theme: &Theme) {
    let hints = match app.focus() {
        Focus::Form => "↑↓: field | ←→: type | Enter: add | Tab: next pane | Ctrl+C: quit",
        Focus::Table if app.is_editing_search() => "type to search | Enter: done | Esc: clear",
        Focus::Table => "/: search | t: type | p: page size | ←→: page | d: delete | Tab: next | q: quit",
        Focus::Users => "↑↓: move | Enter: show chart | Tab: next pane | q: quit",
    };

    let line = match app.status() {
        Some(StatusMessage::Info(msg)) => Line::from(vec![
            Span::styled(format!(" {msg} "), Style::default().fg(theme.success)),
            Span::styled(format!("| {hints}"), Style::default().fg(theme.dimmed)),
        ]),
        Some(StatusMessage::Error(msg)) => Line::from(vec![
            Span::styled(format!(" {msg} "), Style::default().fg(theme.error)),
            Span::styled(format!("| {hints}"), Style::default().fg(theme.dimmed)),
        ]),
        None => Line::from(Span::styled(format!(" {hints}"), Style::default().fg(theme.dimmed))),
    };

    f.render_widget(
        Paragraph::new(line).style(Style::default().bg(theme.background)),
        area,
    );
}
