use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};
use uuid::Uuid;

use crate::models::Task;
use crate::ui::formatter::Formatter;
use crate::ui::icons::ProjectGlyph;
use crate::ui::widgets::{centered_rect, ColorScheme};
use crate::utils::grouping::group_by;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupMode {
    Date,
    Project,
}

impl GroupMode {
    pub fn toggle(self) -> Self {
        match self {
            GroupMode::Date => GroupMode::Project,
            GroupMode::Project => GroupMode::Date,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GroupMode::Date => "Group by Date",
            GroupMode::Project => "Group by Project",
        }
    }
}

/// History screen state: the full task set plus filter/group/selection.
pub struct HistoryState {
    pub tasks: Vec<Task>,
    pub search: String,
    pub search_input: bool,
    pub group_mode: GroupMode,
    pub selected: usize,
    pub pending_delete: Option<Uuid>,
}

impl HistoryState {
    pub fn new(search: Option<String>, group_mode: GroupMode) -> Self {
        Self {
            tasks: Vec::new(),
            search: search.unwrap_or_default(),
            search_input: false,
            group_mode,
            selected: 0,
            pending_delete: None,
        }
    }

    pub fn set_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.clamp_selection();
    }

    /// Case-insensitive substring filter on task name, applied before
    /// grouping.
    pub fn filtered(&self) -> Vec<&Task> {
        let needle = self.search.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| needle.is_empty() || t.task_name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Filtered tasks grouped by the active mode. Group order is first
    /// occurrence in the fetched (newest-first) task list.
    pub fn grouped(&self) -> Vec<(String, Vec<&Task>)> {
        match self.group_mode {
            GroupMode::Date => group_by(self.filtered(), |t| t.date)
                .into_iter()
                .map(|(date, tasks)| (Formatter::format_date_long(date), tasks))
                .collect(),
            GroupMode::Project => group_by(self.filtered(), |t| t.project_name().to_string()),
        }
    }

    pub fn visible_count(&self) -> usize {
        self.filtered().len()
    }

    /// The task at the flattened selection index, walking groups in order.
    pub fn selected_task(&self) -> Option<&Task> {
        let mut remaining = self.selected;
        for (_, tasks) in self.grouped() {
            if remaining < tasks.len() {
                return Some(tasks[remaining]);
            }
            remaining -= tasks.len();
        }
        None
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.visible_count() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn clamp_selection(&mut self) {
        let count = self.visible_count();
        if count == 0 {
            self.selected = 0;
        } else if self.selected >= count {
            self.selected = count - 1;
        }
    }

    pub fn toggle_group_mode(&mut self) {
        self.group_mode = self.group_mode.toggle();
        self.selected = 0;
    }

    pub fn push_search(&mut self, c: char) {
        self.search.push(c);
        self.selected = 0;
    }

    pub fn pop_search(&mut self) {
        self.search.pop();
        self.selected = 0;
    }

    /// Mark the selected task for deletion; confirmation happens in the
    /// modal.
    pub fn request_delete(&mut self) {
        self.pending_delete = self.selected_task().map(|t| t.id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }
}

fn group_total(tasks: &[&Task]) -> String {
    let minutes: i64 = tasks.iter().map(|t| t.total_minutes).sum();
    Formatter::format_hm(minutes)
}

pub fn render(f: &mut Frame, area: Rect, state: &HistoryState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Search + group toggle
            Constraint::Min(5),    // Grouped task table
        ])
        .split(area);

    render_filters(f, chunks[0], state);
    render_groups(f, chunks[1], state);

    if state.pending_delete.is_some() {
        render_delete_modal(f, f.size());
    }
}

fn render_filters(f: &mut Frame, area: Rect, state: &HistoryState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let search_style = if state.search_input {
        Style::default().fg(ColorScheme::CLEAN_BLUE)
    } else {
        Style::default().fg(ColorScheme::WHITE_TEXT)
    };

    let search_text = if state.search.is_empty() && !state.search_input {
        "Search by task name (press /)".to_string()
    } else {
        format!("Search: {}", state.search)
    };

    f.render_widget(
        Paragraph::new(search_text)
            .style(search_style)
            .block(Block::default().borders(Borders::BOTTOM)),
        cols[0],
    );

    f.render_widget(
        Paragraph::new(format!("{}  (g to toggle)", state.group_mode.label()))
            .alignment(Alignment::Right)
            .style(Style::default().fg(ColorScheme::GRAY_TEXT))
            .block(Block::default().borders(Borders::BOTTOM)),
        cols[1],
    );
}

fn render_groups(f: &mut Frame, area: Rect, state: &HistoryState) {
    let grouped = state.grouped();

    if grouped.is_empty() {
        f.render_widget(
            Paragraph::new("No tasks found")
                .alignment(Alignment::Center)
                .style(Style::default().fg(ColorScheme::GRAY_TEXT)),
            area,
        );
        return;
    }

    let first_column = match state.group_mode {
        GroupMode::Date => "Project",
        GroupMode::Project => "Date",
    };

    let header = Row::new(vec![
        Cell::from(first_column),
        Cell::from("Task Name"),
        Cell::from("Duration"),
        Cell::from("Notes"),
    ])
    .style(
        Style::default()
            .fg(ColorScheme::GRAY_TEXT)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    // Flatten groups into header rows and task rows; track which rendered
    // row holds the selection so scrolling can follow it.
    let mut rows: Vec<Row> = Vec::new();
    let mut selected_render_row = 0;
    let mut data_index = 0;

    for (title, tasks) in &grouped {
        rows.push(
            Row::new(vec![
                Cell::from(title.clone()),
                Cell::from(""),
                Cell::from(format!("Total: {}", group_total(tasks))),
                Cell::from(""),
            ])
            .style(
                Style::default()
                    .fg(ColorScheme::CLEAN_GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
        );

        for task in tasks {
            let is_selected = data_index == state.selected;
            if is_selected {
                selected_render_row = rows.len();
            }

            let style = if is_selected {
                Style::default().bg(ColorScheme::CLEAN_BLUE).fg(Color::Black)
            } else {
                Style::default().fg(ColorScheme::WHITE_TEXT)
            };

            let first_cell = match state.group_mode {
                GroupMode::Date => format!(
                    "{} {}",
                    ProjectGlyph::resolve(task.project.icon.as_deref()).symbol(),
                    task.project_name()
                ),
                GroupMode::Project => Formatter::format_date_long(task.date),
            };

            rows.push(
                Row::new(vec![
                    Cell::from(first_cell),
                    Cell::from(task.task_name.clone()),
                    Cell::from(Formatter::format_hm(task.total_minutes)),
                    Cell::from(task.notes.clone().unwrap_or_else(|| "-".to_string())),
                ])
                .style(style),
            );
        }

        data_index += tasks.len();
    }

    // Slice the rendered rows so the selection stays on screen.
    let visible = area.height.saturating_sub(2).max(1) as usize;
    let first = selected_render_row.saturating_sub(visible.saturating_sub(1));
    let windowed: Vec<Row> = rows.into_iter().skip(first).take(visible).collect();

    let table = Table::new(windowed).header(header).widths(&[
        Constraint::Min(22),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Min(14),
    ]);

    f.render_widget(table, area);
}

fn render_delete_modal(f: &mut Frame, area: Rect) {
    let modal = centered_rect(50, 30, area);
    f.render_widget(Clear, modal);

    let block = Block::default()
        .title(" Are you sure? ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let inner = block.inner(modal);
    f.render_widget(block, modal);

    f.render_widget(
        Paragraph::new(
            "This will permanently delete this task.\nThis action cannot be undone.\n\n\
             [y] Delete    [n/Esc/Enter] Cancel",
        )
        .alignment(Alignment::Center)
        .style(Style::default().fg(ColorScheme::WHITE_TEXT))
        .wrap(ratatui::widgets::Wrap { trim: true }),
        inner,
    );
}
