use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table},
    Frame,
};

use crate::models::{DraftBatch, DraftError, Project, TaskDraft, MAX_DRAFTS};
use crate::ui::formatter::Formatter;
use crate::ui::widgets::ColorScheme;
use crate::utils::validation::{date_window, MAX_NOTES_CHARS, MAX_TASK_NAME_CHARS};

/// Editable columns of a draft row, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Project,
    Name,
    Date,
    Hours,
    Minutes,
    Notes,
}

impl FormField {
    const ORDER: [FormField; 6] = [
        FormField::Project,
        FormField::Name,
        FormField::Date,
        FormField::Hours,
        FormField::Minutes,
        FormField::Notes,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn edit_hint(self) -> &'static str {
        match self {
            FormField::Project => "←/→ choose project  Enter/Esc done",
            FormField::Date => "←/→ step day (last 7 days only)  Enter/Esc done",
            FormField::Hours | FormField::Minutes => "type digits  Enter/Esc done",
            FormField::Name | FormField::Notes => "type text  Enter/Esc done",
        }
    }
}

/// Form state for the batch entry screen.
pub struct AddTaskState {
    pub batch: DraftBatch,
    pub row: usize,
    pub field: FormField,
    pub editing: bool,
}

impl AddTaskState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            batch: DraftBatch::new(today),
            row: 0,
            field: FormField::Project,
            editing: false,
        }
    }

    fn selected_draft_mut(&mut self) -> Option<&mut TaskDraft> {
        let row = self.row;
        self.batch.get_mut(row)
    }

    pub fn next_row(&mut self) {
        if self.row + 1 < self.batch.len() {
            self.row += 1;
        }
    }

    pub fn prev_row(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    pub fn next_field(&mut self) {
        self.field = self.field.next();
    }

    pub fn prev_field(&mut self) {
        self.field = self.field.prev();
    }

    pub fn add_row(&mut self, today: NaiveDate) -> Result<(), DraftError> {
        self.batch.add(today)?;
        self.row = self.batch.len() - 1;
        Ok(())
    }

    pub fn remove_selected(&mut self) -> Result<(), DraftError> {
        self.batch.remove(self.row)?;
        if self.row >= self.batch.len() {
            self.row = self.batch.len() - 1;
        }
        Ok(())
    }

    /// Reset after a successful submission.
    pub fn reset(&mut self, today: NaiveDate) {
        self.batch.reset(today);
        self.row = 0;
        self.field = FormField::Project;
        self.editing = false;
    }

    pub fn input_char(&mut self, c: char) {
        let field = self.field;
        if let Some(draft) = self.selected_draft_mut() {
            match field {
                FormField::Name => {
                    if draft.task_name.chars().count() < MAX_TASK_NAME_CHARS {
                        draft.task_name.push(c);
                    }
                }
                FormField::Notes => {
                    if draft.notes.chars().count() < MAX_NOTES_CHARS {
                        draft.notes.push(c);
                    }
                }
                FormField::Hours => {
                    if c.is_ascii_digit() && draft.hours.len() < 2 {
                        if draft.hours == "0" {
                            draft.hours.clear();
                        }
                        draft.hours.push(c);
                    }
                }
                FormField::Minutes => {
                    if c.is_ascii_digit() && draft.minutes.len() < 2 {
                        if draft.minutes == "0" {
                            draft.minutes.clear();
                        }
                        draft.minutes.push(c);
                    }
                }
                FormField::Project | FormField::Date => {}
            }
        }
    }

    pub fn backspace(&mut self) {
        let field = self.field;
        if let Some(draft) = self.selected_draft_mut() {
            match field {
                FormField::Name => {
                    draft.task_name.pop();
                }
                FormField::Notes => {
                    draft.notes.pop();
                }
                FormField::Hours => {
                    draft.hours.pop();
                    if draft.hours.is_empty() {
                        draft.hours.push('0');
                    }
                }
                FormField::Minutes => {
                    draft.minutes.pop();
                    if draft.minutes.is_empty() {
                        draft.minutes.push('0');
                    }
                }
                FormField::Project | FormField::Date => {}
            }
        }
    }

    /// Cycle the selected draft's project through the active project list.
    pub fn cycle_project(&mut self, delta: isize, projects: &[Project]) {
        if projects.is_empty() {
            return;
        }
        if let Some(draft) = self.selected_draft_mut() {
            let current = draft
                .project_id
                .and_then(|id| projects.iter().position(|p| p.id == id));
            let next = match current {
                Some(index) => {
                    (index as isize + delta).rem_euclid(projects.len() as isize) as usize
                }
                None => 0,
            };
            draft.project_id = Some(projects[next].id);
        }
    }

    /// Step the selected draft's date, clamped to the submission window. The
    /// input cannot leave the window the validator enforces.
    pub fn step_date(&mut self, delta_days: i64, today: NaiveDate) {
        let (earliest, latest) = date_window(today);
        if let Some(draft) = self.selected_draft_mut() {
            let stepped = draft.date + chrono::Duration::days(delta_days);
            draft.date = stepped.clamp(earliest, latest);
        }
    }
}

fn project_label(draft: &TaskDraft, projects: &[Project]) -> String {
    match draft.project_id {
        Some(id) => projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.project_name.clone())
            .unwrap_or_else(|| "(unavailable)".to_string()),
        None => "(select)".to_string(),
    }
}

pub fn render(f: &mut Frame, area: Rect, state: &AddTaskState, projects: &[Project]) {
    let title = format!("Add Tasks ({}/{})", state.batch.len(), MAX_DRAFTS);
    let block = ColorScheme::base_block(&title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let header = Row::new(vec![
        Cell::from("#"),
        Cell::from("Project"),
        Cell::from("Task Name"),
        Cell::from("Date"),
        Cell::from("Hrs"),
        Cell::from("Min"),
        Cell::from("Notes"),
    ])
    .style(
        Style::default()
            .fg(ColorScheme::GRAY_TEXT)
            .add_modifier(Modifier::BOLD),
    )
    .bottom_margin(1);

    // Scroll so the selected row stays visible.
    let visible = inner.height.saturating_sub(2).max(1) as usize;
    let first = state.row.saturating_sub(visible.saturating_sub(1));

    let cell_style = |row: usize, field: FormField| -> Style {
        if row != state.row || field != state.field {
            return Style::default().fg(ColorScheme::WHITE_TEXT);
        }
        if state.editing {
            Style::default()
                .bg(ColorScheme::CLEAN_ACCENT)
                .fg(ColorScheme::CLEAN_BG)
        } else {
            Style::default()
                .bg(ColorScheme::CLEAN_BLUE)
                .fg(ColorScheme::CLEAN_BG)
        }
    };

    let rows: Vec<Row> = state
        .batch
        .drafts()
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, draft)| {
            let name = if draft.task_name.is_empty() && !(i == state.row && state.editing) {
                "(enter task name)".to_string()
            } else {
                draft.task_name.clone()
            };

            Row::new(vec![
                Cell::from(format!("{}", i + 1)).style(Style::default().fg(ColorScheme::GRAY_TEXT)),
                Cell::from(project_label(draft, projects)).style(cell_style(i, FormField::Project)),
                Cell::from(name).style(cell_style(i, FormField::Name)),
                Cell::from(Formatter::format_date_iso(draft.date))
                    .style(cell_style(i, FormField::Date)),
                Cell::from(draft.hours.clone()).style(cell_style(i, FormField::Hours)),
                Cell::from(draft.minutes.clone()).style(cell_style(i, FormField::Minutes)),
                Cell::from(draft.notes.clone()).style(cell_style(i, FormField::Notes)),
            ])
        })
        .collect();

    let table = Table::new(rows).header(header).widths(&[
        Constraint::Length(3),
        Constraint::Length(20),
        Constraint::Min(18),
        Constraint::Length(10),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(14),
    ]);

    f.render_widget(table, inner);
}
