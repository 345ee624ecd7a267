use anyhow::Result;
use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::time::Duration;

use crate::api::{ApiClient, DateOrder};
use crate::models::{Project, TrailingWindow, User};
use crate::ui::add_task::{self, AddTaskState, FormField};
use crate::ui::dashboard::{self, DashboardState};
use crate::ui::history::{self, GroupMode, HistoryState};
use crate::ui::widgets::{ColorScheme, Notice};
use crate::utils::validation::validate_batch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    AddTask,
    History,
}

impl View {
    fn next(self) -> Self {
        match self {
            View::Dashboard => View::AddTask,
            View::AddTask => View::History,
            View::History => View::Dashboard,
        }
    }

    fn label(self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::AddTask => "Add Tasks",
            View::History => "History",
        }
    }

    fn short_label(self) -> &'static str {
        match self {
            View::Dashboard => "Dash",
            View::AddTask => "Add",
            View::History => "Hist",
        }
    }
}

/// Where and how the TUI starts, from the launching subcommand.
pub struct LaunchOptions {
    pub view: View,
    pub window: TrailingWindow,
    pub search: Option<String>,
    pub group_mode: GroupMode,
}

/// Why the event loop ended. Sign-out is completed by the caller once the
/// terminal is restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppExit {
    Quit,
    SignedOut,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The authenticated shell: navigation chrome, current-user indicator,
/// sign-out, and the three screens. All data lives behind the API client;
/// screens refetch wholesale after any mutation.
pub struct App {
    api: ApiClient,
    user: User,
    view: View,
    notice: Option<Notice>,
    projects: Vec<Project>,
    dashboard: DashboardState,
    form: AddTaskState,
    history: HistoryState,
}

impl App {
    pub fn new(api: ApiClient, user: User, opts: LaunchOptions) -> Self {
        Self {
            api,
            user,
            view: opts.view,
            notice: None,
            projects: Vec::new(),
            dashboard: DashboardState::new(opts.window),
            form: AddTaskState::new(today()),
            history: HistoryState::new(opts.search, opts.group_mode),
        }
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<AppExit> {
        self.refresh_projects().await;
        self.refresh_current_view().await;

        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        // Calls below are awaited inline; an in-flight fetch
                        // is never cancelled by later input.
                        if let Some(exit) = self.handle_key(key).await {
                            return Ok(exit);
                        }
                    }
                }
            }
        }
    }

    // Data plane

    async fn refresh_current_view(&mut self) {
        match self.view {
            View::Dashboard => self.refresh_dashboard().await,
            View::AddTask => self.refresh_projects().await,
            View::History => self.refresh_history().await,
        }
    }

    async fn refresh_projects(&mut self) {
        match self.api.active_projects().await {
            Ok(projects) => self.projects = projects,
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    async fn refresh_dashboard(&mut self) {
        let since = self.dashboard.window.start(today());
        match self
            .api
            .tasks(self.user.id, Some(since), DateOrder::Ascending)
            .await
        {
            Ok(tasks) => self.dashboard.set_tasks(tasks, today()),
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    async fn refresh_history(&mut self) {
        match self.api.tasks(self.user.id, None, DateOrder::Descending).await {
            Ok(tasks) => self.history.set_tasks(tasks),
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
        }
    }

    async fn switch_view(&mut self, view: View) {
        if self.view != view {
            self.view = view;
            self.refresh_current_view().await;
        }
    }

    /// Validate the whole batch, then insert it in one call. Either the
    /// batch saves and the form resets, or nothing is saved and the form
    /// stays as typed. One notice per attempt.
    async fn submit_batch(&mut self) {
        let today = today();
        match validate_batch(self.form.batch.drafts(), &self.projects, self.user.id, today) {
            Err(e) => self.notice = Some(Notice::error(e.to_string())),
            Ok(rows) => match self.api.insert_tasks(&rows).await {
                Err(e) => self.notice = Some(Notice::error(e.to_string())),
                Ok(()) => {
                    self.form.reset(today);
                    self.view = View::Dashboard;
                    self.refresh_dashboard().await;
                    self.notice = Some(Notice::success(format!(
                        "{} task(s) saved successfully",
                        rows.len()
                    )));
                }
            },
        }
    }

    async fn confirm_delete(&mut self) {
        if let Some(id) = self.history.pending_delete.take() {
            match self.api.delete_task(id).await {
                Err(e) => self.notice = Some(Notice::error(e.to_string())),
                Ok(()) => {
                    self.refresh_history().await;
                    self.notice = Some(Notice::success("Task deleted successfully"));
                }
            }
        }
    }

    // Input

    async fn handle_key(&mut self, key: KeyEvent) -> Option<AppExit> {
        // Sign-out works from every screen and mode.
        if key.code == KeyCode::Char('o') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppExit::SignedOut);
        }

        // Confirmation modal swallows everything; only 'y' deletes.
        if self.view == View::History && self.history.pending_delete.is_some() {
            match key.code {
                KeyCode::Char('y') => self.confirm_delete().await,
                _ => self.history.cancel_delete(),
            }
            return None;
        }

        if self.view == View::History && self.history.search_input {
            match key.code {
                KeyCode::Enter | KeyCode::Esc => self.history.search_input = false,
                KeyCode::Char(c) => self.history.push_search(c),
                KeyCode::Backspace => self.history.pop_search(),
                _ => {}
            }
            return None;
        }

        if self.view == View::AddTask && self.form.editing {
            self.handle_form_edit_key(key);
            return None;
        }

        match key.code {
            KeyCode::Char('q') => return Some(AppExit::Quit),
            KeyCode::Char('1') => {
                self.switch_view(View::Dashboard).await;
                return None;
            }
            KeyCode::Char('2') => {
                self.switch_view(View::AddTask).await;
                return None;
            }
            KeyCode::Char('3') => {
                self.switch_view(View::History).await;
                return None;
            }
            KeyCode::Tab => {
                self.switch_view(self.view.next()).await;
                return None;
            }
            _ => {}
        }

        match self.view {
            View::Dashboard => self.handle_dashboard_key(key).await,
            View::AddTask => self.handle_form_key(key).await,
            View::History => self.handle_history_key(key),
        }

        None
    }

    async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('r') {
            self.dashboard.cycle_window();
            self.refresh_dashboard().await;
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.form.next_row(),
            KeyCode::Up | KeyCode::Char('k') => self.form.prev_row(),
            KeyCode::Right | KeyCode::Char('l') => self.form.next_field(),
            KeyCode::Left | KeyCode::Char('h') => self.form.prev_field(),
            KeyCode::Enter | KeyCode::Char('i') => self.form.editing = true,
            KeyCode::Char('a') => {
                if let Err(e) = self.form.add_row(today()) {
                    self.notice = Some(Notice::error(e.to_string()));
                }
            }
            KeyCode::Char('d') => {
                if let Err(e) = self.form.remove_selected() {
                    self.notice = Some(Notice::error(e.to_string()));
                }
            }
            KeyCode::Char('s') => self.submit_batch().await,
            _ => {}
        }
    }

    fn handle_form_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.form.editing = false,
            KeyCode::Char(c) => self.form.input_char(c),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Left => match self.form.field {
                FormField::Project => self.form.cycle_project(-1, &self.projects),
                FormField::Date => self.form.step_date(-1, today()),
                _ => {}
            },
            KeyCode::Right => match self.form.field {
                FormField::Project => self.form.cycle_project(1, &self.projects),
                FormField::Date => self.form.step_date(1, today()),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.history.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.history.select_prev(),
            KeyCode::Char('/') => self.history.search_input = true,
            KeyCode::Char('g') => self.history.toggle_group_mode(),
            KeyCode::Char('d') => self.history.request_delete(),
            _ => {}
        }
    }

    // Rendering

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header chrome
                Constraint::Min(5),    // Active screen
                Constraint::Length(2), // Hints + notice
            ])
            .split(f.size());

        self.render_header(f, chunks[0]);

        match self.view {
            View::Dashboard => dashboard::render(f, chunks[1], &self.dashboard),
            View::AddTask => add_task::render(f, chunks[1], &self.form, &self.projects),
            View::History => history::render(f, chunks[1], &self.history),
        }

        self.render_footer(f, chunks[2]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let narrow = area.width < 80;

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(30)])
            .split(area);

        let mut spans = vec![
            Span::styled(
                "⏱ Tally  ",
                Style::default()
                    .fg(ColorScheme::CLEAN_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        for (i, view) in [View::Dashboard, View::AddTask, View::History]
            .into_iter()
            .enumerate()
        {
            let label = if narrow {
                view.short_label()
            } else {
                view.label()
            };
            let style = if view == self.view {
                Style::default()
                    .fg(Color::Black)
                    .bg(ColorScheme::CLEAN_BLUE)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(ColorScheme::GRAY_TEXT)
            };
            spans.push(Span::styled(format!(" {} {} ", i + 1, label), style));
            spans.push(Span::raw(" "));
        }

        f.render_widget(
            Paragraph::new(Line::from(spans)).block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(ColorScheme::GRAY_TEXT)),
            ),
            cols[0],
        );

        let who = if narrow {
            String::new()
        } else {
            self.user.email.clone()
        };
        f.render_widget(
            Paragraph::new(who)
                .alignment(Alignment::Right)
                .style(Style::default().fg(ColorScheme::GRAY_TEXT))
                .block(
                    Block::default()
                        .borders(Borders::BOTTOM)
                        .border_style(Style::default().fg(ColorScheme::GRAY_TEXT)),
                ),
            cols[1],
        );
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(area);

        let hints: Vec<(&str, &str)> = if self.view == View::History
            && self.history.pending_delete.is_some()
        {
            vec![("y", "Delete"), ("n/Esc", "Cancel")]
        } else if self.view == View::History && self.history.search_input {
            vec![("type", "Filter"), ("Enter/Esc", "Done")]
        } else if self.view == View::AddTask && self.form.editing {
            vec![(self.form.field.edit_hint(), "")]
        } else {
            let mut hints = vec![
                ("q", "Quit"),
                ("Tab", "Next View"),
                ("1-3", "View"),
                ("Ctrl+o", "Sign out"),
            ];
            match self.view {
                View::Dashboard => hints.push(("r", "Range")),
                View::AddTask => hints.extend([
                    ("j/k", "Row"),
                    ("h/l", "Field"),
                    ("Enter", "Edit"),
                    ("a", "Add"),
                    ("d", "Remove"),
                    ("s", "Save All"),
                ]),
                View::History => hints.extend([
                    ("j/k", "Navigate"),
                    ("/", "Search"),
                    ("g", "Group"),
                    ("d", "Delete"),
                ]),
            }
            hints
        };

        let spans: Vec<Span> = hints
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(
                        format!(" {} ", key),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("{} ", desc), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();

        f.render_widget(Paragraph::new(Line::from(spans)), rows[0]);

        if let Some(notice) = &self.notice {
            f.render_widget(
                Paragraph::new(notice.text.clone()).style(notice.style()),
                rows[1],
            );
        }
    }
}
