use super::{Cli, Commands, ConfigAction, GroupByArg};
use crate::api::{
    clear_session, load_session, store_session, ApiClient, AuthClient, AuthSession,
};
use crate::models::{TaskDraft, TrailingWindow};
use crate::ui::app::{App, AppExit, LaunchOptions, View};
use crate::ui::history::GroupMode;
use crate::ui::icons::ProjectGlyph;
use crate::utils::config::{load_config, save_config};
use crate::utils::paths::get_config_path;
use crate::utils::validation::validate_batch;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::io::Write;

pub async fn handle_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => login(email, password).await,

        Commands::Logout => logout().await,

        Commands::Whoami => whoami().await,

        Commands::Projects => list_projects().await,

        Commands::Add {
            project,
            task,
            date,
            hours,
            minutes,
            notes,
        } => {
            let scripted = project.is_some()
                || task.is_some()
                || date.is_some()
                || hours.is_some()
                || minutes.is_some()
                || notes.is_some();
            if scripted {
                add_task(project, task, date, hours, minutes, notes).await
            } else {
                launch_tui(View::AddTask, None, None, None).await
            }
        }

        Commands::Dashboard { range } => launch_tui(View::Dashboard, range, None, None).await,

        Commands::History { search, group } => {
            launch_tui(View::History, None, search, group).await
        }

        Commands::Config { action } => handle_config_action(action),

        Commands::Completions { shell } => {
            Cli::generate_completions(shell);
            Ok(())
        }
    }
}

fn require_session() -> Result<AuthSession> {
    load_session()?
        .ok_or_else(|| anyhow::anyhow!("Not signed in. Run 'tally login --email <email>' first."))
}

async fn launch_tui(
    view: View,
    range: Option<u32>,
    search: Option<String>,
    group: Option<GroupByArg>,
) -> Result<()> {
    let config = load_config()?;
    config.validate()?;
    let session = require_session()?;

    let window_days = range.unwrap_or(config.default_range_days);
    let window = TrailingWindow::from_days(window_days)
        .ok_or_else(|| anyhow::anyhow!("Range must be 7, 30 or 90 days"))?;
    let group_mode = match group {
        Some(GroupByArg::Project) => GroupMode::Project,
        _ => GroupMode::Date,
    };

    let api = ApiClient::new(&config, &session);
    let mut app = App::new(
        api,
        session.user.clone(),
        LaunchOptions {
            view,
            window,
            search,
            group_mode,
        },
    );

    let mut terminal = crate::ui::setup_terminal()?;
    let result = app.run(&mut terminal).await;
    crate::ui::restore_terminal()?;

    match result? {
        AppExit::SignedOut => {
            let auth = AuthClient::new(&config);
            if let Err(e) = auth.sign_out(&session).await {
                log::warn!("Server-side sign-out failed: {}", e);
            }
            clear_session()?;
            println!("Signed out {}", session.user.email);
        }
        AppExit::Quit => {}
    }

    Ok(())
}

async fn login(email: String, password: Option<String>) -> Result<()> {
    let config = load_config()?;
    config.validate()?;

    let password = match password.or_else(|| std::env::var("TALLY_PASSWORD").ok()) {
        Some(p) => p,
        None => prompt_password()?,
    };

    let auth = AuthClient::new(&config);
    let session = auth.sign_in(&email, &password).await?;
    store_session(&session)?;

    println!("Signed in as {}", session.user.email);
    Ok(())
}

async fn logout() -> Result<()> {
    let Some(session) = load_session()? else {
        println!("Not signed in");
        return Ok(());
    };

    let config = load_config()?;
    if config.validate().is_ok() {
        let auth = AuthClient::new(&config);
        if let Err(e) = auth.sign_out(&session).await {
            log::warn!("Server-side sign-out failed: {}", e);
        }
    }

    clear_session()?;
    println!("Signed out {}", session.user.email);
    Ok(())
}

async fn whoami() -> Result<()> {
    let config = load_config()?;
    config.validate()?;
    let session = require_session()?;

    let auth = AuthClient::new(&config);
    let user = auth.fetch_user(&session).await?;

    println!("{} ({})", user.email, user.id);
    Ok(())
}

async fn list_projects() -> Result<()> {
    let config = load_config()?;
    config.validate()?;
    let session = require_session()?;

    let api = ApiClient::new(&config, &session);
    let projects = api.active_projects().await?;

    if projects.is_empty() {
        println!("No active projects");
        return Ok(());
    }

    for project in &projects {
        let glyph = ProjectGlyph::resolve(project.icon.as_deref());
        println!("{} {}", glyph.symbol(), project.project_name);
    }
    Ok(())
}

/// Scripted single-row entry. Runs the same validation and batched insert
/// path as the form.
async fn add_task(
    project: Option<String>,
    task: Option<String>,
    date: Option<NaiveDate>,
    hours: Option<i64>,
    minutes: Option<i64>,
    notes: Option<String>,
) -> Result<()> {
    let config = load_config()?;
    config.validate()?;
    let session = require_session()?;

    let project_name = project.ok_or_else(|| {
        anyhow::anyhow!("--project is required (run 'tally add' with no flags for the form)")
    })?;
    let task_name = task.ok_or_else(|| anyhow::anyhow!("--task is required"))?;

    let api = ApiClient::new(&config, &session);
    let projects = api.active_projects().await?;
    let target = projects
        .iter()
        .find(|p| p.project_name.eq_ignore_ascii_case(&project_name))
        .ok_or_else(|| anyhow::anyhow!("No active project named '{}'", project_name))?;

    let today = Local::now().date_naive();
    let mut draft = TaskDraft::new(today);
    draft.project_id = Some(target.id);
    draft.task_name = task_name;
    if let Some(date) = date {
        draft.date = date;
    }
    if let Some(hours) = hours {
        draft.hours = hours.to_string();
    }
    if let Some(minutes) = minutes {
        draft.minutes = minutes.to_string();
    }
    draft.notes = notes.unwrap_or_default();

    let rows = validate_batch(&[draft], &projects, session.user.id, today)?;
    api.insert_tasks(&rows).await?;

    println!("1 task saved ({} on {})", rows[0].task_name, rows[0].date);
    Ok(())
}

fn handle_config_action(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config()?;
            let path = get_config_path()?;

            println!("Config file: {}", path.display());
            println!("backend_url = {}", config.backend_url);
            println!(
                "api_key = {}",
                if config.api_key.is_empty() {
                    "(not set)"
                } else {
                    "(set)"
                }
            );
            println!("default_range_days = {}", config.default_range_days);
            Ok(())
        }

        ConfigAction::Set { key, value } => {
            let mut config = load_config()?;
            config.set(&key, &value)?;
            save_config(&config)?;
            println!("Updated {}", key);
            Ok(())
        }
    }
}

fn prompt_password() -> Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim_end().to_string())
}
