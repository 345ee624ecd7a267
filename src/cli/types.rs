use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Task time tracking from the terminal")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "Tally Contributors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, short, help = "Verbose output")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in to the backend")]
    Login {
        #[arg(long, help = "Account email")]
        email: String,

        #[arg(
            long,
            help = "Account password (falls back to TALLY_PASSWORD, then a prompt)"
        )]
        password: Option<String>,
    },

    #[command(about = "Sign out and clear the stored session")]
    Logout,

    #[command(about = "Show the signed-in user")]
    Whoami,

    #[command(about = "List active projects")]
    Projects,

    #[command(about = "Add tasks (opens the form unless flags are given)")]
    Add {
        #[arg(long, help = "Project name")]
        project: Option<String>,

        #[arg(long, help = "Task name")]
        task: Option<String>,

        #[arg(long, help = "Date (YYYY-MM-DD, defaults to today)")]
        date: Option<NaiveDate>,

        #[arg(long, help = "Hours (0-23)")]
        hours: Option<i64>,

        #[arg(long, help = "Minutes (0-59)")]
        minutes: Option<i64>,

        #[arg(long, help = "Optional notes")]
        notes: Option<String>,
    },

    #[command(about = "Interactive dashboard")]
    Dashboard {
        #[arg(long, help = "Trailing window in days (7, 30 or 90)")]
        range: Option<u32>,
    },

    #[command(about = "Browse task history")]
    History {
        #[arg(long, help = "Filter by task name")]
        search: Option<String>,

        #[arg(long, value_enum, help = "Group rows by date or project")]
        group: Option<GroupByArg>,
    },

    #[command(about = "Configuration management")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    #[command(about = "Generate shell completions", hide = true)]
    Completions {
        #[arg(help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    #[command(about = "Show the current configuration")]
    Show,

    #[command(about = "Set a configuration value")]
    Set {
        #[arg(help = "Key (backend_url, api_key, default_range_days)")]
        key: String,

        #[arg(help = "New value")]
        value: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum GroupByArg {
    Date,
    Project,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

impl Cli {
    pub fn generate_completions(shell: Shell) {
        use clap_complete::{generate, shells};
        use std::io;

        let mut cmd = Self::command();
        match shell {
            Shell::Bash => generate(shells::Bash, &mut cmd, "tally", &mut io::stdout()),
            Shell::Zsh => generate(shells::Zsh, &mut cmd, "tally", &mut io::stdout()),
            Shell::Fish => generate(shells::Fish, &mut cmd, "tally", &mut io::stdout()),
            Shell::PowerShell => generate(shells::PowerShell, &mut cmd, "tally", &mut io::stdout()),
        }
    }
}
