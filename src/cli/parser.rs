use crate::export::ExportFormat;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for rPomodoro
/// CLI application to record pomodoros per project with SQLite
#[derive(Parser)]
#[command(
    name = "rpomodoro",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record pomodoros per project and report the work done in any time window (SQLite)",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run without writing the user config file (used by tests)
    #[arg(global = true, long = "sandbox", hide = true)]
    pub sandbox: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Optional closed time window shared by the reporting commands.
///
/// Accepts Unix seconds, RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` (local) or
/// `YYYY-MM-DD` (start of day for --from, end of day for --to).
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Only pomodoros starting at or after this time
    #[arg(long = "from", value_name = "TIME")]
    pub from: Option<String>,

    /// Only pomodoros starting at or before this time
    #[arg(long = "to", value_name = "TIME")]
    pub to: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Check the key and whether any pomodoro has been recorded
    Ping {
        /// Shared key (falls back to $RPOMODORO_KEY)
        #[arg(long = "key")]
        key: Option<String>,

        #[arg(long = "json", help = "Print the answer as JSON")]
        json: bool,
    },

    /// Record a completed pomodoro
    Record {
        /// Project name (defaults to the current directory name)
        #[arg(long, short = 'n')]
        name: Option<String>,

        /// Duration: seconds or a span like 25m, 1h30m (defaults to config)
        #[arg(long, short = 'd')]
        duration: Option<String>,

        /// Explicit start time for backfilled entries (defaults to now - duration)
        #[arg(long, short = 's', value_name = "TIME")]
        start: Option<String>,

        /// Mark the entry as synthetic / test data
        #[arg(long, short = 't')]
        test: bool,

        /// Shared key (falls back to $RPOMODORO_KEY)
        #[arg(long = "key")]
        key: Option<String>,

        #[arg(long = "json", help = "Print the stored pomodoro as JSON")]
        json: bool,
    },

    /// Show one pomodoro by id
    Pomodoro {
        id: i64,

        #[arg(long = "json")]
        json: bool,
    },

    /// Show one project's totals and pomodoros
    Project {
        /// Project name (normalized before lookup)
        name: String,

        #[command(flatten)]
        window: WindowArgs,

        #[arg(long = "json")]
        json: bool,
    },

    /// List every project with its totals
    Projects {
        #[command(flatten)]
        window: WindowArgs,

        #[arg(long = "json")]
        json: bool,

        #[arg(long = "details", help = "Also list each project's pomodoros")]
        details: bool,
    },

    /// List the projects worked on inside a time window
    Active {
        #[command(flatten)]
        window: WindowArgs,

        #[arg(long = "json")]
        json: bool,

        #[arg(long = "details", help = "Also list each project's pomodoros")]
        details: bool,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,

        #[arg(long, short = 'f', help = "Overwrite the destination without asking")]
        force: bool,
    },

    /// Export pomodoros to CSV or JSON
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[command(flatten)]
        window: WindowArgs,

        #[arg(long, short = 'f')]
        force: bool,
    },
}
