use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use notes_core::NoteId;

#[derive(Parser)]
#[command(name = "notes")]
#[command(about = "Read and write notes on a notes server from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL for this invocation (overrides env and config file)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign up, sign in and inspect the stored session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// List notes
    List {
        /// Number of notes to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Only show notes whose title or content contains this text
        #[arg(short, long)]
        query: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a new note
    #[command(alias = "new")]
    Add {
        /// Note title
        title: String,
        /// Note content (read from stdin when omitted and piped)
        content: Vec<String>,
    },
    /// Change the title and/or content of a note
    Edit {
        /// Note ID
        id: NoteId,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New content
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: NoteId,
    },
    /// Download a note as PDF
    Export {
        /// Note ID
        id: NoteId,
        /// Print the export URL instead of downloading
        #[arg(long)]
        open_url: bool,
    },
    /// Show the recent-notes widget snapshot
    Widget {
        /// Widget layout to render
        #[arg(long, value_enum, default_value_t = WidgetSize::Small)]
        size: WidgetSize,
        /// Output the raw snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the CLI config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum WidgetSize {
    Small,
    Medium,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Create an account, then sign in with it
    Signup {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Sign in and store the access token in the keychain
    Login {
        /// Account email
        #[arg(long, value_name = "EMAIL")]
        email: String,
        /// Account password
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// Show the account behind the stored token
    Me,
    /// Show whether a token is stored and still accepted
    Status,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create or update the config file
    Init {
        /// API base URL
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Directory for downloaded PDFs
        #[arg(long, value_name = "PATH")]
        export_dir: Option<String>,
        /// Directory shared with the widget
        #[arg(long, value_name = "PATH")]
        widget_cache_dir: Option<String>,
    },
    /// Print the effective configuration
    Show,
}
