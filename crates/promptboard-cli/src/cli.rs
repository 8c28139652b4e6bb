use clap::{Args, Parser, Subcommand};
use promptboard_domain::{CardId, ColumnId, Model};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "promptboard")]
#[command(about = "A terminal kanban board for composing and running LLM prompts", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Path to the board data file (or set PROMPTBOARD_FILE)
    #[arg(long, value_name = "FILE", env = "PROMPTBOARD_FILE")]
    pub file: Option<PathBuf>,

    /// Path to the credential file (or set PROMPTBOARD_CREDENTIAL_FILE)
    #[arg(long, value_name = "FILE", env = "PROMPTBOARD_CREDENTIAL_FILE")]
    pub credential_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Card operations
    Card(CardCommand),
    /// Credential operations
    Credential(CredentialCommand),
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct CardCommand {
    #[command(subcommand)]
    pub action: CardAction,
}

#[derive(Subcommand)]
pub enum CardAction {
    /// Create a new prompt card at the tail of To Do
    Create(CardCreateArgs),
    /// List cards, optionally restricted to one column
    List {
        #[arg(long)]
        column: Option<ColumnId>,
    },
    /// Get a specific card
    Get {
        #[arg(long)]
        id: CardId,
    },
    /// Move a card to a column, appending unless a position is given
    Move {
        #[arg(long)]
        id: CardId,
        #[arg(long)]
        column: ColumnId,
        #[arg(long)]
        position: Option<usize>,
    },
    /// Run a card's prompt against the completion API and wait for it
    Run {
        #[arg(long)]
        id: CardId,
        /// Compatible gateway to dispatch against instead of the default
        #[arg(long, value_name = "URL", env = "PROMPTBOARD_API_BASE")]
        api_base: Option<String>,
    },
    /// Export a completed card's result as a markdown file
    Export {
        #[arg(long)]
        id: CardId,
        /// Directory to write prompt_result_<id>.md into (default: cwd)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
pub struct CardCreateArgs {
    #[arg(long)]
    pub prompt: String,
    #[arg(long, default_value = "gpt-4o-mini")]
    pub model: Model,
    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,
    #[arg(long, default_value_t = 6000)]
    pub max_tokens: u32,
}

#[derive(Args)]
pub struct CredentialCommand {
    #[command(subcommand)]
    pub action: CredentialAction,
}

#[derive(Subcommand)]
pub enum CredentialAction {
    /// Store the API credential
    Set {
        #[arg(long)]
        value: String,
    },
    /// Show whether a credential is configured
    Status,
    /// Remove the stored credential
    Clear,
}
