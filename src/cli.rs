use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "users")]
#[command(about = "Manage user records stored in a JSON file", version)]
#[command(after_help = "EXAMPLES:
    users                             Start the interactive menu
    users add Ann ann@example.com     Add a user
    users list --all                  List users, including inactive ones
    users get 3                       Show one user
    users delete 3 --yes              Mark a user inactive")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to the users file (default: users.json, or $USERS_FILE)
    #[arg(long, short, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Output as JSON for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive menu (default)
    Menu,
    /// Add a new user
    #[command(after_help = "EXAMPLES:
    users add \"Ann Lee\" ann@example.com")]
    Add {
        /// Display name
        name: String,
        /// Email address, must be unique
        email: String,
    },
    /// List users
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    users list
    users list --all --json"
    )]
    List {
        /// Include inactive (deleted) users
        #[arg(long, short)]
        all: bool,
    },
    /// Show user details
    Get {
        /// User ID
        id: u64,
    },
    /// Mark a user inactive
    #[command(
        alias = "rm",
        after_help = "EXAMPLES:
    users delete 3
    users delete 3 --yes"
    )]
    Delete {
        /// User ID
        id: u64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    users completions bash > ~/.bash_completion.d/users
    users completions zsh > ~/.zfunc/_users")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
