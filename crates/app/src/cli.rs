//! Command-line arguments.

use clap::{Args, Parser, Subcommand};

/// bgl - A command line tool for Backlog
#[derive(Debug, Parser)]
#[command(name = "bgl")]
#[command(author, version, about = "bgl - A command line tool for Backlog", long_about = None)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in, log out and inspect the stored token
    #[command(subcommand)]
    Auth(AuthCommand),

    /// View and update issues
    #[command(subcommand)]
    Issue(IssueCommand),

    /// List, view and add issue comments
    #[command(subcommand)]
    Comment(CommentCommand),

    /// List project statuses
    #[command(subcommand)]
    Status(StatusCommand),
}

/// `bgl auth` subcommands.
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Log in to a Backlog space through the browser
    Login {
        /// Space domain, e.g. myspace.backlog.com (prompted if omitted)
        #[arg(long, short)]
        space: Option<String>,
    },

    /// Remove the stored tokens
    Logout,

    /// Exchange the refresh token for a new access token
    Refresh,

    /// Show the stored token state
    Status,
}

/// Output options shared by read commands.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
    /// Print the JSON response instead of Markdown
    #[arg(long)]
    pub raw: bool,
}

/// `bgl issue` subcommands.
#[derive(Debug, Subcommand)]
pub enum IssueCommand {
    /// Show an issue
    View {
        /// Issue key or id, e.g. PROJ-123
        issue: String,

        /// Output format.
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Change an issue's status
    UpdateStatus {
        /// Issue key or id
        issue: String,

        /// Status id (selected interactively if omitted)
        #[arg(long)]
        status: Option<i64>,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,

        /// Output format.
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// `bgl comment` subcommands.
#[derive(Debug, Subcommand)]
pub enum CommentCommand {
    /// List the comments of an issue
    List {
        /// Issue key or id
        issue: String,

        /// Output format.
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show one comment
    View {
        /// Issue key or id
        issue: String,

        /// Comment id
        comment_id: String,

        /// Output format.
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Add a comment to an issue
    Add {
        /// Issue key or id
        issue: String,

        /// Comment text (prompted if omitted)
        #[arg(long, short)]
        content: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,

        /// Output format.
        #[command(flatten)]
        output: OutputArgs,
    },
}

/// `bgl status` subcommands.
#[derive(Debug, Subcommand)]
pub enum StatusCommand {
    /// List the statuses of a project
    List {
        /// Project key or id
        project: String,

        /// Output format.
        #[command(flatten)]
        output: OutputArgs,
    },
}
