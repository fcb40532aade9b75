use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "civiclens",
    about = "CivicLens: geo-anchored civic issue reporting and engagement",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage profile rows in the state file
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Report issues and engage with them
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },

    /// Read and maintain a recipient's inbox
    Notifications {
        #[command(subcommand)]
        command: NotificationsCommands,
    },

    /// Top contributors by received upvotes
    Leaderboard {
        /// Maximum rows to show
        #[arg(long, default_value_t = 10)]
        limit: i64,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recompute engagement tallies and flag drift against stored counts
    Check {
        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum UserCommands {
    /// Add a profile row
    Add {
        /// Display username (letters, digits, underscores, hyphens)
        username: String,

        /// Optional explicit user ID
        #[arg(long)]
        id: Option<String>,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List profile rows
    List {
        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum IssueCommands {
    /// Report a new issue
    Report {
        /// Issue title
        title: String,

        /// What is wrong and where
        #[arg(long)]
        description: String,

        /// Category label
        #[arg(long)]
        category: String,

        /// Optional subcategory
        #[arg(long)]
        subcategory: Option<String>,

        /// Latitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in degrees
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,

        /// Optional area name
        #[arg(long)]
        area_name: Option<String>,

        /// Optional image URL
        #[arg(long)]
        image_url: Option<String>,

        /// Acting user ID (the reporter)
        #[arg(long)]
        reporter: String,

        /// Optional TOML policy file with an [engagement] table
        #[arg(long)]
        policy: Option<String>,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List issues, newest first
    List {
        /// Filter by status (reported, under review, work in progress, resolved)
        #[arg(long)]
        status: Option<String>,

        /// Filter by exact category
        #[arg(long)]
        category: Option<String>,

        /// Filter by area name substring (case-insensitive)
        #[arg(long)]
        area: Option<String>,

        /// Filter by reporter user ID
        #[arg(long)]
        reporter: Option<String>,

        /// Rows to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Maximum rows to show
        #[arg(long, default_value_t = 50)]
        limit: usize,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one issue
    Show {
        /// Issue ID
        id: String,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Move an issue's lifecycle status
    SetStatus {
        /// Issue ID
        id: String,

        /// New status: reported, under review, work in progress, resolved
        status: String,

        /// Acting user ID
        #[arg(long)]
        actor: String,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cast, toggle, or switch a vote
    Vote {
        /// Issue ID
        id: String,

        /// Vote kind: up or down
        kind: String,

        /// Acting user ID (the voter)
        #[arg(long)]
        voter: String,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Comment on an issue
    Comment {
        /// Issue ID
        id: String,

        /// Comment text
        body: String,

        /// Acting user ID (the author)
        #[arg(long)]
        author: String,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List an issue's comments, oldest first
    Comments {
        /// Issue ID
        id: String,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum NotificationsCommands {
    /// Page a recipient's notifications, newest first
    List {
        /// Recipient user ID
        #[arg(long)]
        recipient: String,

        /// Rows to skip
        #[arg(long, default_value_t = 0)]
        skip: usize,

        /// Maximum rows to show (defaults to the policy page size)
        #[arg(long)]
        limit: Option<i64>,

        /// Optional TOML policy file with an [engagement] table
        #[arg(long)]
        policy: Option<String>,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Mark one notification read
    MarkRead {
        /// Notification ID
        id: String,

        /// Acting user ID (must be the recipient)
        #[arg(long)]
        actor: String,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drop every notification addressed to the actor
    Clear {
        /// Acting user ID
        #[arg(long)]
        actor: String,

        /// Path to state JSONL
        #[arg(long, default_value = ".civiclens/state.jsonl")]
        state: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
