use clap::{Parser, Subcommand};

/// How a command renders its result.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    pub json: bool,
}

impl OutputOptions {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

#[derive(Parser)]
#[command(name = "shoplist")]
#[command(about = "Shared shopping lists from the terminal")]
#[command(version)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `shoplist=trace` (overrides SHOPLIST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show all lists
    #[command(visible_alias = "ls")]
    Lists {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Poll the list collection and print it whenever it changes (Ctrl-C to stop)
    Watch {
        /// Seconds between polls (default: poll_interval_secs from config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Output one JSON document per change
        #[arg(long)]
        json: bool,
    },

    /// Create a new list
    Create {
        /// List name
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a list and all of its items
    DeleteList {
        /// List ID
        list_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Display a list's items grouped by section
    #[command(visible_alias = "s")]
    Show {
        /// List ID
        list_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an item to a list
    #[command(visible_alias = "a")]
    Add {
        /// List ID
        list_id: String,

        /// Item name
        name: String,

        /// Section (see `shoplist sections`, default: Other)
        #[arg(short, long)]
        section: Option<String>,

        /// Quantity (default: 1)
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replace an item's name, section or quantity
    Edit {
        /// List ID
        list_id: String,

        /// Item ID
        item_id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New section
        #[arg(short, long)]
        section: Option<String>,

        /// New quantity
        #[arg(short, long)]
        quantity: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flip an item between bought and not bought
    #[command(visible_alias = "t")]
    Toggle {
        /// List ID
        list_id: String,

        /// Item ID
        item_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove an item
    Rm {
        /// List ID
        list_id: String,

        /// Item ID
        item_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove every bought item from a list
    Clear {
        /// List ID
        list_id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available sections
    Sections {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get a configuration value
    Get {
        /// Config key (api_url, poll_interval_secs, clear_concurrency, clear_policy, request_timeout_secs)
        key: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a configuration value
    Set {
        /// Config key
        key: String,

        /// Value to set
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the config file location
    Path,
}
