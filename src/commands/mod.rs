mod config;
mod items;
mod lists;

pub use config::{cmd_config_get, cmd_config_path, cmd_config_set, cmd_config_show};
pub use items::{
    AddOptions, EditOptions, cmd_add, cmd_clear, cmd_edit, cmd_rm, cmd_sections, cmd_show,
    cmd_toggle,
};
pub use lists::{cmd_create, cmd_delete_list, cmd_lists, cmd_watch};

use owo_colors::OwoColorize;
use serde_json::Value;

use crate::api::HttpClient;
use crate::cli::OutputOptions;
use crate::collection::ListCollection;
use crate::config::Config;
use crate::error::Result;
use crate::notice::{Notice, NoticeLevel};
use crate::session::{ListSession, SessionOptions};
use crate::types::{Item, List};

/// A command result that can be rendered as JSON or as text.
pub struct CommandOutput {
    json: Value,
    text: Option<String>,
}

impl CommandOutput {
    pub fn new(json: Value) -> Self {
        Self { json, text: None }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Print JSON when requested, otherwise the text form (if any).
    pub fn print(self, output: OutputOptions) -> Result<()> {
        if output.json {
            println!("{}", serde_json::to_string_pretty(&self.json)?);
        } else if let Some(text) = self.text {
            println!("{text}");
        }
        Ok(())
    }
}

/// Write a notice to stderr, colored by level.
pub fn print_notice(notice: Option<Notice>) {
    let Some(notice) = notice else {
        return;
    };
    let line = match notice.level {
        NoticeLevel::Info => notice.message.green().to_string(),
        NoticeLevel::Warning => notice.message.yellow().to_string(),
        NoticeLevel::Error => notice.message.red().to_string(),
    };
    eprintln!("{line}");
}

/// Format an item for single-line display
pub fn format_item_line(item: &Item) -> String {
    let id_padded = format!("{:8}", item.id);

    let (mark, name) = if item.bought {
        (
            "[x]".green().to_string(),
            item.name.dimmed().strikethrough().to_string(),
        )
    } else {
        ("[ ]".to_string(), item.name.clone())
    };

    let quantity = if item.quantity > 1 {
        format!(" x{}", item.quantity).yellow().to_string()
    } else {
        String::new()
    };

    format!("{} {} {}{}", mark, id_padded.cyan(), name, quantity)
}

/// Format a list for single-line display
pub fn format_list_line(list: &List) -> String {
    let id_padded = format!("{:8}", list.id);
    format!("{} {}", id_padded.cyan(), list.name)
}

fn connect() -> Result<(Config, HttpClient)> {
    let config = Config::load()?;
    let client = HttpClient::from_config(&config)?;
    Ok((config, client))
}

pub(crate) fn collection() -> Result<(Config, ListCollection<HttpClient>)> {
    let (config, client) = connect()?;
    Ok((config, ListCollection::new(client)))
}

/// Open a session on `list_id` and load it.
pub(crate) async fn open_session(list_id: &str) -> Result<ListSession<HttpClient>> {
    let (config, client) = connect()?;
    let session = ListSession::new(client, list_id, SessionOptions::from(&config));
    if let Err(e) = session.load().await {
        print_notice(session.take_notice());
        return Err(e);
    }
    Ok(session)
}
