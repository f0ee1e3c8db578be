//! Item commands operating on a single list session.

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, format_item_line, open_session, print_notice};
use crate::cli::OutputOptions;
use crate::error::{Result, ShoplistError};
use crate::session::ClearOutcome;
use crate::sort;
use crate::types::{ItemDraft, Section};

/// Fields for `add`.
pub struct AddOptions {
    pub name: String,
    pub section: Option<String>,
    pub quantity: u32,
}

/// Fields for `edit`. Unset fields keep their current value.
#[derive(Default)]
pub struct EditOptions {
    pub name: Option<String>,
    pub section: Option<String>,
    pub quantity: Option<u32>,
}

impl EditOptions {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.section.is_none() && self.quantity.is_none()
    }
}

/// Display a list with its items grouped by section
pub async fn cmd_show(list_id: &str, output: OutputOptions) -> Result<()> {
    let session = open_session(list_id).await?;
    let list = session
        .list()
        .ok_or(ShoplistError::NotReady(session.phase()))?;
    let items = session.items();
    let groups = sort::group_by_section(&items);

    let json_output = json!({
        "id": list.id,
        "name": list.name,
        "items": sort::display_order(&items),
    });

    let mut text = format!("{}\n", list.name.bold());
    if groups.is_empty() {
        text.push_str(&"No items yet.".dimmed().to_string());
    }
    for group in &groups {
        let header = if group.bought {
            format!("{} (bought)", group.section).dimmed().to_string()
        } else {
            group.section.cyan().to_string()
        };
        text.push_str(&format!("\n{header}\n"));
        for item in &group.items {
            text.push_str(&format!("  {}\n", format_item_line(item)));
        }
    }

    CommandOutput::new(json_output)
        .with_text(text.trim_end().to_string())
        .print(output)
}

/// Add an item to a list
pub async fn cmd_add(list_id: &str, options: AddOptions, output: OutputOptions) -> Result<()> {
    let section = match options.section.as_deref() {
        Some(s) => s.parse::<Section>()?,
        None => Section::DEFAULT,
    };
    let draft = ItemDraft::new(options.name)
        .section(section)
        .quantity(options.quantity);
    // Reject before touching the network
    draft.validate()?;

    let session = open_session(list_id).await?;
    let result = session.add(draft).await;
    print_notice(session.take_notice());
    let item = result?;

    CommandOutput::new(json!({
        "action": "item_added",
        "list_id": list_id,
        "item": item,
    }))
    .with_text(format_item_line(&item))
    .print(output)
}

/// Replace an item with its current fields overlaid by `options`
pub async fn cmd_edit(
    list_id: &str,
    item_id: &str,
    options: EditOptions,
    output: OutputOptions,
) -> Result<()> {
    if options.is_empty() {
        return Err(ShoplistError::Validation(
            "nothing to change; pass --name, --section or --quantity".to_string(),
        ));
    }
    let section = options
        .section
        .as_deref()
        .map(str::parse::<Section>)
        .transpose()?;

    let session = open_session(list_id).await?;
    let mut item = session
        .item(item_id)
        .ok_or_else(|| ShoplistError::ItemNotFound(item_id.to_string()))?;

    if let Some(name) = options.name {
        item.name = name;
    }
    if let Some(section) = section {
        item.section = section.label().to_string();
    }
    if let Some(quantity) = options.quantity {
        item.quantity = quantity;
    }

    let result = session.edit(item.clone()).await;
    print_notice(session.take_notice());
    result?;

    CommandOutput::new(json!({
        "action": "item_updated",
        "list_id": list_id,
        "item": item,
    }))
    .with_text(format_item_line(&item))
    .print(output)
}

/// Flip an item's bought flag
pub async fn cmd_toggle(list_id: &str, item_id: &str, output: OutputOptions) -> Result<()> {
    let session = open_session(list_id).await?;
    let result = session.toggle(item_id).await;
    print_notice(session.take_notice());
    result?;

    let item = session.item(item_id);
    let bought = item.as_ref().map(|i| i.bought);
    CommandOutput::new(json!({
        "action": "item_toggled",
        "list_id": list_id,
        "item_id": item_id,
        "bought": bought,
    }))
    .with_text(item.as_ref().map(format_item_line).unwrap_or_default())
    .print(output)
}

/// Remove an item
pub async fn cmd_rm(list_id: &str, item_id: &str, output: OutputOptions) -> Result<()> {
    let session = open_session(list_id).await?;
    let result = session.delete(item_id).await;
    print_notice(session.take_notice());
    result?;

    CommandOutput::new(json!({
        "action": "item_deleted",
        "list_id": list_id,
        "item_id": item_id,
    }))
    .with_text(format!("Removed {}", item_id.cyan()))
    .print(output)
}

/// Remove every bought item from a list
pub async fn cmd_clear(list_id: &str, output: OutputOptions) -> Result<()> {
    let session = open_session(list_id).await?;
    let result = session.clear_bought().await;
    print_notice(session.take_notice());

    match result {
        Ok(ClearOutcome::NothingToClear) => CommandOutput::new(json!({
            "action": "bought_cleared",
            "list_id": list_id,
            "succeeded": [],
            "failed": [],
        }))
        .print(output),
        Ok(ClearOutcome::Cleared(report)) => CommandOutput::new(json!({
            "action": "bought_cleared",
            "list_id": list_id,
            "succeeded": report.summary().succeeded,
            "failed": [],
        }))
        .with_text(format!("Removed {} bought item(s)", report.succeeded.len()))
        .print(output),
        Err(ShoplistError::PartialBatch { report }) => {
            let summary = report.summary();
            let mut text = format!(
                "Removed {} of {} bought item(s)",
                summary.succeeded.len(),
                report.attempted()
            );
            for failure in &summary.failed {
                text.push_str(&format!(
                    "\n  {} {}",
                    failure.item_id.red(),
                    failure.error.dimmed()
                ));
            }
            CommandOutput::new(json!({
                "action": "bought_cleared",
                "list_id": list_id,
                "succeeded": summary.succeeded,
                "failed": summary.failed,
            }))
            .with_text(text)
            .print(output)?;
            Err(ShoplistError::PartialBatch { report })
        }
        Err(e) => Err(e),
    }
}

/// List the section vocabulary
pub fn cmd_sections(output: OutputOptions) -> Result<()> {
    let labels = Section::labels();
    let text = labels
        .iter()
        .map(|label| {
            if *label == Section::DEFAULT.label() {
                format!("{label} {}", "(default)".dimmed())
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    CommandOutput::new(json!(labels))
        .with_text(text)
        .print(output)
}
