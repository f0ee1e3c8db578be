//! List collection commands.
//!
//! - `lists`: show every list once
//! - `watch`: keep polling and reprint on change
//! - `create` / `delete-list`: mutate the collection, then refetch it

use std::sync::Arc;
use std::time::Duration;

use owo_colors::OwoColorize;
use serde_json::json;

use super::{CommandOutput, collection, format_list_line, print_notice};
use crate::cli::OutputOptions;
use crate::collection::CollectionSnapshot;
use crate::error::{Result, ShoplistError};
use crate::types::List;

fn lists_text(lists: &[List]) -> String {
    if lists.is_empty() {
        return "No lists yet.".dimmed().to_string();
    }
    lists
        .iter()
        .map(format_list_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Show all lists
pub async fn cmd_lists(output: OutputOptions) -> Result<()> {
    let (_, collection) = collection()?;
    let lists = collection.refresh().await?;

    CommandOutput::new(json!(lists))
        .with_text(lists_text(&lists))
        .print(output)
}

fn print_snapshot(snapshot: &CollectionSnapshot, output: OutputOptions) -> Result<()> {
    if output.json {
        let doc = json!({
            "lists": snapshot.lists,
            "loaded": snapshot.loaded,
            "last_error": snapshot.last_error,
        });
        println!("{}", serde_json::to_string(&doc)?);
        return Ok(());
    }

    if let Some(error) = &snapshot.last_error {
        eprintln!("{}", format!("Refresh failed: {error}").red());
        if snapshot.loaded {
            return Ok(());
        }
    }
    if snapshot.loaded {
        println!(
            "{}",
            format!("Lists ({})", snapshot.lists.len()).cyan().bold()
        );
        println!("{}\n", lists_text(&snapshot.lists));
    }
    Ok(())
}

/// Poll the collection until Ctrl-C, printing each new snapshot
pub async fn cmd_watch(interval_secs: Option<u64>, output: OutputOptions) -> Result<()> {
    let (config, collection) = collection()?;
    let period = match interval_secs {
        Some(0) => {
            return Err(ShoplistError::Validation(
                "interval must be at least 1 second".to_string(),
            ));
        }
        Some(secs) => Duration::from_secs(secs),
        None => config.poll_interval(),
    };

    let collection = Arc::new(collection);
    let mut snapshots = collection.subscribe();
    let poller = Arc::clone(&collection).start_polling(period);
    tracing::info!(period_secs = period.as_secs(), "watching lists");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let result = loop {
        tokio::select! {
            biased;
            signal = &mut ctrl_c => {
                if let Err(e) = signal {
                    tracing::warn!("listening for Ctrl-C failed: {e}");
                }
                break Ok(());
            }
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let snapshot = snapshots.borrow_and_update().clone();
                if let Err(e) = print_snapshot(&snapshot, output) {
                    break Err(e);
                }
            }
        }
    };

    poller.stop().await;
    result
}

/// Create a new list
pub async fn cmd_create(name: &str, output: OutputOptions) -> Result<()> {
    let (_, collection) = collection()?;
    let result = collection.create(name).await;
    print_notice(collection.take_notice());
    let list = result?;

    CommandOutput::new(json!({
        "action": "list_created",
        "id": list.id,
        "name": list.name,
    }))
    .with_text(format!("Created {} {}", list.id.cyan(), list.name))
    .print(output)
}

/// Delete a list
pub async fn cmd_delete_list(list_id: &str, output: OutputOptions) -> Result<()> {
    let (_, collection) = collection()?;
    let result = collection.delete(list_id).await;
    print_notice(collection.take_notice());
    result?;

    CommandOutput::new(json!({
        "action": "list_deleted",
        "id": list_id,
    }))
    .with_text(format!("Deleted {}", list_id.cyan()))
    .print(output)
}
