//! List detail controller.
//!
//! A [`ListSession`] owns the local view of one list: its metadata and item
//! set. It is the only writer of that state. Mutations are applied locally
//! only after the server acknowledges them (optimistic-confirmed updates);
//! there is no refetch after a mutation, so the local view can drift from a
//! server that other clients are editing until the next [`ListSession::refresh`].
//!
//! State lives behind a mutex that is never held across a network call.
//! Overlapping operations on the same session therefore interleave at round
//! trips, and the last response to land wins.

mod batch;
mod state;

use std::collections::HashSet;

use parking_lot::Mutex;

use crate::api::ShoppingApi;
use crate::config::{ClearPolicy, Config};
use crate::error::{Result, ShoplistError};
use crate::notice::Notice;
use crate::sort;
use crate::types::{Item, ItemDraft, List};

pub use batch::{BatchFailure, BatchReport, BatchSummary, FailureSummary};
pub use state::SessionPhase;

use state::{LoadedList, SessionState};

/// Tuning for a list session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub clear_concurrency: usize,
    pub clear_policy: ClearPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            clear_concurrency: config.clear_concurrency,
            clear_policy: config.clear_policy,
        }
    }
}

/// Result of a bulk clear that did not fail.
#[derive(Debug)]
pub enum ClearOutcome {
    /// No item was bought; no request was made.
    NothingToClear,
    /// Every targeted delete succeeded.
    Cleared(BatchReport),
}

/// Local view of a single list, kept in sync with the server.
pub struct ListSession<A> {
    api: A,
    list_id: String,
    options: SessionOptions,
    state: Mutex<SessionState>,
    notice: Mutex<Option<Notice>>,
}

impl<A: ShoppingApi> ListSession<A> {
    /// Create a session in the `Loading` phase. Call [`ListSession::load`] to fetch.
    pub fn new(api: A, list_id: impl Into<String>, options: SessionOptions) -> Self {
        Self {
            api,
            list_id: list_id.into(),
            options,
            state: Mutex::new(SessionState::Loading),
            notice: Mutex::new(None),
        }
    }

    /// Create a session and load it.
    ///
    /// A failed load still returns the session, in the `Failed` phase, so the
    /// caller can offer a retry.
    pub async fn open(api: A, list_id: impl Into<String>, options: SessionOptions) -> Self {
        let session = Self::new(api, list_id, options);
        // The error is recorded in the Failed phase and the notice.
        let _ = session.load().await;
        session
    }

    pub fn list_id(&self) -> &str {
        &self.list_id
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.lock().phase()
    }

    /// Reason for the last failed load, while in the `Failed` phase.
    pub fn failure(&self) -> Option<String> {
        match &*self.state.lock() {
            SessionState::Failed(reason) => Some(reason.clone()),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<List> {
        self.state.lock().loaded().map(|l| l.list.clone())
    }

    /// Items in server order. Empty unless the session is ready.
    pub fn items(&self) -> Vec<Item> {
        self.state
            .lock()
            .loaded()
            .map(|l| l.items.clone())
            .unwrap_or_default()
    }

    /// Items in display order.
    pub fn display_items(&self) -> Vec<Item> {
        let mut items = self.items();
        sort::sort_items(&mut items);
        items
    }

    pub fn item(&self, item_id: &str) -> Option<Item> {
        self.state
            .lock()
            .loaded()
            .and_then(|l| l.get(item_id).cloned())
    }

    /// Take the most recent notification, if any.
    pub fn take_notice(&self) -> Option<Notice> {
        self.notice.lock().take()
    }

    fn notify(&self, notice: Notice) {
        *self.notice.lock() = Some(notice);
    }

    /// Log a failed operation and surface it as an error notice.
    fn report_failure(&self, action: &str, message: &str, error: &ShoplistError) {
        tracing::warn!(list_id = %self.list_id, "{action} failed: {error}");
        self.notify(Notice::error(message));
    }

    fn ensure_ready(&self) -> Result<()> {
        match self.phase() {
            SessionPhase::Ready => Ok(()),
            phase => Err(ShoplistError::NotReady(phase)),
        }
    }

    fn ensure_known(&self, item_id: &str) -> Result<()> {
        let known = self
            .state
            .lock()
            .loaded()
            .is_some_and(|l| l.get(item_id).is_some());
        if known {
            Ok(())
        } else {
            Err(ShoplistError::ItemNotFound(item_id.to_string()))
        }
    }

    /// Apply a confirmed mutation, if the session is still ready.
    ///
    /// A refresh may have started while the request was in flight; its
    /// result supersedes the patch.
    fn patch<R>(&self, f: impl FnOnce(&mut LoadedList) -> R) -> Option<R> {
        self.state.lock().loaded_mut().map(f)
    }

    fn reject_invalid(&self, error: ShoplistError) -> ShoplistError {
        if let ShoplistError::Validation(message) = &error {
            self.notify(Notice::warning(message.clone()));
        }
        error
    }

    /// Fetch list metadata and items concurrently, then become ready.
    ///
    /// Either request failing moves the session to `Failed`; metadata is
    /// never shown without its items.
    pub async fn load(&self) -> Result<()> {
        *self.state.lock() = SessionState::Loading;

        let result = futures::try_join!(
            self.api.get_list(&self.list_id),
            self.api.get_items(&self.list_id),
        );

        match result {
            Ok((list, items)) => {
                tracing::debug!(list_id = %self.list_id, items = items.len(), "list loaded");
                *self.state.lock() = SessionState::Ready(LoadedList::new(list, items));
                Ok(())
            }
            Err(e) => {
                *self.state.lock() = SessionState::Failed(e.to_string());
                self.report_failure("load list", "Failed to load list.", &e);
                Err(e)
            }
        }
    }

    /// Refetch a ready list to pick up changes made elsewhere.
    pub async fn refresh(&self) -> Result<()> {
        self.ensure_ready()?;
        self.load().await
    }

    /// Retry a failed load.
    pub async fn retry(&self) -> Result<()> {
        match self.phase() {
            SessionPhase::Failed => self.load().await,
            phase => Err(ShoplistError::NotReady(phase)),
        }
    }

    /// Add an item. The server-assigned item is merged into local state.
    pub async fn add(&self, draft: ItemDraft) -> Result<Item> {
        self.ensure_ready()?;
        draft.validate().map_err(|e| self.reject_invalid(e))?;

        match self.api.add_item(&self.list_id, &draft).await {
            Ok(item) => {
                self.patch(|loaded| loaded.upsert(item.clone()));
                self.notify(Notice::info("Item added!"));
                Ok(item)
            }
            Err(e) => {
                self.report_failure("add item", "Failed to add item.", &e);
                Err(e)
            }
        }
    }

    /// Flip an item's bought flag once the server acknowledges the toggle.
    pub async fn toggle(&self, item_id: &str) -> Result<()> {
        self.ensure_ready()?;
        self.ensure_known(item_id)?;

        match self.api.toggle_item(&self.list_id, item_id).await {
            Ok(()) => {
                let bought = self.patch(|loaded| {
                    loaded.get_mut(item_id).map(|item| {
                        item.bought = !item.bought;
                        item.bought
                    })
                });
                match bought.flatten() {
                    Some(true) => self.notify(Notice::info("Item marked as bought!")),
                    Some(false) => self.notify(Notice::info("Item marked as not bought.")),
                    None => {
                        tracing::debug!(list_id = %self.list_id, %item_id, "toggled item no longer present");
                    }
                }
                Ok(())
            }
            Err(e) => {
                self.report_failure("toggle item", "Failed to update item.", &e);
                Err(e)
            }
        }
    }

    /// Replace an item with a full record.
    ///
    /// On success the local item becomes exactly `item`; fields are never
    /// merged. Only fields that differ from the local copy are validated.
    pub async fn edit(&self, item: Item) -> Result<()> {
        self.ensure_ready()?;
        let current = self
            .item(&item.id)
            .ok_or_else(|| ShoplistError::ItemNotFound(item.id.clone()))?;
        item.validate_edit(&current).map_err(|e| self.reject_invalid(e))?;

        match self.api.update_item(&self.list_id, &item.id, &item).await {
            Ok(_) => {
                let item_id = item.id.clone();
                let replaced = self.patch(|loaded| match loaded.get_mut(&item_id) {
                    Some(existing) => {
                        *existing = item;
                        true
                    }
                    None => false,
                });
                if replaced != Some(true) {
                    tracing::debug!(list_id = %self.list_id, %item_id, "edited item no longer present");
                }
                self.notify(Notice::info("Item updated!"));
                Ok(())
            }
            Err(e) => {
                self.report_failure("update item", "Failed to update item.", &e);
                Err(e)
            }
        }
    }

    /// Delete an item; it leaves local state only after the server confirms.
    pub async fn delete(&self, item_id: &str) -> Result<()> {
        self.ensure_ready()?;
        self.ensure_known(item_id)?;

        match self.api.delete_item(&self.list_id, item_id).await {
            Ok(()) => {
                self.patch(|loaded| loaded.remove(item_id));
                self.notify(Notice::info("Item deleted!"));
                Ok(())
            }
            Err(e) => {
                self.report_failure("delete item", "Failed to delete item.", &e);
                Err(e)
            }
        }
    }

    /// Delete every bought item.
    ///
    /// Deletes run concurrently, bounded by the session's clear concurrency.
    /// Once the batch settles, local state is reconciled per the clear
    /// policy. Any failed delete turns the result into
    /// [`ShoplistError::PartialBatch`] carrying the full report; no delete is
    /// retried or rolled back.
    pub async fn clear_bought(&self) -> Result<ClearOutcome> {
        self.ensure_ready()?;

        let targets = self
            .state
            .lock()
            .loaded()
            .map(LoadedList::bought_ids)
            .unwrap_or_default();

        if targets.is_empty() {
            self.notify(Notice::info("No bought items to remove!"));
            return Ok(ClearOutcome::NothingToClear);
        }

        tracing::debug!(
            list_id = %self.list_id,
            count = targets.len(),
            concurrency = self.options.clear_concurrency,
            "clearing bought items"
        );

        let report = batch::delete_items(
            &self.api,
            &self.list_id,
            targets,
            self.options.clear_concurrency,
        )
        .await;

        let remove: HashSet<&str> = match self.options.clear_policy {
            ClearPolicy::RemoveAll => report
                .succeeded
                .iter()
                .map(String::as_str)
                .chain(report.failed_ids())
                .collect(),
            ClearPolicy::RemoveConfirmed => report.succeeded.iter().map(String::as_str).collect(),
        };
        self.patch(|loaded| loaded.remove_all(&remove));

        if report.is_complete() {
            self.notify(Notice::info("Bought items cleared!"));
            return Ok(ClearOutcome::Cleared(report));
        }

        for failure in &report.failed {
            tracing::warn!(
                list_id = %self.list_id,
                item_id = %failure.item_id,
                "delete during clear failed: {}",
                failure.error
            );
        }
        self.notify(Notice::error(format!(
            "Failed to clear bought items ({} of {} deletes failed).",
            report.failed.len(),
            report.attempted()
        )));
        Err(ShoplistError::PartialBatch { report })
    }
}
