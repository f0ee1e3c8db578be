//! List collection view.
//!
//! Tracks the set of lists on the server. The collection is refreshed on
//! demand and, while a [`PollHandle`] is alive, on a fixed interval so lists
//! created by other clients show up without a manual reload. The latest
//! snapshot is published on a `tokio::sync::watch` channel.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::api::ShoppingApi;
use crate::error::{Result, ShoplistError};
use crate::notice::Notice;
use crate::types::List;

/// Default period between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Latest known state of the list collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionSnapshot {
    pub lists: Vec<List>,
    /// Whether at least one fetch has succeeded.
    pub loaded: bool,
    /// Error from the most recent fetch, cleared by the next success.
    pub last_error: Option<String>,
}

pub struct ListCollection<A> {
    api: A,
    snapshot: watch::Sender<CollectionSnapshot>,
    notice: Mutex<Option<Notice>>,
}

impl<A: ShoppingApi> ListCollection<A> {
    pub fn new(api: A) -> Self {
        let (snapshot, _) = watch::channel(CollectionSnapshot::default());
        Self {
            api,
            snapshot,
            notice: Mutex::new(None),
        }
    }

    pub fn snapshot(&self) -> CollectionSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn lists(&self) -> Vec<List> {
        self.snapshot.borrow().lists.clone()
    }

    /// Receive every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<CollectionSnapshot> {
        self.snapshot.subscribe()
    }

    /// Take the most recent notification, if any.
    pub fn take_notice(&self) -> Option<Notice> {
        self.notice.lock().take()
    }

    fn notify(&self, notice: Notice) {
        *self.notice.lock() = Some(notice);
    }

    /// Fetch all lists and publish them.
    pub async fn refresh(&self) -> Result<Vec<List>> {
        match self.api.lists().await {
            Ok(lists) => {
                self.snapshot.send_if_modified(|snapshot| {
                    let changed = !snapshot.loaded
                        || snapshot.last_error.is_some()
                        || snapshot.lists != lists;
                    snapshot.lists = lists.clone();
                    snapshot.loaded = true;
                    snapshot.last_error = None;
                    changed
                });
                Ok(lists)
            }
            Err(e) => {
                tracing::warn!("fetching lists failed: {e}");
                self.snapshot.send_modify(|snapshot| {
                    snapshot.last_error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    /// Create a list, then refetch the whole collection.
    ///
    /// The new list is not inserted locally; it appears once the refetch
    /// returns it.
    pub async fn create(&self, name: &str) -> Result<List> {
        let name = name.trim();
        if name.is_empty() {
            let message = "list name cannot be empty".to_string();
            self.notify(Notice::warning(message.clone()));
            return Err(ShoplistError::Validation(message));
        }

        let list = match self.api.create_list(name).await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!("creating list '{name}' failed: {e}");
                let message = if e.is_conflict() {
                    format!("A list named '{name}' already exists.")
                } else {
                    "Failed to create list.".to_string()
                };
                self.notify(Notice::error(message));
                return Err(e);
            }
        };

        self.notify(Notice::info("List created!"));
        // A failed refetch is recorded in the snapshot; the list itself exists.
        let _ = self.refresh().await;
        Ok(list)
    }

    /// Delete a list, then refetch the whole collection.
    pub async fn delete(&self, list_id: &str) -> Result<()> {
        if let Err(e) = self.api.delete_list(list_id).await {
            tracing::warn!("deleting list '{list_id}' failed: {e}");
            self.notify(Notice::error("Failed to delete list."));
            return Err(e);
        }

        self.notify(Notice::info("List deleted!"));
        let _ = self.refresh().await;
        Ok(())
    }
}

impl<A: ShoppingApi + 'static> ListCollection<A> {
    /// Poll the collection every `period` until the returned handle is stopped
    /// or dropped. The first fetch happens immediately.
    pub fn start_polling(self: Arc<Self>, period: Duration) -> PollHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {}
                }

                // Stop requests also cut short a fetch in flight
                tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    _ = self.refresh() => {}
                }
            }

            tracing::debug!("list polling stopped");
        });

        PollHandle {
            stop: Some(stop_tx),
            task: Some(task),
        }
    }
}

/// Owns a running poll loop. Dropping the handle cancels the loop.
#[derive(Debug)]
pub struct PollHandle {
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Stop polling and wait for the loop to exit. No fetch starts after this returns.
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
            && !e.is_cancelled()
        {
            tracing::warn!("list polling task failed: {e}");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
