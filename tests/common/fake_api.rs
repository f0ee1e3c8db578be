//! In-memory implementation of `ShoppingApi` with call recording, failure
//! injection and per-operation latency.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use reqwest::StatusCode;

use shoplist::api::{Operation, ShoppingApi};
use shoplist::error::{Result, ShoplistError, TransportError};
use shoplist::types::{Item, ItemDraft, List};

#[derive(Default)]
struct FakeState {
    lists: Vec<List>,
    items: HashMap<String, Vec<Item>>,
    next_id: u64,
    failing_ops: HashSet<Operation>,
    failing_deletes: HashSet<String>,
    delays: HashMap<Operation, Duration>,
    response_delays: HashMap<Operation, Duration>,
    calls: Vec<Operation>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<FakeState>,
    deletes_in_flight: AtomicUsize,
    max_deletes_in_flight: AtomicUsize,
}

/// Shared handle; clones observe the same server.
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Inner>,
}

pub fn server_error(operation: Operation) -> ShoplistError {
    ShoplistError::transport(
        operation,
        TransportError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "boom".to_string(),
        },
    )
}

fn status_error(operation: Operation, status: StatusCode, message: &str) -> ShoplistError {
    ShoplistError::transport(
        operation,
        TransportError::Status {
            status,
            message: message.to_string(),
        },
    )
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a list and its items.
    pub fn with_list(self, list: List, items: Vec<Item>) -> Self {
        {
            let mut state = self.inner.state.lock();
            state.items.insert(list.id.clone(), items);
            state.lists.push(list);
        }
        self
    }

    /// Make every call of `operation` fail with a 500.
    pub fn fail(&self, operation: Operation) {
        self.inner.state.lock().failing_ops.insert(operation);
    }

    pub fn recover(&self, operation: Operation) {
        self.inner.state.lock().failing_ops.remove(&operation);
    }

    /// Make deleting `item_id` fail with a 500.
    pub fn fail_delete_of(&self, item_id: &str) {
        self.inner
            .state
            .lock()
            .failing_deletes
            .insert(item_id.to_string());
    }

    /// Delay every call of `operation` by `delay` before it takes effect.
    pub fn delay(&self, operation: Operation, delay: Duration) {
        self.inner.state.lock().delays.insert(operation, delay);
    }

    /// Delay the response to `operation` after the server has applied it.
    pub fn delay_response(&self, operation: Operation, delay: Duration) {
        self.inner
            .state
            .lock()
            .response_delays
            .insert(operation, delay);
    }

    pub fn calls(&self, operation: Operation) -> usize {
        self.inner
            .state
            .lock()
            .calls
            .iter()
            .filter(|op| **op == operation)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.inner.state.lock().calls.len()
    }

    pub fn max_deletes_in_flight(&self) -> usize {
        self.inner.max_deletes_in_flight.load(Ordering::SeqCst)
    }

    /// Server-side items of a list, as another client would see them.
    pub fn server_items(&self, list_id: &str) -> Vec<Item> {
        self.inner
            .state
            .lock()
            .items
            .get(list_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Change the server behind the client's back.
    pub fn push_server_item(&self, list_id: &str, item: Item) {
        self.inner
            .state
            .lock()
            .items
            .entry(list_id.to_string())
            .or_default()
            .push(item);
    }

    pub fn push_server_list(&self, list: List) {
        let mut state = self.inner.state.lock();
        state.items.entry(list.id.clone()).or_default();
        state.lists.push(list);
    }

    /// Record the call, then wait out any configured delay. Fails if the
    /// operation is set to fail.
    async fn enter(&self, operation: Operation) -> Result<()> {
        let (delay, failing) = {
            let mut state = self.inner.state.lock();
            state.calls.push(operation);
            (
                state.delays.get(&operation).copied(),
                state.failing_ops.contains(&operation),
            )
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(server_error(operation));
        }
        Ok(())
    }

    async fn respond(&self, operation: Operation) {
        let delay = self
            .inner
            .state
            .lock()
            .response_delays
            .get(&operation)
            .copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn not_found(operation: Operation) -> ShoplistError {
        status_error(operation, StatusCode::NOT_FOUND, "not found")
    }
}

impl ShoppingApi for FakeApi {
    async fn lists(&self) -> Result<Vec<List>> {
        self.enter(Operation::FetchLists).await?;
        Ok(self.inner.state.lock().lists.clone())
    }

    async fn get_list(&self, list_id: &str) -> Result<List> {
        self.enter(Operation::FetchList).await?;
        self.inner
            .state
            .lock()
            .lists
            .iter()
            .find(|l| l.id == list_id)
            .cloned()
            .ok_or_else(|| Self::not_found(Operation::FetchList))
    }

    async fn get_items(&self, list_id: &str) -> Result<Vec<Item>> {
        self.enter(Operation::FetchItems).await?;
        self.inner
            .state
            .lock()
            .items
            .get(list_id)
            .cloned()
            .ok_or_else(|| Self::not_found(Operation::FetchItems))
    }

    async fn create_list(&self, name: &str) -> Result<List> {
        self.enter(Operation::CreateList).await?;
        let mut state = self.inner.state.lock();
        let taken = state
            .lists
            .iter()
            .any(|l| l.name.trim().eq_ignore_ascii_case(name.trim()));
        if taken {
            return Err(status_error(
                Operation::CreateList,
                StatusCode::CONFLICT,
                "List with this name already exists",
            ));
        }
        state.next_id += 1;
        let list = List {
            id: format!("L{}", state.next_id),
            name: name.to_string(),
        };
        state.items.insert(list.id.clone(), Vec::new());
        state.lists.push(list.clone());
        Ok(list)
    }

    async fn delete_list(&self, list_id: &str) -> Result<()> {
        self.enter(Operation::DeleteList).await?;
        let mut state = self.inner.state.lock();
        let before = state.lists.len();
        state.lists.retain(|l| l.id != list_id);
        if state.lists.len() == before {
            return Err(Self::not_found(Operation::DeleteList));
        }
        state.items.remove(list_id);
        Ok(())
    }

    async fn add_item(&self, list_id: &str, draft: &ItemDraft) -> Result<Item> {
        self.enter(Operation::AddItem).await?;
        let mut state = self.inner.state.lock();
        state.next_id += 1;
        let item = Item {
            id: format!("srv-{}", state.next_id),
            name: draft.name.clone(),
            section: draft.section.clone(),
            quantity: draft.quantity,
            bought: false,
        };
        state
            .items
            .get_mut(list_id)
            .ok_or_else(|| Self::not_found(Operation::AddItem))?
            .push(item.clone());
        Ok(item)
    }

    async fn update_item(&self, list_id: &str, item_id: &str, item: &Item) -> Result<Item> {
        self.enter(Operation::UpdateItem).await?;
        let mut state = self.inner.state.lock();
        let stored = state
            .items
            .get_mut(list_id)
            .and_then(|items| items.iter_mut().find(|i| i.id == item_id))
            .ok_or_else(|| Self::not_found(Operation::UpdateItem))?;
        *stored = item.clone();
        Ok(stored.clone())
    }

    async fn toggle_item(&self, list_id: &str, item_id: &str) -> Result<()> {
        self.enter(Operation::ToggleItem).await?;
        {
            let mut state = self.inner.state.lock();
            let stored = state
                .items
                .get_mut(list_id)
                .and_then(|items| items.iter_mut().find(|i| i.id == item_id))
                .ok_or_else(|| Self::not_found(Operation::ToggleItem))?;
            stored.bought = !stored.bought;
        }
        self.respond(Operation::ToggleItem).await;
        Ok(())
    }

    async fn delete_item(&self, list_id: &str, item_id: &str) -> Result<()> {
        let in_flight = self.inner.deletes_in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner
            .max_deletes_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);

        let result = self.enter(Operation::DeleteItem).await;
        self.inner.deletes_in_flight.fetch_sub(1, Ordering::SeqCst);
        result?;

        let mut state = self.inner.state.lock();
        if state.failing_deletes.contains(item_id) {
            return Err(server_error(Operation::DeleteItem));
        }
        let items = state
            .items
            .get_mut(list_id)
            .ok_or_else(|| Self::not_found(Operation::DeleteItem))?;
        let before = items.len();
        items.retain(|i| i.id != item_id);
        if items.len() == before {
            return Err(Self::not_found(Operation::DeleteItem));
        }
        Ok(())
    }
}
