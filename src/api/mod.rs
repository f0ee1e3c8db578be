//! Client facade for the shopping list REST service.
//!
//! [`ShoppingApi`] is the seam between list sessions and the network: every
//! method is exactly one round trip, with no retries and no batching. The
//! production implementation is [`HttpClient`]; tests substitute an in-memory
//! fake.

pub mod envelope;
pub mod http;

use std::fmt;
use std::future::Future;

use crate::error::Result;
use crate::types::{Item, ItemDraft, List};

pub use http::HttpClient;

/// Names each facade call, so failures say which round trip broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchLists,
    FetchList,
    FetchItems,
    CreateList,
    DeleteList,
    AddItem,
    UpdateItem,
    ToggleItem,
    DeleteItem,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::FetchLists => "fetch lists",
            Operation::FetchList => "fetch list",
            Operation::FetchItems => "fetch items",
            Operation::CreateList => "create list",
            Operation::DeleteList => "delete list",
            Operation::AddItem => "add item",
            Operation::UpdateItem => "update item",
            Operation::ToggleItem => "toggle item",
            Operation::DeleteItem => "delete item",
        };
        write!(f, "{name}")
    }
}

/// Common interface for the list service
pub trait ShoppingApi: Send + Sync {
    /// Fetch every list (summaries only)
    fn lists(&self) -> impl Future<Output = Result<Vec<List>>> + Send;

    /// Fetch one list's metadata
    fn get_list(&self, list_id: &str) -> impl Future<Output = Result<List>> + Send;

    /// Fetch the items of one list
    fn get_items(&self, list_id: &str) -> impl Future<Output = Result<Vec<Item>>> + Send;

    /// Create a new list
    fn create_list(&self, name: &str) -> impl Future<Output = Result<List>> + Send;

    /// Delete a list and all of its items
    fn delete_list(&self, list_id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Add an item; the server-assigned item is returned
    fn add_item(
        &self,
        list_id: &str,
        draft: &ItemDraft,
    ) -> impl Future<Output = Result<Item>> + Send;

    /// Replace an item with a full record
    fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        item: &Item,
    ) -> impl Future<Output = Result<Item>> + Send;

    /// Flip an item's bought flag on the server
    fn toggle_item(&self, list_id: &str, item_id: &str)
    -> impl Future<Output = Result<()>> + Send;

    /// Delete a single item
    fn delete_item(&self, list_id: &str, item_id: &str)
    -> impl Future<Output = Result<()>> + Send;
}
