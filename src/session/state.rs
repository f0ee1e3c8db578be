//! Session phases and the loaded list snapshot they guard.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::types::{Item, List};

/// Externally visible phase of a list session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Loading => write!(f, "loading"),
            SessionPhase::Ready => write!(f, "ready"),
            SessionPhase::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum SessionState {
    Loading,
    Ready(LoadedList),
    Failed(String),
}

impl SessionState {
    pub(crate) fn phase(&self) -> SessionPhase {
        match self {
            SessionState::Loading => SessionPhase::Loading,
            SessionState::Ready(_) => SessionPhase::Ready,
            SessionState::Failed(_) => SessionPhase::Failed,
        }
    }

    pub(crate) fn loaded(&self) -> Option<&LoadedList> {
        match self {
            SessionState::Ready(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub(crate) fn loaded_mut(&mut self) -> Option<&mut LoadedList> {
        match self {
            SessionState::Ready(loaded) => Some(loaded),
            _ => None,
        }
    }
}

/// List metadata plus its items, in server order, ids unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadedList {
    pub(crate) list: List,
    pub(crate) items: Vec<Item>,
}

impl LoadedList {
    pub(crate) fn new(list: List, items: Vec<Item>) -> Self {
        let mut seen = HashSet::new();
        let mut unique = Vec::with_capacity(items.len());
        for item in items {
            if seen.insert(item.id.clone()) {
                unique.push(item);
            } else {
                tracing::warn!(
                    list_id = %list.id,
                    item_id = %item.id,
                    "dropping duplicate item id from server response"
                );
            }
        }
        Self {
            list,
            items: unique,
        }
    }

    pub(crate) fn get(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub(crate) fn get_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    /// Insert an item, replacing any existing entry with the same id.
    pub(crate) fn upsert(&mut self, item: Item) {
        match self.get_mut(&item.id) {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }

    pub(crate) fn remove(&mut self, item_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != item_id);
        self.items.len() != before
    }

    pub(crate) fn remove_all(&mut self, item_ids: &HashSet<&str>) {
        self.items.retain(|i| !item_ids.contains(i.id.as_str()));
    }

    pub(crate) fn bought_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|i| i.bought)
            .map(|i| i.id.clone())
            .collect()
    }
}
