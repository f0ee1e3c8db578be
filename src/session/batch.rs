//! Bounded concurrent item deletion with per-item results.

use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::api::ShoppingApi;
use crate::error::ShoplistError;

/// One delete that did not go through.
#[derive(Debug)]
pub struct BatchFailure {
    pub item_id: String,
    pub error: ShoplistError,
}

/// Outcome of a batch of deletes, in the order the items were targeted.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.item_id.as_str()).collect()
    }

    /// JSON-friendly view of the report.
    pub fn summary(&self) -> BatchSummary<'_> {
        BatchSummary {
            succeeded: self.succeeded.iter().map(String::as_str).collect(),
            failed: self
                .failed
                .iter()
                .map(|f| FailureSummary {
                    item_id: &f.item_id,
                    error: f.error.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchSummary<'a> {
    pub succeeded: Vec<&'a str>,
    pub failed: Vec<FailureSummary<'a>>,
}

#[derive(Debug, Serialize)]
pub struct FailureSummary<'a> {
    pub item_id: &'a str,
    pub error: String,
}

/// Delete every item in `item_ids`, with at most `concurrency` requests in flight.
pub(crate) async fn delete_items<A: ShoppingApi>(
    api: &A,
    list_id: &str,
    item_ids: Vec<String>,
    concurrency: usize,
) -> BatchReport {
    let results: Vec<_> = stream::iter(item_ids)
        .map(|item_id| async move {
            let result = api.delete_item(list_id, &item_id).await;
            (item_id, result)
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let mut report = BatchReport::default();
    for (item_id, result) in results {
        match result {
            Ok(()) => report.succeeded.push(item_id),
            Err(error) => report.failed.push(BatchFailure { item_id, error }),
        }
    }
    report
}
