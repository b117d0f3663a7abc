//! Sequential batch processing with per-item failure isolation.
//!
//! Processors fold a list of entities into a [`BatchOutcome`]: each item is
//! awaited to completion before the next one starts, and an item failure is
//! recorded without stopping the batch.

use std::future::{self, Future};

use futures::stream::{self, StreamExt};

/// Result of processing a single item.
#[derive(Debug)]
pub enum ItemOutcome<S, F> {
    /// The item produced a result.
    Done(S),
    /// The item failed; siblings are unaffected.
    Failed(F),
    /// Nothing to do for this item.
    Skipped,
}

impl<S, F> From<Result<S, F>> for ItemOutcome<S, F> {
    fn from(result: Result<S, F>) -> Self {
        match result {
            Ok(success) => Self::Done(success),
            Err(failure) => Self::Failed(failure),
        }
    }
}

/// Accumulated successes and failures, in item order.
#[derive(Debug)]
pub struct BatchOutcome<S, F> {
    /// Successful items.
    pub successes: Vec<S>,
    /// Failed items.
    pub failures: Vec<F>,
    /// Number of skipped items.
    pub skipped: usize,
}

impl<S, F> Default for BatchOutcome<S, F> {
    fn default() -> Self {
        Self {
            successes: Vec::new(),
            failures: Vec::new(),
            skipped: 0,
        }
    }
}

impl<S, F> BatchOutcome<S, F> {
    /// Adds one item's outcome.
    pub fn record(&mut self, outcome: ItemOutcome<S, F>) {
        match outcome {
            ItemOutcome::Done(success) => self.successes.push(success),
            ItemOutcome::Failed(failure) => self.failures.push(failure),
            ItemOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Runs `op` over `items` one at a time and folds the outcomes.
pub async fn process_sequentially<I, T, S, F, Op, Fut>(items: I, op: Op) -> BatchOutcome<S, F>
where
    I: IntoIterator<Item = T>,
    Op: FnMut(T) -> Fut,
    Fut: Future<Output = ItemOutcome<S, F>>,
{
    stream::iter(items)
        .then(op)
        .fold(BatchOutcome::default(), |mut outcome, item| {
            outcome.record(item);
            future::ready(outcome)
        })
        .await
}
