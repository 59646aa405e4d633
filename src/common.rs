//! Common functionality for token queues
//!
//! This module provides the contract shared by every queue backend, so
//! callers can hold any of them behind the same trait.

use std::sync::Arc;

use crate::Token;

/// Trait for concurrent FIFO token queue operations
///
/// Every call is atomic with respect to every other call on the same queue:
/// no caller ever observes a partially applied operation.
pub trait TokenQueue: Send + Sync {
    /// Returns the number of tokens currently queued
    fn len(&self) -> usize;

    /// Checks whether the queue was empty during this call
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a token to the tail of the queue
    fn enqueue(&self, token: Token);

    /// Removes exactly `n` tokens from the head of the queue
    ///
    /// Returns the removed tokens in the order they were enqueued. If fewer
    /// than `n` tokens are queued, returns `None` and leaves the queue
    /// untouched. `n == 0` always succeeds with an empty vector.
    fn dequeue(&self, n: usize) -> Option<Vec<Token>>;
}

impl<Q: TokenQueue + ?Sized> TokenQueue for Arc<Q> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn enqueue(&self, token: Token) {
        (**self).enqueue(token)
    }

    fn dequeue(&self, n: usize) -> Option<Vec<Token>> {
        (**self).dequeue(n)
    }
}

impl<Q: TokenQueue + ?Sized> TokenQueue for &Q {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn enqueue(&self, token: Token) {
        (**self).enqueue(token)
    }

    fn dequeue(&self, n: usize) -> Option<Vec<Token>> {
        (**self).dequeue(n)
    }
}

impl<Q: TokenQueue + ?Sized> TokenQueue for Box<Q> {
    fn len(&self) -> usize {
        (**self).len()
    }

    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn enqueue(&self, token: Token) {
        (**self).enqueue(token)
    }

    fn dequeue(&self, n: usize) -> Option<Vec<Token>> {
        (**self).dequeue(n)
    }
}
