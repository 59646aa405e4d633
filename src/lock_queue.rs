//! Lock-coordinated token queue
//!
//! The token store sits behind a single reader/writer lock. Length queries
//! share the lock; enqueue and dequeue hold it exclusively.

use std::fmt;
use std::sync::PoisonError;

use crossbeam_utils::sync::{ShardedLock, ShardedLockReadGuard, ShardedLockWriteGuard};
use tracing::trace;

use crate::common::TokenQueue;
use crate::store::TokenStore;
use crate::Token;

/// A FIFO token queue guarded by a reader/writer lock
///
/// Writers are mutually exclusive; readers only exclude writers. Every
/// mutation is a single [`TokenStore`] call, so a panic on another thread
/// can never leave the store half-updated and a poisoned lock is simply
/// recovered.
pub struct LockQueue {
    store: ShardedLock<TokenStore>,
}

impl LockQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::from_store(TokenStore::new())
    }

    /// Creates a queue pre-populated with `seed`, oldest first
    pub fn with_tokens<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        Self::from_store(TokenStore::from_seed(seed))
    }

    fn from_store(store: TokenStore) -> Self {
        Self {
            store: ShardedLock::new(store),
        }
    }

    /// Consumes the queue, returning the remaining tokens oldest first
    pub fn into_tokens(self) -> Vec<Token> {
        self.store
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .into_tokens()
    }

    #[inline]
    fn read(&self) -> ShardedLockReadGuard<'_, TokenStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    #[inline]
    fn write(&self) -> ShardedLockWriteGuard<'_, TokenStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenQueue for LockQueue {
    fn len(&self) -> usize {
        self.read().len()
    }

    fn enqueue(&self, token: Token) {
        self.write().push_back(token);
    }

    fn dequeue(&self, n: usize) -> Option<Vec<Token>> {
        let mut store = self.write();
        let taken = store.take_front(n);
        if taken.is_none() {
            trace!(requested = n, available = store.len(), "dequeue rejected");
        }
        taken
    }
}

impl Default for LockQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Token> for LockQueue {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::with_tokens(iter)
    }
}

impl fmt::Debug for LockQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockQueue")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Barrier};
    use std::thread;

    #[test]
    fn seeded_queue_keeps_its_seed() {
        let q = LockQueue::with_tokens(["s-0", "s-1"].map(Token::from));
        assert_eq!(q.len(), 2);
        q.enqueue(Token::from("a"));
        assert_eq!(q.into_tokens(), ["s-0", "s-1", "a"].map(Token::from));
    }

    #[test]
    fn readers_run_while_queue_is_shared() {
        const READERS: usize = 4;
        let q = Arc::new(LockQueue::new());
        let barrier = Arc::new(Barrier::new(READERS + 1));

        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let q = Arc::clone(&q);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let mut last = 0;
                    for _ in 0..1_000 {
                        let len = q.len();
                        // only enqueues run, so the length never shrinks
                        assert!(len >= last);
                        last = len;
                    }
                })
            })
            .collect();

        barrier.wait();
        for i in 0..1_000 {
            q.enqueue(Token::from(format!("w-{i}")));
        }
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(q.len(), 1_000);
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let q = Arc::new(LockQueue::with_tokens([Token::from("a")]));

        let poisoner = Arc::clone(&q);
        let result = thread::spawn(move || {
            let _guard = poisoner.write();
            panic!("poison the lock");
        })
        .join();
        assert!(result.is_err());

        assert_eq!(q.len(), 1);
        q.enqueue(Token::from("b"));
        assert_eq!(q.dequeue(2), Some(vec![Token::from("a"), Token::from("b")]));
    }
}
