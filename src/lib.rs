//! # token_queue
//!
//! Concurrent FIFO queues of opaque string tokens with two interchangeable
//! coordination strategies:
//!
//! - [`LockQueue`]: the token sequence sits behind a reader/writer lock.
//! - [`ActorQueue`]: the token sequence is owned by a single worker thread
//!   that serves requests from a bounded channel, one at a time.
//!
//! Both implement [`TokenQueue`] with identical observable behaviour, so
//! callers can pick a backend without changing their code.
//!
//! ```
//! use token_queue::{LockQueue, Token, TokenQueue};
//!
//! let q = LockQueue::new();
//! for s in ["a", "b", "c"] {
//!     q.enqueue(Token::from(s));
//! }
//! assert_eq!(q.dequeue(5), None);
//! assert_eq!(q.dequeue(2).unwrap(), ["a", "b"]);
//! assert_eq!(q.len(), 1);
//! ```

mod common;
mod error;
mod store;
mod token;

pub mod actor_queue;
pub mod lock_queue;

// Re-exports for convenience
pub use actor_queue::{ActorConfig, ActorQueue, DEFAULT_REQUEST_CAPACITY};
pub use common::TokenQueue;
pub use error::QueueError;
pub use lock_queue::LockQueue;
pub use store::TokenStore;
pub use token::Token;
