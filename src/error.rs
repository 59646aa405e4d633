//! Error type for the actor-backed queue
//!
//! A dequeue that cannot be satisfied is not an error; it is reported as
//! `None` by [`TokenQueue::dequeue`](crate::TokenQueue::dequeue).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("failed to spawn queue worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("queue worker is no longer running")]
    WorkerGone,

    #[error("queue worker panicked")]
    WorkerPanicked,
}
