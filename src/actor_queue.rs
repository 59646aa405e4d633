//! Actor-coordinated token queue
//!
//! The token store is owned by one dedicated worker thread. Callers never
//! touch it: every operation becomes a [`Request`] carrying a single-use
//! reply slot, is pushed onto a bounded request channel, and the caller
//! blocks until the worker answers.
//!
//! The worker serves requests strictly in the order they were accepted by
//! the channel, one at a time, which gives every operation on the queue a
//! single total order. A full request channel blocks submitters until the
//! worker catches up.

use std::fmt;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};
use tracing::{debug, error, trace};

use crate::common::TokenQueue;
use crate::error::QueueError;
use crate::store::TokenStore;
use crate::Token;

/// Default number of requests that may wait for the worker
pub const DEFAULT_REQUEST_CAPACITY: usize = 10;

/// Default name given to the worker thread
pub const DEFAULT_THREAD_NAME: &str = "token-queue-actor";

/// Construction parameters for an [`ActorQueue`]
#[derive(Debug, Clone)]
pub struct ActorConfig {
    /// Bound of the request channel. Values below 1 are treated as 1.
    pub request_capacity: usize,
    /// Name of the worker thread
    pub thread_name: String,
}

impl ActorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_capacity(mut self, capacity: usize) -> Self {
        self.request_capacity = capacity;
        self
    }

    pub fn thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            request_capacity: DEFAULT_REQUEST_CAPACITY,
            thread_name: DEFAULT_THREAD_NAME.to_owned(),
        }
    }
}

/// One-shot reply slot
type Reply<T> = Sender<T>;

/// Messages understood by the worker
enum Request {
    Len { reply: Reply<usize> },
    Enqueue { token: Token, reply: Reply<()> },
    Dequeue { n: usize, reply: Reply<Option<Vec<Token>>> },
    Shutdown { reply: Reply<Vec<Token>> },
}

/// A FIFO token queue served by a single worker thread
///
/// Dropping the queue shuts the worker down and discards whatever tokens
/// are left; use [`ActorQueue::shutdown`] to get them back.
pub struct ActorQueue {
    requests: Sender<Request>,
    worker: Option<JoinHandle<()>>,
}

impl ActorQueue {
    /// Creates an empty queue with the default configuration
    pub fn new() -> Result<Self, QueueError> {
        Self::with_config(Vec::new(), ActorConfig::default())
    }

    /// Creates a queue pre-populated with `seed`, oldest first
    pub fn with_tokens<I>(seed: I) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = Token>,
    {
        Self::with_config(seed, ActorConfig::default())
    }

    /// Creates a queue pre-populated with `seed` and spawns its worker
    pub fn with_config<I>(seed: I, config: ActorConfig) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = Token>,
    {
        let store = TokenStore::from_seed(seed);
        let (requests, inbox) = bounded(config.request_capacity.max(1));

        let worker = thread::Builder::new()
            .name(config.thread_name)
            .spawn(move || serve(store, inbox))?;

        Ok(Self {
            requests,
            worker: Some(worker),
        })
    }

    /// Returns the number of queued tokens
    pub fn try_len(&self) -> Result<usize, QueueError> {
        self.call(|reply| Request::Len { reply })
    }

    /// Appends a token to the tail of the queue
    pub fn try_enqueue(&self, token: Token) -> Result<(), QueueError> {
        self.call(|reply| Request::Enqueue { token, reply })
    }

    /// Removes exactly `n` tokens from the head of the queue, or none
    pub fn try_dequeue(&self, n: usize) -> Result<Option<Vec<Token>>, QueueError> {
        self.call(|reply| Request::Dequeue { n, reply })
    }

    /// Stops the worker and returns the tokens it still held
    ///
    /// Requests accepted before the shutdown are answered first.
    pub fn shutdown(mut self) -> Result<Vec<Token>, QueueError> {
        self.stop()
    }

    fn call<T>(&self, request: impl FnOnce(Reply<T>) -> Request) -> Result<T, QueueError> {
        let (reply, response) = bounded(1);
        self.requests
            .send(request(reply))
            .map_err(|_| QueueError::WorkerGone)?;
        response.recv().map_err(|_| QueueError::WorkerGone)
    }

    fn stop(&mut self) -> Result<Vec<Token>, QueueError> {
        let Some(worker) = self.worker.take() else {
            return Err(QueueError::WorkerGone);
        };
        let drained = self.call(|reply| Request::Shutdown { reply });
        if worker.join().is_err() {
            error!("queue worker panicked");
            return Err(QueueError::WorkerPanicked);
        }
        drained
    }
}

impl TokenQueue for ActorQueue {
    /// # Panics
    ///
    /// Panics if the worker thread has died.
    fn len(&self) -> usize {
        self.try_len().unwrap_or_else(|err| worker_lost(err))
    }

    /// # Panics
    ///
    /// Panics if the worker thread has died.
    fn enqueue(&self, token: Token) {
        self.try_enqueue(token).unwrap_or_else(|err| worker_lost(err))
    }

    /// # Panics
    ///
    /// Panics if the worker thread has died.
    fn dequeue(&self, n: usize) -> Option<Vec<Token>> {
        self.try_dequeue(n).unwrap_or_else(|err| worker_lost(err))
    }
}

impl Drop for ActorQueue {
    fn drop(&mut self) {
        if self.worker.is_none() {
            return;
        }
        match self.stop() {
            Ok(tokens) => debug!(discarded = tokens.len(), "actor queue dropped"),
            Err(err) => error!(%err, "actor queue dropped without a clean shutdown"),
        }
    }
}

impl fmt::Debug for ActorQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorQueue")
            .field("pending_requests", &self.requests.len())
            .field("running", &self.worker.is_some())
            .finish()
    }
}

fn worker_lost(err: QueueError) -> ! {
    error!(%err, "actor queue request failed");
    panic!("{err}")
}

/// Worker loop: owns the store until shutdown or until every sender is gone
fn serve(mut store: TokenStore, inbox: Receiver<Request>) {
    debug!(len = store.len(), "queue worker started");

    for request in inbox.iter() {
        match request {
            Request::Len { reply } => {
                trace!("len");
                let _ = reply.send(store.len());
            }
            Request::Enqueue { token, reply } => {
                trace!(%token, "enqueue");
                store.push_back(token);
                let _ = reply.send(());
            }
            Request::Dequeue { n, reply } => {
                trace!(n, "dequeue");
                let taken = store.take_front(n);
                if taken.is_none() {
                    trace!(requested = n, available = store.len(), "dequeue rejected");
                }
                let _ = reply.send(taken);
            }
            Request::Shutdown { reply } => {
                let remaining = std::mem::take(&mut store).into_tokens();
                debug!(remaining = remaining.len(), "queue worker shutting down");
                let _ = reply.send(remaining);
                return;
            }
        }
    }

    debug!(
        remaining = store.len(),
        "request channel disconnected, queue worker exiting"
    );
}
