//! The ordered backing sequence of tokens
//!
//! A [`TokenStore`] has no synchronization of its own. Each queue backend
//! owns exactly one store and decides how access to it is serialized.

use std::collections::VecDeque;

use crate::Token;

/// FIFO sequence of tokens
#[derive(Debug, Default, Clone)]
pub struct TokenStore {
    tokens: VecDeque<Token>,
}

impl TokenStore {
    /// Creates an empty store
    #[inline]
    pub fn new() -> Self {
        Self {
            tokens: VecDeque::new(),
        }
    }

    /// Creates a store holding every seed token, in order
    pub fn from_seed<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = Token>,
    {
        Self {
            tokens: seed.into_iter().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn push_back(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    /// Removes the `n` oldest tokens, or nothing at all
    ///
    /// The returned vector is owned by the caller and shares no storage
    /// with the store.
    pub fn take_front(&mut self, n: usize) -> Option<Vec<Token>> {
        if n > self.tokens.len() {
            return None;
        }
        Some(self.tokens.drain(..n).collect())
    }

    /// Consumes the store, returning the remaining tokens oldest first
    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens.into()
    }
}

impl FromIterator<Token> for TokenStore {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self::from_seed(iter)
    }
}
