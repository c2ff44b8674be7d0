// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::{data_source::FetchError, types::Transaction};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Transactions requested per page.
pub const PAGE_SIZE: u32 = 20;

/// The explorer serves at most this many rows of one account's history.
pub const MAX_TRANSACTIONS: u32 = 10_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("A url is required")]
    EmptyAddress,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing submitted yet.
    Idle,
    /// More pages exist; waiting for the sentinel.
    AwaitingMore,
    /// One request outstanding.
    Fetching,
    /// Last fetch failed. Needs a new submission.
    Error,
    /// Ceiling reached. Needs a new submission.
    Exhausted,
}

/// A page load the caller must perform and report back with
/// [`Paginator::on_fetch_complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub endpoint: String,
    pub page: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Appended { count: usize },
    Exhausted { count: usize },
    Failed,
    /// Answer to a request from a session that has since been replaced.
    Stale,
}

/// Browsing state for one submitted endpoint.
#[derive(Debug, Clone)]
pub struct Session {
    pub endpoint: String,
    pub page: u32,
    pub records: Vec<Transaction>,
    pub loading: bool,
    pub has_more: bool,
    pub error: String,
    pub generation: u64,
    pub state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            page: 0,
            records: Vec::new(),
            loading: false,
            has_more: false,
            error: String::new(),
            generation: 0,
            state: SessionState::Idle,
        }
    }
}

/// Drives page fetches for the current session, one at a time.
#[derive(Debug, Default)]
pub struct Paginator {
    session: Session,
}

impl Paginator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state
    }

    pub fn records(&self) -> &[Transaction] {
        &self.session.records
    }

    pub fn has_more(&self) -> bool {
        self.session.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.session.loading
    }

    pub fn page(&self) -> u32 {
        self.session.page
    }

    pub fn error(&self) -> &str {
        &self.session.error
    }

    pub fn generation(&self) -> u64 {
        self.session.generation
    }

    /// Start a new session for `endpoint`, dropping everything from the old one.
    /// An empty endpoint only sets the validation message.
    pub fn submit(&mut self, endpoint: &str) -> Result<(), ValidationError> {
        let endpoint = endpoint.trim();
        if endpoint.is_empty() {
            let err = ValidationError::EmptyAddress;
            self.session.error = err.to_string();
            return Err(err);
        }

        if self.session.loading {
            debug!(
                "Paginator::submit | abandoning page {} of generation {}",
                self.session.page, self.session.generation
            );
        }

        self.session = Session {
            endpoint: endpoint.to_string(),
            has_more: true,
            generation: self.session.generation + 1,
            state: SessionState::AwaitingMore,
            ..Session::default()
        };
        info!(
            "Paginator::submit | endpoint: {}, generation: {}",
            endpoint, self.session.generation
        );
        Ok(())
    }

    /// The sentinel came into view. Returns the next page to load, unless a
    /// load is already running or there is nothing more to load.
    pub fn on_sentinel_visible(&mut self) -> Option<FetchRequest> {
        if self.session.state != SessionState::AwaitingMore {
            debug!(
                "Paginator::on_sentinel_visible | ignored in state {:?}",
                self.session.state
            );
            return None;
        }

        self.session.page += 1;
        self.session.loading = true;
        self.session.state = SessionState::Fetching;

        Some(FetchRequest {
            generation: self.session.generation,
            endpoint: self.session.endpoint.clone(),
            page: self.session.page,
        })
    }

    pub fn on_fetch_complete(
        &mut self,
        generation: u64,
        result: Result<Vec<Transaction>, FetchError>,
    ) -> FetchOutcome {
        if generation != self.session.generation || self.session.state != SessionState::Fetching {
            warn!(
                "Paginator::on_fetch_complete | dropping response for generation {} (current {})",
                generation, self.session.generation
            );
            return FetchOutcome::Stale;
        }
        self.session.loading = false;

        let mut txns = match result {
            Ok(txns) => txns,
            Err(e) => {
                self.session.error = e.message();
                self.session.has_more = false;
                self.session.page = 0;
                self.session.state = SessionState::Error;
                return FetchOutcome::Failed;
            }
        };

        let room = (MAX_TRANSACTIONS as usize).saturating_sub(self.session.records.len());
        txns.truncate(room);
        let count = txns.len();
        self.session.records.extend(txns);

        let reached_ceiling = self.session.page * PAGE_SIZE >= MAX_TRANSACTIONS
            || self.session.records.len() >= MAX_TRANSACTIONS as usize;
        if reached_ceiling {
            info!(
                "Paginator::on_fetch_complete | ceiling reached with {} transactions",
                self.session.records.len()
            );
            self.session.has_more = false;
            self.session.state = SessionState::Exhausted;
            FetchOutcome::Exhausted { count }
        } else {
            self.session.state = SessionState::AwaitingMore;
            FetchOutcome::Appended { count }
        }
    }
}
