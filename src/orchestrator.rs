//! Search orchestrator
//!
//! Owns the [`SessionState`] and the [`ResultCache`]. Queries either resolve
//! synchronously from the cache or start a fetch on a worker thread; fetch
//! completions come back over a channel and are applied by
//! [`SearchOrchestrator::process_messages`] on the caller's thread, so state is
//! only ever mutated from one place.
//!
//! Every fetch is tagged with a sequence number. Only the completion carrying
//! the latest number is applied; anything older is dropped on arrival.

use crate::cache::{normalize_key, ResultCache};
use crate::client::CharacterSource;
use crate::model::{Character, SearchResult, SessionState, UiState};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Events raised by the views
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A settled or submitted query
    QueryChanged(String),
    /// A character picked from the list, or `None` to deselect
    CharacterSelected(Option<Character>),
}

/// Messages from fetch worker threads
enum BgMessage {
    FetchComplete {
        seq: u64,
        key: String,
        result: SearchResult,
    },
}

/// What happened to a completion pulled off the channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Stale,
}

pub struct SearchOrchestrator {
    source: Arc<dyn CharacterSource>,
    cache: ResultCache,
    state: SessionState,

    // Staleness guard
    latest_seq: u64,
    in_flight: Option<u64>,

    // Channel
    bg_sender: Sender<BgMessage>,
    bg_receiver: Receiver<BgMessage>,

    subscribers: Vec<Sender<SessionState>>,
}

impl SearchOrchestrator {
    pub fn new<S: CharacterSource>(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<dyn CharacterSource>) -> Self {
        let (bg_sender, bg_receiver) = unbounded();
        Self {
            source,
            cache: ResultCache::new(),
            state: SessionState::default(),
            latest_seq: 0,
            in_flight: None,
            bg_sender,
            bg_receiver,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&mut self) -> Receiver<SessionState> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::QueryChanged(query) => self.handle_query(&query),
            UiEvent::CharacterSelected(character) => self.handle_select(character),
        }
    }

    /// Start a search. Clears the selection. Blank queries reset to idle.
    pub fn handle_query(&mut self, query: &str) {
        let query = query.trim();
        self.state.query = query.to_string();
        self.state.selected = None;

        // Whatever happens next, an older fetch must not land on top of it
        self.latest_seq += 1;
        self.in_flight = None;

        if query.is_empty() {
            debug!("empty query, resetting to idle");
            self.state.ui_state = UiState::Idle;
            self.state.characters.clear();
            self.state.error_message.clear();
            self.state.clear_pagination();
            self.publish();
            return;
        }

        let key = normalize_key(query);

        if let Some(page) = self.cache.get(&key) {
            debug!(%key, items = page.items.len(), "cache hit");
            self.state.adopt_page(page);
            self.publish();
            return;
        }

        let seq = self.latest_seq;
        info!(%key, seq, "cache miss, fetching");
        self.in_flight = Some(seq);
        self.state.ui_state = UiState::Loading;
        self.state.error_message.clear();
        self.state.clear_pagination();
        self.publish();

        let source = Arc::clone(&self.source);
        let tx = self.bg_sender.clone();
        let query = query.to_string();

        thread::spawn(move || {
            let result = source.fetch_characters(&query);
            let _ = tx.send(BgMessage::FetchComplete { seq, key, result });
        });
    }

    /// Set or clear the selected character. Leaves the list alone.
    pub fn handle_select(&mut self, character: Option<Character>) {
        debug!(selected = character.as_ref().map(|c| c.name.as_str()), "selection changed");
        self.state.selected = character;
        self.publish();
    }

    /// Apply every completion already waiting. Returns how many were applied.
    pub fn process_messages(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.bg_receiver.try_recv() {
            if self.apply(msg) == FetchOutcome::Applied {
                applied += 1;
            }
        }
        applied
    }

    /// Block for the next completion, up to `timeout`
    pub fn pump(&mut self, timeout: Duration) -> Option<FetchOutcome> {
        let msg = self.bg_receiver.recv_timeout(timeout).ok()?;
        Some(self.apply(msg))
    }

    /// Block until the current fetch has been applied. Returns `false` on
    /// timeout; returns `true` at once when nothing is in flight.
    pub fn wait_for_fetch(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if self.pump(remaining).is_none() {
                return false;
            }
        }
        true
    }

    fn apply(&mut self, msg: BgMessage) -> FetchOutcome {
        match msg {
            BgMessage::FetchComplete { seq, key, result } => {
                if self.in_flight != Some(seq) {
                    debug!(%key, seq, latest = self.latest_seq, "discarding stale fetch");
                    return FetchOutcome::Stale;
                }
                self.in_flight = None;

                match result {
                    Ok(page) => {
                        info!(%key, items = page.items.len(), total = page.total_count, "fetch applied");
                        self.state.adopt_page(&page);
                        self.cache.put(&key, page);
                    }
                    Err(e) => {
                        if e.is_retryable() {
                            warn!(%key, error = %e, "fetch failed");
                        } else {
                            info!(%key, error = %e, "fetch rejected");
                        }
                        self.state.ui_state = UiState::Error;
                        self.state.error_message = e.to_string();
                        self.state.characters.clear();
                    }
                }
                self.publish();
                FetchOutcome::Applied
            }
        }
    }

    fn publish(&mut self) {
        let state = &self.state;
        self.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
    }
}
