//! Test helper module
//!
//! Provides mock implementations of the platform traits.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::traits::{Connection, Notifier, QueryHandler, ReadyState, SocketEvent, Transport};
use crate::types::Query;

// ===== MockTransport =====

pub struct MockTransport {
    connects: AtomicUsize,
    urls: Mutex<Vec<String>>,
    /// Events replayed by the first connection
    events: Mutex<Vec<SocketEvent>>,
    /// If Some, the first connection fails with this message after its events
    error_after_events: Option<String>,
    initial_state: ReadyState,
    fail_connect: bool,
    sent: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            connects: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
            error_after_events: None,
            initial_state: ReadyState::Open,
            fail_connect: false,
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_events(self, events: Vec<SocketEvent>) -> Self {
        *self.events.lock().unwrap() = events;
        self
    }

    pub fn with_error_after_events(mut self, message: &str) -> Self {
        self.error_after_events = Some(message.to_string());
        self
    }

    pub fn with_initial_state(mut self, state: ReadyState) -> Self {
        self.initial_state = state;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_connect = true;
        self
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn connect(&self, url: &str) -> CoreResult<Box<dyn Connection>> {
        if self.fail_connect {
            return Err(CoreError::Transport("connection refused".to_string()));
        }
        let first = self.connects.fetch_add(1, Ordering::SeqCst) == 0;
        self.urls.lock().unwrap().push(url.to_string());

        let mut events: VecDeque<CoreResult<SocketEvent>> = VecDeque::new();
        if first {
            events.extend(std::mem::take(&mut *self.events.lock().unwrap()).into_iter().map(Ok));
            if let Some(ref message) = self.error_after_events {
                events.push_back(Err(CoreError::Transport(message.clone())));
            }
        }

        Ok(Box::new(MockConnection {
            state: self.initial_state,
            events,
            sent: Arc::clone(&self.sent),
        }))
    }
}

pub struct MockConnection {
    state: ReadyState,
    events: VecDeque<CoreResult<SocketEvent>>,
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Connection for MockConnection {
    fn ready_state(&self) -> ReadyState {
        self.state
    }

    async fn recv(&mut self) -> Option<CoreResult<SocketEvent>> {
        let event = self.events.pop_front()?;
        if matches!(event, Ok(SocketEvent::Close { .. }) | Err(_)) {
            self.state = ReadyState::Closed;
        }
        Some(event)
    }

    async fn send_text(&mut self, text: String) -> CoreResult<()> {
        self.sent.lock().unwrap().push(text);
        Ok(())
    }

    async fn close(&mut self) -> CoreResult<()> {
        self.state = ReadyState::Closed;
        Ok(())
    }
}

// ===== RecordingHandler =====

pub struct RecordingHandler {
    calls: Vec<(Query, Value)>,
    /// If Some, this query fails with `HandlerFailed`
    fail_on: Option<Query>,
}

impl RecordingHandler {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            fail_on: None,
        }
    }

    pub fn failing_on(mut self, query: Query) -> Self {
        self.fail_on = Some(query);
        self
    }

    pub fn calls(&self) -> &[(Query, Value)] {
        &self.calls
    }

    fn record(&mut self, query: Query, content: Value) -> CoreResult<()> {
        if self.fail_on == Some(query) {
            return Err(CoreError::handler_failed(query.as_str(), "rejected by test"));
        }
        self.calls.push((query, content));
        Ok(())
    }
}

impl QueryHandler for RecordingHandler {
    fn registration(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::Registration, content)
    }

    fn account_updated(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::AccountUpdated, content)
    }

    fn login(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::Login, content)
    }

    fn logout(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::Logout, content)
    }

    fn item_removed(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::ItemRemoved, content)
    }

    fn display_home(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::DisplayHome, content)
    }

    fn display_item(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::DisplayItem, content)
    }

    fn display_account(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::DisplayAccount, content)
    }

    fn display_contrat(&mut self, content: Value) -> CoreResult<()> {
        self.record(Query::DisplayContrat, content)
    }
}

// ===== RecordingNotifier =====

pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}
