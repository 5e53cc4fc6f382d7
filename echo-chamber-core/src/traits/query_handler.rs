//! Query handler Trait and registry

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{CoreError, CoreResult};
use crate::types::Query;

/// Query handler Trait
///
/// One method per query tag, each receiving the message `content`.
/// [`handle`](QueryHandler::handle) routes a resolved tag to its method.
pub trait QueryHandler {
    fn registration(&mut self, content: Value) -> CoreResult<()>;

    fn account_updated(&mut self, content: Value) -> CoreResult<()>;

    fn login(&mut self, content: Value) -> CoreResult<()>;

    fn logout(&mut self, content: Value) -> CoreResult<()>;

    fn item_removed(&mut self, content: Value) -> CoreResult<()>;

    fn display_home(&mut self, content: Value) -> CoreResult<()>;

    fn display_item(&mut self, content: Value) -> CoreResult<()>;

    fn display_account(&mut self, content: Value) -> CoreResult<()>;

    fn display_contrat(&mut self, content: Value) -> CoreResult<()>;

    /// Route `content` to the method for `query`
    fn handle(&mut self, query: Query, content: Value) -> CoreResult<()> {
        match query {
            Query::Registration => self.registration(content),
            Query::AccountUpdated => self.account_updated(content),
            Query::Login => self.login(content),
            Query::Logout => self.logout(content),
            Query::ItemRemoved => self.item_removed(content),
            Query::DisplayHome => self.display_home(content),
            Query::DisplayItem => self.display_item(content),
            Query::DisplayAccount => self.display_account(content),
            Query::DisplayContrat => self.display_contrat(content),
        }
    }
}

/// Boxed handler closure
pub type HandlerFn = Box<dyn FnMut(Value) -> CoreResult<()> + Send>;

/// Closure-based handler table
///
/// Handlers are registered per tag at runtime. A tag without a handler fails
/// with [`CoreError::HandlerNotRegistered`].
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<Query, HandlerFn>,
}

impl HandlerRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for the tag
    ///
    /// # Arguments
    /// * `query` - Query tag
    /// * `handler` - Closure receiving the message content
    pub fn register<F>(&mut self, query: Query, handler: F)
    where
        F: FnMut(Value) -> CoreResult<()> + Send + 'static,
    {
        self.handlers.insert(query, Box::new(handler));
    }

    /// Builder form of [`register`](Self::register)
    #[must_use]
    pub fn on<F>(mut self, query: Query, handler: F) -> Self
    where
        F: FnMut(Value) -> CoreResult<()> + Send + 'static,
    {
        self.register(query, handler);
        self
    }

    /// Remove the handler for a tag
    pub fn unregister(&mut self, query: Query) {
        self.handlers.remove(&query);
    }

    /// Whether a handler is registered for the tag
    pub fn contains(&self, query: Query) -> bool {
        self.handlers.contains_key(&query)
    }

    /// Tags that have a handler
    pub fn registered(&self) -> Vec<Query> {
        Query::ALL
            .into_iter()
            .filter(|q| self.handlers.contains_key(q))
            .collect()
    }

    fn call(&mut self, query: Query, content: Value) -> CoreResult<()> {
        let handler = self
            .handlers
            .get_mut(&query)
            .ok_or_else(|| CoreError::HandlerNotRegistered(query.to_string()))?;
        handler(content)
    }
}

impl QueryHandler for HandlerRegistry {
    fn registration(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::Registration, content)
    }

    fn account_updated(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::AccountUpdated, content)
    }

    fn login(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::Login, content)
    }

    fn logout(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::Logout, content)
    }

    fn item_removed(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::ItemRemoved, content)
    }

    fn display_home(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::DisplayHome, content)
    }

    fn display_item(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::DisplayItem, content)
    }

    fn display_account(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::DisplayAccount, content)
    }

    fn display_contrat(&mut self, content: Value) -> CoreResult<()> {
        self.call(Query::DisplayContrat, content)
    }

    fn handle(&mut self, query: Query, content: Value) -> CoreResult<()> {
        self.call(query, content)
    }
}
