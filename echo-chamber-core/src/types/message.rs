//! Socket message types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

/// Query tag of a server message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Query {
    Registration,
    AccountUpdated,
    Login,
    Logout,
    ItemRemoved,
    DisplayHome,
    DisplayItem,
    DisplayAccount,
    DisplayContrat,
}

impl Query {
    /// Every tag the client knows how to dispatch
    pub const ALL: [Query; 9] = [
        Query::Registration,
        Query::AccountUpdated,
        Query::Login,
        Query::Logout,
        Query::ItemRemoved,
        Query::DisplayHome,
        Query::DisplayItem,
        Query::DisplayAccount,
        Query::DisplayContrat,
    ];

    /// Wire name of the tag
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registration => "registration",
            Self::AccountUpdated => "accountUpdated",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::ItemRemoved => "itemRemoved",
            Self::DisplayHome => "displayHome",
            Self::DisplayItem => "displayItem",
            Self::DisplayAccount => "displayAccount",
            Self::DisplayContrat => "displayContrat",
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown query tag, carries the tag as received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQuery(pub String);

impl FromStr for Query {
    type Err = UnknownQuery;

    /// Exact, case-sensitive match against the wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| UnknownQuery(s.to_string()))
    }
}

/// `{ "query": ..., "content": ... }` envelope used in both directions
///
/// `query` is kept as a raw string so an unknown tag can still be reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub query: String,
    #[serde(default)]
    pub content: Value,
}

impl Envelope {
    pub fn new(query: impl Into<String>, content: Value) -> Self {
        Self {
            query: query.into(),
            content,
        }
    }

    /// Decode a text frame.
    pub fn parse(frame: &str) -> CoreResult<Self> {
        serde_json::from_str(frame).map_err(|e| CoreError::MalformedMessage(e.to_string()))
    }

    /// Encode as a text frame.
    pub fn to_frame(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::SerializationError(e.to_string()))
    }

    /// Resolve the tag against the known set.
    pub fn query(&self) -> Result<Query, UnknownQuery> {
        self.query.parse()
    }
}

/// Visible state of the feedback box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "state")]
pub enum FeedbackState {
    Hidden,
    Visible { ok: bool },
}
