//! DOM layer: node handles, events and the in-memory document

mod events;
mod html;
mod memory;

pub use events::{dispatch_event, text_area_adjust, EventKind, Listener};
pub use memory::{InMemoryDocument, DEFAULT_LINE_HEIGHT_PX};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a node owned by a [`Document`](crate::traits::Document)
///
/// Slots of removed nodes are reused; the generation tells a stale handle
/// apart from the node that took its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot of the node inside its document
    pub const fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index)
    }
}
