//! DOM events and built-in listeners

use serde::{Deserialize, Serialize};

use super::NodeId;
use crate::error::CoreResult;
use crate::traits::Document;

/// Textarea height before measuring its content
const COLLAPSED_HEIGHT: &str = "1px";

/// Extra room added below a textarea's content
const TEXTAREA_MARGIN_PX: u32 = 20;

/// Event types the renderer listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    KeyUp,
    Focus,
    Scroll,
}

/// Built-in listener behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Listener {
    /// Grow or shrink a textarea to fit its content
    AutoResize,
}

impl Listener {
    fn run<D: Document + ?Sized>(self, doc: &mut D, target: NodeId) -> CoreResult<()> {
        match self {
            Self::AutoResize => text_area_adjust(doc, target),
        }
    }
}

/// Resize a textarea to `20 + scrollHeight` pixels.
///
/// The height is collapsed to `1px` first so the measured scroll height
/// reflects the content rather than the current box.
pub fn text_area_adjust<D: Document + ?Sized>(doc: &mut D, node: NodeId) -> CoreResult<()> {
    doc.set_style(node, "height", COLLAPSED_HEIGHT)?;
    let height = TEXTAREA_MARGIN_PX + doc.scroll_height(node)?;
    doc.set_style(node, "height", &format!("{height}px"))
}

/// Fire `kind` on `target`, running its listeners in registration order.
///
/// Returns the number of listeners that ran.
pub fn dispatch_event<D: Document + ?Sized>(
    doc: &mut D,
    target: NodeId,
    kind: EventKind,
) -> CoreResult<usize> {
    let listeners = doc.listeners(target, kind);
    for listener in &listeners {
        listener.run(doc, target)?;
    }
    Ok(listeners.len())
}
