//! Document abstraction Trait

use crate::dom::{EventKind, Listener, NodeId};
use crate::error::CoreResult;
use crate::types::TagName;

/// Host document Trait
///
/// The renderer and the feedback box only talk to the page through this trait.
/// Default implementation: [`InMemoryDocument`](crate::dom::InMemoryDocument).
///
/// Class helpers are provided on top of the `class` attribute, so an
/// implementation only has to store attributes.
pub trait Document {
    /// Create a detached element
    fn create_element(&mut self, tag: &TagName) -> NodeId;

    /// Create a detached text node
    fn create_text_node(&mut self, text: &str) -> NodeId;

    /// Root of the page content (`<body>`)
    fn body(&self) -> NodeId;

    /// Tag name of an element, `None` for text nodes or unknown ids
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Content of a text node, `None` for elements or unknown ids
    fn text(&self, node: NodeId) -> Option<&str>;

    /// Set an attribute, replacing any previous value
    ///
    /// # Arguments
    /// * `node` - Element id
    /// * `name` - Attribute name
    /// * `value` - Attribute value
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> CoreResult<()>;

    /// Read an attribute
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Append `child` as the last child of `parent`
    ///
    /// A child that already has a parent is moved.
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> CoreResult<()>;

    /// Remove every child of `node`
    ///
    /// Removed subtrees may be freed; their ids should not be used afterwards.
    fn clear_children(&mut self, node: NodeId) -> CoreResult<()>;

    /// Children of `node` in order; empty for unknown ids
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Set an inline style property, keeping the other declarations of the
    /// `style` attribute
    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> CoreResult<()>;

    /// Read an inline style property
    fn style(&self, node: NodeId, property: &str) -> Option<&str>;

    /// Register a listener for `kind` on `node`
    fn add_event_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        listener: Listener,
    ) -> CoreResult<()>;

    /// Listeners registered for `kind` on `node`, in registration order
    fn listeners(&self, node: NodeId, kind: EventKind) -> Vec<Listener>;

    /// Height of the element's content in pixels
    fn scroll_height(&self, node: NodeId) -> CoreResult<u32>;

    /// First element in document order matching `tag.class`
    fn query_selector(&self, tag: &str, class: &str) -> Option<NodeId>;

    /// Whether the element's class list contains `class`
    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    /// Add `class` to the element's class list (no duplicates)
    fn add_class(&mut self, node: NodeId, class: &str) -> CoreResult<()> {
        if self.has_class(node, class) {
            return Ok(());
        }
        let list = match self.attribute(node, "class") {
            Some(list) if !list.trim().is_empty() => format!("{} {class}", list.trim()),
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &list)
    }

    /// Remove every occurrence of `class` from the element's class list
    fn remove_class(&mut self, node: NodeId, class: &str) -> CoreResult<()> {
        let Some(list) = self.attribute(node, "class") else {
            return Ok(());
        };
        let list = list
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(node, "class", &list)
    }

    /// Concatenated text of `node` and its descendants
    fn text_content(&self, node: NodeId) -> String {
        if let Some(text) = self.text(node) {
            return text.to_string();
        }
        self.children(node)
            .iter()
            .map(|child| self.text_content(*child))
            .collect()
    }
}
