//! In-memory document

use std::collections::BTreeMap;

use super::{html, EventKind, Listener, NodeId};
use crate::error::{CoreError, CoreResult};
use crate::traits::Document;
use crate::types::{validate_attribute_name, TagName};

/// Default line height used to estimate content height
pub const DEFAULT_LINE_HEIGHT_PX: u32 = 16;

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Element {
        tag: TagName,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        listeners: Vec<(EventKind, Listener)>,
    },
    Text(String),
}

impl NodeData {
    fn element(tag: TagName) -> Self {
        Self::Element {
            tag,
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }
}

/// Parse a `style` attribute into `property -> value`
fn parse_declarations(text: &str) -> BTreeMap<String, String> {
    text.split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(property, value)| (property.trim(), value.trim()))
        .filter(|(property, _)| !property.is_empty())
        .map(|(property, value)| (property.to_ascii_lowercase(), value.to_string()))
        .collect()
}

fn declarations_text(styles: &BTreeMap<String, String>) -> String {
    styles
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone)]
pub(crate) struct DomNode {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<DomNode>,
}

/// Arena-backed document
///
/// `clear_children` releases the removed subtrees and their slots are reused
/// by later nodes; handles to released nodes stop resolving. Content height
/// is estimated as `lines * line_height`.
#[derive(Debug, Clone)]
pub struct InMemoryDocument {
    slots: Vec<Slot>,
    free: Vec<usize>,
    body: NodeId,
    line_height: u32,
}

impl InMemoryDocument {
    /// Create an empty document holding only `<body>`
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            body: NodeId::new(0, 0),
            line_height: DEFAULT_LINE_HEIGHT_PX,
        };
        doc.body = doc.push(NodeData::element(TagName::from_static("body")));
        doc
    }

    /// Override the line height used by [`Document::scroll_height`]
    #[must_use]
    pub fn with_line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }

    /// Parent of `node`, if attached
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).and_then(|n| n.parent)
    }

    /// Serialize `node` and its subtree as HTML
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        html::write_node(self, node, &mut out);
        out
    }

    /// Number of live nodes, including `<body>`
    pub fn node_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&DomNode> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> CoreResult<&mut DomNode> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(CoreError::NodeNotFound(id.index))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let node = DomNode {
            data,
            parent: None,
            children: Vec::new(),
        };
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::new(self.slots.len() - 1, 0)
    }

    /// Free `root` and its descendants
    fn release(&mut self, root: NodeId) {
        let mut pending = vec![root];
        while let Some(id) = pending.pop() {
            let Some(slot) = self
                .slots
                .get_mut(id.index)
                .filter(|slot| slot.generation == id.generation)
            else {
                continue;
            };
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(id.index);
                pending.extend(node.children);
            }
        }
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn find(&self, from: NodeId, tag: &str, class: &str) -> Option<NodeId> {
        if self.tag_name(from) == Some(tag) && self.has_class(from, class) {
            return Some(from);
        }
        self.children(from)
            .iter()
            .find_map(|child| self.find(*child, tag, class))
    }
}

impl Default for InMemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for InMemoryDocument {
    fn create_element(&mut self, tag: &TagName) -> NodeId {
        self.push(NodeData::element(tag.clone()))
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn body(&self) -> NodeId {
        self.body
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Element { tag, .. } => Some(tag.as_str()),
            NodeData::Text(_) => None,
        }
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Text(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> CoreResult<()> {
        validate_attribute_name(name)?;
        match &mut self.node_mut(node)?.data {
            NodeData::Element {
                attributes, styles, ..
            } => {
                if name == "style" {
                    *styles = parse_declarations(value);
                }
                attributes.insert(name.to_string(), value.to_string());
                Ok(())
            }
            NodeData::Text(_) => Err(CoreError::InvalidNode(format!(
                "cannot set attribute '{name}' on a text node"
            ))),
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> CoreResult<()> {
        if matches!(self.node(parent), Some(DomNode { data: NodeData::Text(_), .. })) {
            return Err(CoreError::InvalidNode(
                "text nodes cannot have children".to_string(),
            ));
        }
        self.node(parent).ok_or(CoreError::NodeNotFound(parent.index))?;
        self.node(child).ok_or(CoreError::NodeNotFound(child.index))?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(CoreError::InvalidNode(
                "cannot append a node to itself or its descendant".to_string(),
            ));
        }

        if let Some(old_parent) = self.parent(child) {
            self.node_mut(old_parent)?.children.retain(|c| *c != child);
        }
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn clear_children(&mut self, node: NodeId) -> CoreResult<()> {
        let children = std::mem::take(&mut self.node_mut(node)?.children);
        for child in children {
            self.release(child);
        }
        Ok(())
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map_or(&[] as &[NodeId], |n| n.children.as_slice())
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) -> CoreResult<()> {
        match &mut self.node_mut(node)?.data {
            NodeData::Element {
                attributes, styles, ..
            } => {
                styles.insert(property.to_ascii_lowercase(), value.to_string());
                attributes.insert("style".to_string(), declarations_text(styles));
                Ok(())
            }
            NodeData::Text(_) => Err(CoreError::InvalidNode(
                "text nodes have no style".to_string(),
            )),
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        match &self.node(node)?.data {
            NodeData::Element { styles, .. } => styles.get(property).map(String::as_str),
            NodeData::Text(_) => None,
        }
    }

    fn add_event_listener(
        &mut self,
        node: NodeId,
        kind: EventKind,
        listener: Listener,
    ) -> CoreResult<()> {
        match &mut self.node_mut(node)?.data {
            NodeData::Element { listeners, .. } => {
                listeners.push((kind, listener));
                Ok(())
            }
            NodeData::Text(_) => Err(CoreError::InvalidNode(
                "text nodes cannot have listeners".to_string(),
            )),
        }
    }

    fn listeners(&self, node: NodeId, kind: EventKind) -> Vec<Listener> {
        match self.node(node).map(|n| &n.data) {
            Some(NodeData::Element { listeners, .. }) => listeners
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, l)| *l)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn scroll_height(&self, node: NodeId) -> CoreResult<u32> {
        self.node(node).ok_or(CoreError::NodeNotFound(node.index))?;
        let lines = self.text_content(node).split('\n').count();
        let lines = u32::try_from(lines).unwrap_or(u32::MAX);
        Ok(lines.saturating_mul(self.line_height))
    }

    fn query_selector(&self, tag: &str, class: &str) -> Option<NodeId> {
        self.find(self.body, tag, class)
    }
}
