//! Declarative node tree types

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Element name that marks a text node in a node description
pub const TEXT_ELEMENT: &str = "text";

/// Node description as it travels on the wire
///
/// `{ "element": "div", "attributes": { "class": "item" }, "inside": [ ... ] }`
///
/// `attributes` and `inside` may be omitted and default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescription {
    /// `"text"` or a tag name
    pub element: String,
    /// Text content, required when `element` is `"text"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Element attributes
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    /// Children, in document order
    #[serde(default)]
    pub inside: Vec<NodeDescription>,
}

/// Validated tag name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagName(String);

impl TagName {
    /// Parse a tag name.
    ///
    /// Accepts an ASCII letter followed by ASCII alphanumerics or `-`.
    /// `text` is reserved for text nodes. Tag names are stored lowercase.
    pub fn new(name: &str) -> Result<Self, CoreError> {
        let mut chars = name.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(CoreError::InvalidNode(format!("invalid tag name: '{name}'")));
        }
        let name = name.to_ascii_lowercase();
        if name == TEXT_ELEMENT {
            return Err(CoreError::InvalidNode(format!(
                "'{TEXT_ELEMENT}' is reserved for text nodes"
            )));
        }
        Ok(Self(name))
    }

    /// Tag name known to be valid at compile time
    pub(crate) fn from_static(name: &'static str) -> Self {
        debug_assert!(Self::new(name).is_ok(), "invalid static tag name: {name}");
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `<textarea>` elements get auto-resize listeners when rendered
    pub fn is_textarea(&self) -> bool {
        self.0 == "textarea"
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Element attributes, iterated in key order
pub type Attributes = BTreeMap<String, String>;

/// Check an attribute name.
///
/// Rejects empty names and names containing whitespace, control characters,
/// quotes, `<`, `>`, `/` or `=`.
pub fn validate_attribute_name(name: &str) -> Result<(), CoreError> {
    let invalid = name.is_empty()
        || name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        });
    if invalid {
        return Err(CoreError::InvalidNode(format!(
            "invalid attribute name: '{name}'"
        )));
    }
    Ok(())
}

/// Element node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: TagName,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

/// Typed node tree
///
/// Built from a [`NodeDescription`] by validation, so a `Node` never holds a
/// text node without content or an element with an unusable tag name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NodeDescription", into = "NodeDescription")]
pub enum Node {
    Text(String),
    Element(Element),
}

impl Node {
    /// Text node
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// Element node without attributes or children
    pub fn element(tag: &str) -> Result<Self, CoreError> {
        Ok(Self::Element(Element {
            tag: TagName::new(tag)?,
            attributes: Attributes::new(),
            children: Vec::new(),
        }))
    }

    /// Add an attribute (no-op on text nodes)
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element(ref mut element) = self {
            element.attributes.insert(name.into(), value.into());
        }
        self
    }

    /// Append a child (no-op on text nodes)
    #[must_use]
    pub fn with_child(mut self, child: Node) -> Self {
        if let Self::Element(ref mut element) = self {
            element.children.push(child);
        }
        self
    }

    /// Parse and validate a node from a JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, CoreError> {
        serde_json::from_value(value).map_err(|e| CoreError::InvalidNode(e.to_string()))
    }
}

impl TryFrom<NodeDescription> for Node {
    type Error = CoreError;

    fn try_from(desc: NodeDescription) -> Result<Self, Self::Error> {
        if desc.element == TEXT_ELEMENT {
            let value = desc.value.ok_or_else(|| {
                CoreError::InvalidNode("text node without a value".to_string())
            })?;
            return Ok(Self::Text(value));
        }

        let tag = TagName::new(&desc.element)?;
        for name in desc.attributes.keys() {
            validate_attribute_name(name)?;
        }
        let children = desc
            .inside
            .into_iter()
            .map(Node::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::Element(Element {
            tag,
            attributes: desc.attributes,
            children,
        }))
    }
}

impl From<Node> for NodeDescription {
    fn from(node: Node) -> Self {
        match node {
            Node::Text(value) => Self {
                element: TEXT_ELEMENT.to_string(),
                value: Some(value),
                attributes: BTreeMap::new(),
                inside: Vec::new(),
            },
            Node::Element(element) => Self {
                element: element.tag.0,
                value: None,
                attributes: element.attributes,
                inside: element.children.into_iter().map(Into::into).collect(),
            },
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => write!(f, "\"{value}\""),
            Self::Element(element) => write!(f, "<{}>", element.tag),
        }
    }
}
