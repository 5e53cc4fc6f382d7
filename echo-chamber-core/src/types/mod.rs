//! Type definition module

mod message;
mod node;

pub use message::{Envelope, FeedbackState, Query, UnknownQuery};
pub use node::{
    validate_attribute_name, Attributes, Element, Node, NodeDescription, TagName, TEXT_ELEMENT,
};
