//! Tree rendering service

use crate::dom::{EventKind, Listener, NodeId};
use crate::error::CoreResult;
use crate::traits::Document;
use crate::types::{Node, TagName};

/// Events that trigger a textarea resize
const TEXTAREA_RESIZE_EVENTS: [EventKind; 3] =
    [EventKind::KeyUp, EventKind::Focus, EventKind::Scroll];

/// Tree rendering service
///
/// Builds live document nodes from typed [`Node`] trees. Rendered nodes are
/// detached; the caller decides where to attach them.
pub struct TreeRenderer<'a, D: Document + ?Sized> {
    doc: &'a mut D,
}

impl<'a, D: Document + ?Sized> TreeRenderer<'a, D> {
    /// Create a renderer writing into `doc`
    pub fn new(doc: &'a mut D) -> Self {
        Self { doc }
    }

    /// Render one node and its subtree.
    ///
    /// Text nodes become text nodes. Elements get every attribute and their
    /// children rendered and appended in order. `<textarea>` elements also
    /// receive auto-resize listeners for key-up, focus and scroll.
    pub fn render(&mut self, node: &Node) -> CoreResult<NodeId> {
        let element = match node {
            Node::Text(value) => return Ok(self.doc.create_text_node(value)),
            Node::Element(element) => element,
        };

        let id = self.doc.create_element(&element.tag);
        if element.tag.is_textarea() {
            for kind in TEXTAREA_RESIZE_EVENTS {
                self.doc.add_event_listener(id, kind, Listener::AutoResize)?;
            }
        }
        for (name, value) in &element.attributes {
            self.doc.set_attribute(id, name, value)?;
        }
        for child in &element.children {
            let child_id = self.render(child)?;
            self.doc.append_child(id, child_id)?;
        }
        Ok(id)
    }

    /// Render `nodes` in order and append them to `parent`.
    pub fn render_into(&mut self, parent: NodeId, nodes: &[Node]) -> CoreResult<Vec<NodeId>> {
        let mut ids = Vec::with_capacity(nodes.len());
        for node in nodes {
            let id = self.render(node)?;
            self.doc.append_child(parent, id)?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Page header: every header node wrapped in a `<div>`
    pub fn render_header(&mut self, header: &[Node]) -> CoreResult<NodeId> {
        let div = self.doc.create_element(&TagName::from_static("div"));
        self.render_into(div, header)?;
        Ok(div)
    }

    /// Page menu: the menu node wrapped in a `<nav>`
    pub fn render_menu(&mut self, menu: &Node) -> CoreResult<NodeId> {
        let nav = self.doc.create_element(&TagName::from_static("nav"));
        self.render_into(nav, std::slice::from_ref(menu))?;
        Ok(nav)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{dispatch_event, InMemoryDocument};
    use crate::error::CoreError;
    use serde_json::json;

    fn node(value: serde_json::Value) -> Node {
        Node::from_value(value).unwrap()
    }

    #[test]
    fn text_description_yields_text_node_with_value() {
        let mut doc = InMemoryDocument::new();
        let id = TreeRenderer::new(&mut doc)
            .render(&node(json!({ "element": "text", "value": "Bonjour", "inside": [] })))
            .unwrap();

        assert_eq!(doc.text(id), Some("Bonjour"));
        assert_eq!(doc.tag_name(id), None);
    }

    #[test]
    fn every_attribute_is_set() {
        let mut doc = InMemoryDocument::new();
        let id = TreeRenderer::new(&mut doc)
            .render(&node(json!({
                "element": "input",
                "attributes": { "type": "text", "name": "nick", "placeholder": "Nickname" },
                "inside": []
            })))
            .unwrap();

        assert_eq!(doc.tag_name(id), Some("input"));
        assert_eq!(doc.attribute(id, "type"), Some("text"));
        assert_eq!(doc.attribute(id, "name"), Some("nick"));
        assert_eq!(doc.attribute(id, "placeholder"), Some("Nickname"));
    }

    #[test]
    fn children_follow_inside_order() {
        let mut doc = InMemoryDocument::new();
        let id = TreeRenderer::new(&mut doc)
            .render(&node(json!({
                "element": "ul",
                "inside": [
                    { "element": "li", "inside": [{ "element": "text", "value": "one" }] },
                    { "element": "li", "inside": [{ "element": "text", "value": "two" }] },
                    { "element": "text", "value": "three" }
                ]
            })))
            .unwrap();

        let children = doc.children(id).to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(doc.text_content(children[0]), "one");
        assert_eq!(doc.text_content(children[1]), "two");
        assert_eq!(doc.text(children[2]), Some("three"));
        assert_eq!(doc.to_html(id), "<ul><li>one</li><li>two</li>three</ul>");
    }

    #[test]
    fn textarea_gets_auto_resize_listeners() {
        let mut doc = InMemoryDocument::new().with_line_height(10);
        let id = TreeRenderer::new(&mut doc)
            .render(&node(json!({
                "element": "textarea",
                "attributes": { "name": "description" },
                "inside": [{ "element": "text", "value": "line 1\nline 2" }]
            })))
            .unwrap();

        for kind in [EventKind::KeyUp, EventKind::Focus, EventKind::Scroll] {
            assert_eq!(doc.listeners(id, kind), vec![Listener::AutoResize]);
        }

        assert_eq!(dispatch_event(&mut doc, id, EventKind::KeyUp).unwrap(), 1);
        assert_eq!(doc.style(id, "height"), Some("40px"));
    }

    #[test]
    fn auto_resize_keeps_author_styles() {
        let mut doc = InMemoryDocument::new();
        let id = TreeRenderer::new(&mut doc)
            .render(&node(json!({
                "element": "textarea",
                "attributes": { "style": "width: 100%" }
            })))
            .unwrap();
        assert_eq!(doc.to_html(id), r#"<textarea style="width: 100%"></textarea>"#);

        dispatch_event(&mut doc, id, EventKind::KeyUp).unwrap();
        assert_eq!(
            doc.to_html(id),
            r#"<textarea style="height: 36px; width: 100%"></textarea>"#
        );
    }

    #[test]
    fn builder_attribute_names_are_checked_on_render() {
        let mut doc = InMemoryDocument::new();
        let bad = Node::element("div").unwrap().with_attribute("on click", "x");
        assert!(matches!(
            TreeRenderer::new(&mut doc).render(&bad),
            Err(CoreError::InvalidNode(_))
        ));
    }

    #[test]
    fn other_elements_get_no_listeners() {
        let mut doc = InMemoryDocument::new();
        let id = TreeRenderer::new(&mut doc)
            .render(&node(json!({ "element": "div", "inside": [] })))
            .unwrap();
        assert!(doc.listeners(id, EventKind::Focus).is_empty());
        assert_eq!(dispatch_event(&mut doc, id, EventKind::Focus).unwrap(), 0);
        assert_eq!(doc.style(id, "height"), None);
    }

    #[test]
    fn header_and_menu_wrappers() {
        let mut doc = InMemoryDocument::new();
        let header = vec![
            node(json!({ "element": "h1", "inside": [{ "element": "text", "value": "Echo" }] })),
            node(json!({ "element": "p", "inside": [{ "element": "text", "value": "Chamber" }] })),
        ];
        let menu = node(json!({ "element": "ul", "inside": [] }));

        let mut renderer = TreeRenderer::new(&mut doc);
        let div = renderer.render_header(&header).unwrap();
        let nav = renderer.render_menu(&menu).unwrap();

        assert_eq!(doc.to_html(div), "<div><h1>Echo</h1><p>Chamber</p></div>");
        assert_eq!(doc.to_html(nav), "<nav><ul></ul></nav>");
    }

    #[test]
    fn render_into_appends_to_parent() {
        let mut doc = InMemoryDocument::new();
        let body = doc.body();
        let ids = TreeRenderer::new(&mut doc)
            .render_into(body, &[Node::text("a"), Node::text("b")])
            .unwrap();
        assert_eq!(doc.children(body), ids.as_slice());
    }
}
