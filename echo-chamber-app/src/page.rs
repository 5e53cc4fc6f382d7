//! Page session: the document the server drives through query messages

use std::path::{Path, PathBuf};

use anyhow::Context;
use echo_chamber_core::dom::{InMemoryDocument, NodeId};
use echo_chamber_core::error::{CoreError, CoreResult};
use echo_chamber_core::services::{
    feedback_state, feedback_text, FeedbackBox, TreeRenderer, FEEDBACK_CLASS, HIDDEN_CLASS,
};
use echo_chamber_core::traits::{Document, QueryHandler};
use echo_chamber_core::types::{FeedbackState, Node, Query, TagName};
use serde::Deserialize;
use serde_json::Value;

/// Header and menu trees rendered around the page content
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageChrome {
    #[serde(default)]
    pub header: Vec<Node>,
    #[serde(default)]
    pub menu: Option<Node>,
}

impl PageChrome {
    /// Load chrome from a JSON file `{ "header": [...], "menu": {...} }`
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read page chrome {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid page chrome {}", path.display()))
    }
}

/// Content of account related messages
///
/// Accepts `{ "feedback": "...", "ok": true }` or a bare string, which is
/// shown as a success message.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedbackPayload {
    Text(String),
    Object {
        #[serde(alias = "message")]
        feedback: String,
        #[serde(default)]
        ok: bool,
    },
}

impl FeedbackPayload {
    fn parse(query: Query, content: Value) -> CoreResult<(String, bool)> {
        match serde_json::from_value(content) {
            Ok(Self::Text(text)) => Ok((text, true)),
            Ok(Self::Object { feedback, ok }) => Ok((feedback, ok)),
            Err(e) => Err(CoreError::handler_failed(query.as_str(), e.to_string())),
        }
    }
}

/// Content of `display*` messages: one node or a list of nodes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PageContent {
    One(Node),
    Many(Vec<Node>),
}

/// The page driven by one socket session
///
/// Layout: `body > [div header] [nav menu] p.feedbackBox main`.
pub struct Page {
    doc: InMemoryDocument,
    main: NodeId,
    logged_in: bool,
    snapshot: Option<PathBuf>,
}

impl Page {
    /// Build the page skeleton around `chrome`
    pub fn new(chrome: &PageChrome) -> CoreResult<Self> {
        let mut doc = InMemoryDocument::new();
        let body = doc.body();

        let mut renderer = TreeRenderer::new(&mut doc);
        let header = (!chrome.header.is_empty())
            .then(|| renderer.render_header(&chrome.header))
            .transpose()?;
        let menu = chrome
            .menu
            .as_ref()
            .map(|menu| renderer.render_menu(menu))
            .transpose()?;

        for id in header.into_iter().chain(menu) {
            doc.append_child(body, id)?;
        }

        let feedback = doc.create_element(&TagName::new("p")?);
        doc.set_attribute(feedback, "class", &format!("{FEEDBACK_CLASS} {HIDDEN_CLASS}"))?;
        doc.append_child(body, feedback)?;

        let main = doc.create_element(&TagName::new("main")?);
        doc.append_child(body, main)?;

        Ok(Self {
            doc,
            main,
            logged_in: false,
            snapshot: None,
        })
    }

    /// Write the rendered page to `path` after every handled message
    #[must_use]
    pub fn with_snapshot(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot = Some(path.into());
        self
    }

    pub fn document(&self) -> &InMemoryDocument {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut InMemoryDocument {
        &mut self.doc
    }

    /// Content region replaced by `display*` messages
    pub fn main(&self) -> NodeId {
        self.main
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    /// Current feedback box state
    pub fn feedback_state(&self) -> CoreResult<FeedbackState> {
        feedback_state(&self.doc)
    }

    /// Text of the feedback box
    pub fn feedback_text(&self) -> CoreResult<String> {
        feedback_text(&self.doc)
    }

    /// Whole page as HTML
    pub fn html(&self) -> String {
        format!("<!DOCTYPE html>\n<html>{}</html>\n", self.doc.to_html(self.doc.body()))
    }

    fn show_feedback(&mut self, query: Query, content: Value) -> CoreResult<bool> {
        let (feedback, ok) = FeedbackPayload::parse(query, content)?;
        FeedbackBox::new(&mut self.doc).print(&feedback, ok)?;
        self.write_snapshot();
        Ok(ok)
    }

    fn display(&mut self, query: Query, content: Value) -> CoreResult<()> {
        let nodes = match serde_json::from_value(content) {
            Ok(PageContent::One(node)) => vec![node],
            Ok(PageContent::Many(nodes)) => nodes,
            Err(e) => return Err(CoreError::handler_failed(query.as_str(), e.to_string())),
        };

        self.doc.clear_children(self.main)?;
        self.doc.set_attribute(self.main, "data-page", query.as_str())?;
        TreeRenderer::new(&mut self.doc).render_into(self.main, &nodes)?;
        tracing::debug!(page = query.as_str(), nodes = nodes.len(), "Page displayed");
        self.write_snapshot();
        Ok(())
    }

    fn write_snapshot(&self) {
        let Some(path) = &self.snapshot else {
            return;
        };
        if let Err(e) = std::fs::write(path, self.html()) {
            tracing::warn!("Failed to write page snapshot {}: {e}", path.display());
        }
    }
}

impl QueryHandler for Page {
    fn registration(&mut self, content: Value) -> CoreResult<()> {
        self.show_feedback(Query::Registration, content).map(drop)
    }

    fn account_updated(&mut self, content: Value) -> CoreResult<()> {
        self.show_feedback(Query::AccountUpdated, content).map(drop)
    }

    fn login(&mut self, content: Value) -> CoreResult<()> {
        self.logged_in = self.show_feedback(Query::Login, content)?;
        Ok(())
    }

    fn logout(&mut self, content: Value) -> CoreResult<()> {
        self.logged_in = false;
        self.show_feedback(Query::Logout, content).map(drop)
    }

    fn item_removed(&mut self, content: Value) -> CoreResult<()> {
        self.show_feedback(Query::ItemRemoved, content).map(drop)
    }

    fn display_home(&mut self, content: Value) -> CoreResult<()> {
        self.display(Query::DisplayHome, content)
    }

    fn display_item(&mut self, content: Value) -> CoreResult<()> {
        self.display(Query::DisplayItem, content)
    }

    fn display_account(&mut self, content: Value) -> CoreResult<()> {
        self.display(Query::DisplayAccount, content)
    }

    fn display_contrat(&mut self, content: Value) -> CoreResult<()> {
        self.display(Query::DisplayContrat, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn feedback_payload_shapes() {
        assert_eq!(
            FeedbackPayload::parse(Query::Login, json!("Welcome")).unwrap(),
            ("Welcome".to_string(), true)
        );
        assert_eq!(
            FeedbackPayload::parse(Query::Login, json!({ "message": "Bad password" })).unwrap(),
            ("Bad password".to_string(), false)
        );
        assert!(FeedbackPayload::parse(Query::Login, json!(42)).is_err());
    }

    #[test]
    fn feedback_text_is_required() {
        let err = FeedbackPayload::parse(Query::Login, json!({ "nick": "bob" })).unwrap_err();
        assert!(matches!(err, CoreError::HandlerFailed { query, .. } if query == "login"));
        assert!(FeedbackPayload::parse(Query::Logout, json!({ "ok": true })).is_err());
        assert_eq!(
            FeedbackPayload::parse(Query::Logout, json!({ "feedback": "" })).unwrap(),
            (String::new(), false)
        );
    }

    #[test]
    fn skeleton_without_chrome() {
        let page = Page::new(&PageChrome::default()).unwrap();
        assert_eq!(
            page.document().to_html(page.document().body()),
            r#"<body><p class="feedbackBox hidden"></p><main></main></body>"#
        );
        assert_eq!(page.feedback_state().unwrap(), FeedbackState::Hidden);
    }
}
