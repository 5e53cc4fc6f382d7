//! Feedback box service

use crate::dom::NodeId;
use crate::error::{CoreError, CoreResult};
use crate::traits::Document;
use crate::types::FeedbackState;

/// Tag of the feedback box element
pub const FEEDBACK_TAG: &str = "p";
/// Class selecting the feedback box
pub const FEEDBACK_CLASS: &str = "feedbackBox";
/// Class that hides the box
pub const HIDDEN_CLASS: &str = "hidden";
/// Class for success styling
pub const OK_CLASS: &str = "feedbackOk";

/// Feedback box service
///
/// Operates on the first `p.feedbackBox` element of the document.
pub struct FeedbackBox<'a, D: Document + ?Sized> {
    doc: &'a mut D,
}

impl<'a, D: Document + ?Sized> FeedbackBox<'a, D> {
    pub fn new(doc: &'a mut D) -> Self {
        Self { doc }
    }

    fn element(&self) -> CoreResult<NodeId> {
        find_feedback_box(&*self.doc)
    }

    /// Remove the current feedback text
    pub fn clear(&mut self) -> CoreResult<()> {
        let id = self.element()?;
        self.doc.clear_children(id)
    }

    /// Show `feedback`, or hide the box when it is empty.
    ///
    /// `is_ok` adds success styling; it is applied even when the box ends up
    /// hidden.
    pub fn print(&mut self, feedback: &str, is_ok: bool) -> CoreResult<()> {
        let id = self.element()?;
        self.doc.remove_class(id, OK_CLASS)?;
        self.doc.clear_children(id)?;

        if feedback.is_empty() {
            self.doc.add_class(id, HIDDEN_CLASS)?;
        } else {
            let text = self.doc.create_text_node(feedback);
            self.doc.append_child(id, text)?;
            self.doc.remove_class(id, HIDDEN_CLASS)?;
        }

        if is_ok {
            self.doc.add_class(id, OK_CLASS)?;
        }
        Ok(())
    }

    /// Current visible state of the box
    pub fn state(&self) -> CoreResult<FeedbackState> {
        feedback_state(&*self.doc)
    }

    /// Text currently shown in the box
    pub fn text(&self) -> CoreResult<String> {
        feedback_text(&*self.doc)
    }
}

fn find_feedback_box<D: Document + ?Sized>(doc: &D) -> CoreResult<NodeId> {
    doc.query_selector(FEEDBACK_TAG, FEEDBACK_CLASS)
        .ok_or_else(|| CoreError::ElementNotFound(format!("{FEEDBACK_TAG}.{FEEDBACK_CLASS}")))
}

/// Visible state of the feedback box in `doc`
pub fn feedback_state<D: Document + ?Sized>(doc: &D) -> CoreResult<FeedbackState> {
    let id = find_feedback_box(doc)?;
    if doc.has_class(id, HIDDEN_CLASS) {
        return Ok(FeedbackState::Hidden);
    }
    Ok(FeedbackState::Visible {
        ok: doc.has_class(id, OK_CLASS),
    })
}

/// Text shown in the feedback box of `doc`
pub fn feedback_text<D: Document + ?Sized>(doc: &D) -> CoreResult<String> {
    let id = find_feedback_box(doc)?;
    Ok(doc.text_content(id))
}
