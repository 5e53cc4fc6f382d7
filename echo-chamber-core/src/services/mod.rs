//! Business logic service layer

mod dispatcher;
mod feedback;
mod renderer;
mod socket_client;

pub use dispatcher::{dispatch_envelope, dispatch_frame, unknown_query_message, DispatchOutcome};
pub use feedback::{
    feedback_state, feedback_text, FeedbackBox, FEEDBACK_CLASS, FEEDBACK_TAG, HIDDEN_CLASS, OK_CLASS,
};
pub use renderer::TreeRenderer;
pub use socket_client::{OpenOutcome, SessionStats, SocketClient};
