//! Message dispatch service

use serde::Serialize;

use crate::error::CoreResult;
use crate::traits::{Notifier, QueryHandler};
use crate::types::{Envelope, Query};

/// Result of dispatching one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome", content = "query")]
pub enum DispatchOutcome {
    /// The handler for this tag ran
    Handled(Query),
    /// No handler exists for this tag; the user was alerted
    Unknown(String),
}

/// Text shown to the user for an unknown tag
pub fn unknown_query_message(query: &str) -> String {
    format!("{query} unknown !")
}

/// Decode a text frame and dispatch it.
///
/// Malformed frames fail with `MalformedMessage` before any handler runs.
pub fn dispatch_frame<H, N>(
    frame: &str,
    handler: &mut H,
    notifier: &N,
) -> CoreResult<DispatchOutcome>
where
    H: QueryHandler + ?Sized,
    N: Notifier + ?Sized,
{
    let envelope = Envelope::parse(frame)?;
    dispatch_envelope(envelope, handler, notifier)
}

/// Dispatch a decoded message to exactly one handler.
///
/// An unknown tag alerts the user through `notifier` and runs no handler.
pub fn dispatch_envelope<H, N>(
    envelope: Envelope,
    handler: &mut H,
    notifier: &N,
) -> CoreResult<DispatchOutcome>
where
    H: QueryHandler + ?Sized,
    N: Notifier + ?Sized,
{
    match envelope.query() {
        Ok(query) => {
            log::debug!("Dispatching query: {query}");
            handler.handle(query, envelope.content)?;
            Ok(DispatchOutcome::Handled(query))
        }
        Err(unknown) => {
            log::warn!("Unknown query tag: {}", unknown.0);
            notifier.alert(&unknown_query_message(&unknown.0));
            Ok(DispatchOutcome::Unknown(unknown.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::test_utils::{RecordingHandler, RecordingNotifier};
    use crate::traits::HandlerRegistry;
    use serde_json::json;

    #[test]
    fn login_invokes_only_login_handler() {
        let mut handler = RecordingHandler::new();
        let notifier = RecordingNotifier::new();

        let outcome = dispatch_frame(
            r#"{"query":"login","content":{"nick":"alice","ok":true}}"#,
            &mut handler,
            &notifier,
        )
        .unwrap();

        assert_eq!(outcome, DispatchOutcome::Handled(Query::Login));
        assert_eq!(
            handler.calls(),
            &[(Query::Login, json!({ "nick": "alice", "ok": true }))]
        );
        assert!(notifier.alerts().is_empty());
    }

    #[test]
    fn every_known_tag_reaches_its_own_handler() {
        let mut handler = RecordingHandler::new();
        let notifier = RecordingNotifier::new();

        for query in Query::ALL {
            let frame = json!({ "query": query.as_str(), "content": query.as_str() }).to_string();
            dispatch_frame(&frame, &mut handler, &notifier).unwrap();
        }

        let expected: Vec<_> = Query::ALL
            .into_iter()
            .map(|q| (q, json!(q.as_str())))
            .collect();
        assert_eq!(handler.calls(), expected.as_slice());
    }

    #[test]
    fn unknown_tag_alerts_and_invokes_nothing() {
        let mut handler = RecordingHandler::new();
        let notifier = RecordingNotifier::new();

        let outcome = dispatch_frame(
            r#"{"query":"itemFavoritesRemoved","content":{}}"#,
            &mut handler,
            &notifier,
        )
        .unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Unknown("itemFavoritesRemoved".to_string())
        );
        assert!(handler.calls().is_empty());
        assert_eq!(notifier.alerts(), vec!["itemFavoritesRemoved unknown !"]);
    }

    #[test]
    fn malformed_frame_runs_nothing() {
        let mut handler = RecordingHandler::new();
        let notifier = RecordingNotifier::new();

        let err = dispatch_frame("{query: login}", &mut handler, &notifier).unwrap_err();
        assert!(matches!(err, CoreError::MalformedMessage(_)));
        assert!(handler.calls().is_empty());
        assert!(notifier.alerts().is_empty());
    }

    #[test]
    fn frame_without_query_is_malformed_and_not_alerted() {
        let mut handler = RecordingHandler::new();
        let notifier = RecordingNotifier::new();

        for frame in [r#"{"content":{"nick":"bob"}}"#, r#"{"query":null}"#, r#"{"query":7}"#] {
            let err = dispatch_frame(frame, &mut handler, &notifier).unwrap_err();
            assert!(matches!(err, CoreError::MalformedMessage(_)), "{frame}");
        }
        assert!(handler.calls().is_empty());
        assert!(notifier.alerts().is_empty());
    }

    #[test]
    fn handler_error_is_returned() {
        let mut handler = RecordingHandler::new().failing_on(Query::Logout);
        let notifier = RecordingNotifier::new();

        let err = dispatch_frame(r#"{"query":"logout"}"#, &mut handler, &notifier).unwrap_err();
        assert!(matches!(err, CoreError::HandlerFailed { ref query, .. } if query == "logout"));
    }

    #[test]
    fn registry_without_handler_fails_fast() {
        let mut registry = HandlerRegistry::new().on(Query::Login, |_| Ok(()));
        let notifier = RecordingNotifier::new();

        assert!(dispatch_frame(r#"{"query":"login"}"#, &mut registry, &notifier).is_ok());
        let err = dispatch_frame(r#"{"query":"displayItem"}"#, &mut registry, &notifier)
            .unwrap_err();
        assert!(matches!(err, CoreError::HandlerNotRegistered(q) if q == "displayItem"));
        assert!(notifier.alerts().is_empty());
    }
}
