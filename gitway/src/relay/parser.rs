//! GitHub webhook payload normalization.
//!
//! Only two values are consumed: the top-level `action` and the author id at
//! `pull_request.user.id`. Any other shape of event still normalizes; absent or
//! mistyped fields become empty/zero, and a bare `null` body is an empty event.
//! Only a body that is not a JSON object or `null` is rejected.

use serde_json::Value;
use tracing::debug;

use super::error::ParseError;

/// Provider-independent view of a webhook event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedEvent {
    pub action: String,
    /// Account id of the actor; 0 when the payload does not carry one.
    pub actor_id: i64,
}

/// Parse a verified webhook body.
///
/// Must only be called on payloads that already passed signature verification.
pub fn parse(payload: &[u8]) -> Result<NormalizedEvent, ParseError> {
    let value: Value = serde_json::from_slice(payload)?;
    if value.is_null() {
        debug!("event_normalized_from_null");
        return Ok(NormalizedEvent::default());
    }
    let object = value.as_object().ok_or(ParseError::NotAnObject)?;

    let action = object
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let actor_id = value
        .pointer("/pull_request/user/id")
        .and_then(Value::as_i64)
        .unwrap_or(0);

    debug!(action = %action, actor_id = actor_id, "event_normalized");

    Ok(NormalizedEvent { action, actor_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pull_request_event() {
        let event = parse(br#"{"action":"opened","pull_request":{"user":{"id":42}}}"#).unwrap();
        assert_eq!(
            event,
            NormalizedEvent {
                action: "opened".to_string(),
                actor_id: 42
            }
        );
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let payload = br#"{
            "action": "synchronize",
            "number": 7,
            "pull_request": {
                "title": "Fix things",
                "user": {"login": "octocat", "id": 583231, "type": "User"}
            },
            "repository": {"full_name": "octo/repo"}
        }"#;

        let event = parse(payload).unwrap();
        assert_eq!(event.action, "synchronize");
        assert_eq!(event.actor_id, 583231);
    }

    #[test]
    fn test_parse_missing_pull_request() {
        // e.g. a push or ping event
        let event = parse(br#"{"action":"created","comment":{"id":1}}"#).unwrap();
        assert_eq!(event.action, "created");
        assert_eq!(event.actor_id, 0);
    }

    #[test]
    fn test_parse_missing_action() {
        let event = parse(br#"{"pull_request":{"user":{"id":9}}}"#).unwrap();
        assert_eq!(event.action, "");
        assert_eq!(event.actor_id, 9);
    }

    #[test]
    fn test_parse_empty_object() {
        assert_eq!(parse(b"{}").unwrap(), NormalizedEvent::default());
    }

    #[test]
    fn test_parse_mistyped_fields() {
        let event =
            parse(br#"{"action":5,"pull_request":{"user":{"id":"not-a-number"}}}"#).unwrap();
        assert_eq!(event, NormalizedEvent::default());

        let event = parse(br#"{"action":"closed","pull_request":null}"#).unwrap();
        assert_eq!(event.action, "closed");
        assert_eq!(event.actor_id, 0);
    }

    #[test]
    fn test_parse_truncated_payload() {
        let err = parse(br#"{"action":"opened","pull_request":{"user""#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_parse_not_json() {
        assert!(matches!(parse(b"payload=form"), Err(ParseError::Json(_))));
        assert!(matches!(parse(b""), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_parse_non_object_json() {
        assert!(matches!(parse(b"[1,2,3]"), Err(ParseError::NotAnObject)));
        assert!(matches!(parse(b"\"opened\""), Err(ParseError::NotAnObject)));
        assert!(matches!(parse(b"42"), Err(ParseError::NotAnObject)));
    }

    #[test]
    fn test_parse_null_is_empty_event() {
        assert_eq!(parse(b"null").unwrap(), NormalizedEvent::default());
        assert_eq!(parse(b" null\n").unwrap(), NormalizedEvent::default());
    }
}
