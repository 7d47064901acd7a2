//! Transport envelope sent from the ingestor to the sink.
//!
//! Wire format (field names are shared with the sink):
//!
//! ```text
//! { "id": "<uuid>", "gitId": 42, "messageType": "github", "payload": "<base64>" }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::parser::NormalizedEvent;

/// Message type tag for GitHub-originated envelopes.
pub const GITHUB_MESSAGE_TYPE: &str = "github";

/// A normalized, uniquely identified webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Fresh random v4 id, never derived from the payload
    pub id: Uuid,
    /// Actor id copied from the normalized event
    pub git_id: i64,
    /// Source provider tag
    pub message_type: String,
    /// Raw webhook body, verbatim
    #[serde(with = "payload_base64")]
    pub payload: Vec<u8>,
}

/// Wrap a verified payload and its normalized metadata into an envelope.
///
/// Each call draws a new id, so identical webhooks yield distinct envelopes.
pub fn build(normalized: &NormalizedEvent, raw_payload: &[u8], message_type: &str) -> Envelope {
    Envelope {
        id: Uuid::new_v4(),
        git_id: normalized.actor_id,
        message_type: message_type.to_string(),
        payload: raw_payload.to_vec(),
    }
}

/// Standard padded base64, the encoding byte slices get in the sink's JSON.
mod payload_base64 {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn opened() -> NormalizedEvent {
        NormalizedEvent {
            action: "opened".to_string(),
            actor_id: 42,
        }
    }

    #[test]
    fn test_build_copies_metadata() {
        let payload = br#"{"action":"opened"}"#;
        let envelope = build(&opened(), payload, GITHUB_MESSAGE_TYPE);

        assert_eq!(envelope.git_id, 42);
        assert_eq!(envelope.message_type, "github");
        assert_eq!(envelope.payload, payload.to_vec());
        assert_eq!(envelope.id.get_version_num(), 4);
    }

    #[test]
    fn test_build_ids_are_unique() {
        let payload = b"{}";
        let ids: HashSet<Uuid> = (0..10_000)
            .map(|_| build(&opened(), payload, GITHUB_MESSAGE_TYPE).id)
            .collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_wire_field_names() {
        let envelope = build(&opened(), b"hi", GITHUB_MESSAGE_TYPE);
        let json: serde_json::Value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["id"], envelope.id.to_string());
        assert_eq!(json["gitId"], 42);
        assert_eq!(json["messageType"], "github");
        assert_eq!(json["payload"], "aGk=");
        assert_eq!(json.as_object().unwrap().len(), 4);
    }

    #[test]
    fn test_envelope_round_trip_preserves_payload() {
        // Not valid UTF-8, must survive untouched
        let payload: Vec<u8> = vec![0x00, 0xff, 0xfe, b'{', 0x80, b'"', b'\n'];
        let envelope = build(&opened(), &payload, GITHUB_MESSAGE_TYPE);

        let bytes = serde_json::to_vec(&envelope).unwrap();
        let decoded: Envelope = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(decoded, envelope);
        assert_eq!(decoded.payload, payload);
    }

    #[test]
    fn test_decode_rejects_invalid_base64() {
        let json = format!(
            r#"{{"id":"{}","gitId":1,"messageType":"github","payload":"%%%"}}"#,
            Uuid::new_v4()
        );
        assert!(serde_json::from_str::<Envelope>(&json).is_err());
    }
}
