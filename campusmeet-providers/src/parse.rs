use anyhow::Context;
use campusmeet_core::types::{CallId, CallRecord};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct WireCall {
    id: CallId,
    #[serde(default)]
    starts_at: Option<DateTime<Utc>>,
    #[serde(default)]
    custom: Option<WireCustom>,
}

#[derive(Debug, Deserialize)]
struct WireCustom {
    #[serde(default)]
    description: Option<String>,
}

impl From<WireCall> for CallRecord {
    fn from(wire: WireCall) -> Self {
        CallRecord {
            id: wire.id,
            starts_at: wire.starts_at,
            description: wire.custom.and_then(|c| c.description),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireCallEnvelope {
    call: WireCall,
}

#[derive(Debug, Deserialize)]
struct WireCallList {
    calls: Vec<WireCall>,
}

pub fn parse_call(body: &[u8]) -> anyhow::Result<CallRecord> {
    let envelope: WireCallEnvelope =
        serde_json::from_slice(body).context("decode call JSON")?;
    Ok(envelope.call.into())
}

pub fn parse_call_list(body: &[u8]) -> anyhow::Result<Vec<CallRecord>> {
    let list: WireCallList = serde_json::from_slice(body).context("decode call list JSON")?;
    Ok(list.calls.into_iter().map(Into::into).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_call_with_start_and_description() {
        let body = br#"{"call":{"id":"7f8b6a1e-1f7e-4f9a-9b1c-2d3e4f5a6b7c","starts_at":"2026-03-14T15:30:00Z","custom":{"description":"Advising"}}}"#;
        let call = parse_call(body).unwrap();
        assert_eq!(call.id.to_string(), "7f8b6a1e-1f7e-4f9a-9b1c-2d3e4f5a6b7c");
        assert_eq!(
            call.starts_at,
            Some(Utc.with_ymd_and_hms(2026, 3, 14, 15, 30, 0).unwrap())
        );
        assert_eq!(call.description.as_deref(), Some("Advising"));
    }

    #[test]
    fn tolerates_missing_start_and_custom() {
        let body = br#"{"call":{"id":"7f8b6a1e-1f7e-4f9a-9b1c-2d3e4f5a6b7c"}}"#;
        let call = parse_call(body).unwrap();
        assert_eq!(call.starts_at, None);
        assert_eq!(call.description, None);
    }

    #[test]
    fn parses_call_list() {
        let body = br#"{"calls":[
            {"id":"7f8b6a1e-1f7e-4f9a-9b1c-2d3e4f5a6b7c","starts_at":"2026-03-14T15:30:00Z"},
            {"id":"0a1b2c3d-4e5f-4a6b-8c9d-0e1f2a3b4c5d"}
        ]}"#;
        let calls = parse_call_list(body).unwrap();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].starts_at.is_some());
        assert!(calls[1].starts_at.is_none());
    }

    #[test]
    fn malformed_body_errors() {
        assert!(parse_call(b"not json").is_err());
        assert!(parse_call_list(br#"{"call":{}}"#).is_err());
    }
}
