use serde_json::Value;

use super::TransportError;
use crate::domain::{ApiMethod, ApiRequest, ApiVersion, ResponseData, SessionId};

const SID_PATH: &str = "response.data.sid";

/// Base `login` request; the client adds credentials.
pub fn encode_login_form(version: &ApiVersion) -> ApiRequest {
    ApiRequest::new(ApiMethod::Login, version)
}

pub fn decode_login_data(data: &ResponseData) -> Result<SessionId, TransportError> {
    match data.get(SessionId::FIELD) {
        None | Some(Value::Null) => Err(TransportError::MissingField { path: SID_PATH }),
        Some(Value::String(sid)) => {
            SessionId::new(sid.as_str()).map_err(|_| TransportError::MissingField { path: SID_PATH })
        }
        Some(other) => Err(TransportError::InvalidField {
            path: SID_PATH,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn data(value: Value) -> ResponseData {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn encode_login_sets_method_and_version() {
        let request = encode_login_form(&ApiVersion::default());
        assert_eq!(request.method(), Some("login"));
        assert_eq!(request.get("api"), Some("1.1"));
        assert_eq!(request.get("format"), None);
    }

    #[test]
    fn decode_login_extracts_sid() {
        let sid = decode_login_data(&data(json!({ "sid": "abc123" }))).unwrap();
        assert_eq!(sid.as_str(), "abc123");
    }

    #[test]
    fn decode_login_requires_sid() {
        for value in [json!({}), json!({ "sid": null }), json!({ "sid": "" })] {
            assert!(matches!(
                decode_login_data(&data(value)),
                Err(TransportError::MissingField { path: SID_PATH })
            ));
        }
    }

    #[test]
    fn decode_login_rejects_non_string_sid() {
        assert!(matches!(
            decode_login_data(&data(json!({ "sid": ["a"] }))),
            Err(TransportError::InvalidField { path: SID_PATH, .. })
        ));
    }
}
