use serde::Deserialize;
use serde_json::Value;

use super::TransportError;
use crate::domain::{ErrorCode, ResponseData};

const ERR_CODE_PATH: &str = "response.msg.err_code";
const DATA_PATH: &str = "response.data";

#[derive(Debug, Clone, Deserialize)]
struct EnvelopeJson {
    #[serde(default)]
    response: Option<ResponseJson>,
}

#[derive(Debug, Clone, Deserialize)]
struct ResponseJson {
    #[serde(default)]
    msg: Option<MsgJson>,
    #[serde(default)]
    data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct MsgJson {
    #[serde(default)]
    err_code: Option<TransportCode>,
    #[serde(default)]
    text: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TransportCode {
    Int(i64),
    Float(f64),
    String(String),
}

impl TransportCode {
    /// Fractional codes are truncated toward zero.
    fn into_error_code(self) -> Result<ErrorCode, TransportError> {
        match self {
            Self::Int(value) => Ok(ErrorCode::new(value)),
            Self::Float(value) => Ok(ErrorCode::new(value.trunc() as i64)),
            Self::String(value) => {
                let trimmed = value.trim();
                let parsed = trimmed.parse::<i64>().ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|it| it.is_finite())
                        .map(|it| it.trunc() as i64)
                });
                parsed
                    .map(ErrorCode::new)
                    .ok_or(TransportError::InvalidField {
                        path: ERR_CODE_PATH,
                        value,
                    })
            }
        }
    }
}

/// The parts of `{"response": {"msg": {...}, "data": {...}}}` the client acts on.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub error_code: ErrorCode,
    /// `response.msg.text` when it is a non-empty string.
    pub text: Option<String>,
    /// `response.data`; only decoded for success codes, empty otherwise.
    pub data: ResponseData,
}

pub fn decode_envelope(json: &str) -> Result<Envelope, TransportError> {
    let parsed: EnvelopeJson = serde_json::from_str(json)?;

    let response = parsed
        .response
        .ok_or(TransportError::MissingField { path: "response" })?;
    let msg = response.msg.ok_or(TransportError::MissingField {
        path: "response.msg",
    })?;
    let error_code = msg
        .err_code
        .ok_or(TransportError::MissingField {
            path: ERR_CODE_PATH,
        })?
        .into_error_code()?;

    let text = match msg.text {
        Some(Value::String(text)) if !text.is_empty() => Some(text),
        _ => None,
    };

    let data = if error_code.is_success() {
        decode_data(response.data)?
    } else {
        ResponseData::new()
    };

    Ok(Envelope {
        error_code,
        text,
        data,
    })
}

fn decode_data(data: Option<Value>) -> Result<ResponseData, TransportError> {
    match data {
        None | Some(Value::Null) => Ok(ResponseData::new()),
        Some(Value::Object(map)) => Ok(map),
        // Empty collections are serialized as `[]` by the server.
        Some(Value::Array(items)) if items.is_empty() => Ok(ResponseData::new()),
        Some(other) => Err(TransportError::InvalidField {
            path: DATA_PATH,
            value: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_success_with_string_code() {
        let json = r#"
        {
          "response": {
            "msg": { "err_code": "0", "text": "OK" },
            "data": { "sid": "abc123" }
          }
        }
        "#;

        let envelope = decode_envelope(json).unwrap();
        assert_eq!(envelope.error_code, ErrorCode::new(0));
        assert_eq!(envelope.text.as_deref(), Some("OK"));
        assert_eq!(envelope.data.get("sid"), Some(&Value::from("abc123")));
    }

    #[test]
    fn decode_accepts_numeric_code() {
        let json = r#"{"response":{"msg":{"err_code":36},"data":null}}"#;
        let envelope = decode_envelope(json).unwrap();
        assert_eq!(envelope.error_code, ErrorCode::new(36));
        assert_eq!(envelope.text, None);
    }

    #[test]
    fn decode_reports_each_missing_level() {
        let cases = [
            (r#"{"data":{"n_raw_sms":1}}"#, "response"),
            (r#"{"response":null}"#, "response"),
            (r#"{"response":{"data":{"credits":"1"}}}"#, "response.msg"),
            (r#"{"response":{"msg":{"text":"hi"}}}"#, ERR_CODE_PATH),
            (r#"{"response":{"msg":{"err_code":null}}}"#, ERR_CODE_PATH),
        ];

        for (json, expected) in cases {
            match decode_envelope(json) {
                Err(TransportError::MissingField { path }) => assert_eq!(path, expected),
                other => panic!("unexpected result for {json}: {other:?}"),
            }
        }
    }

    #[test]
    fn decode_truncates_fractional_code() {
        let json = r#"{"response":{"msg":{"err_code":36.0}}}"#;
        assert_eq!(decode_envelope(json).unwrap().error_code, ErrorCode::new(36));

        let json = r#"{"response":{"msg":{"err_code":" 37.9 "}}}"#;
        assert_eq!(decode_envelope(json).unwrap().error_code, ErrorCode::new(37));

        let json = r#"{"response":{"msg":{"err_code":0.0},"data":{"sid":"x"}}}"#;
        let envelope = decode_envelope(json).unwrap();
        assert!(envelope.error_code.is_success());
        assert_eq!(envelope.data.get("sid"), Some(&Value::from("x")));
    }

    #[test]
    fn decode_rejects_non_numeric_code() {
        let json = r#"{"response":{"msg":{"err_code":"abc"}}}"#;
        assert!(matches!(
            decode_envelope(json),
            Err(TransportError::InvalidField {
                path: ERR_CODE_PATH,
                ..
            })
        ));
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(matches!(
            decode_envelope("<html>"),
            Err(TransportError::Json(_))
        ));
    }

    #[test]
    fn empty_or_non_string_text_is_ignored() {
        let json = r#"{"response":{"msg":{"err_code":"2","text":""}}}"#;
        assert_eq!(decode_envelope(json).unwrap().text, None);

        let json = r#"{"response":{"msg":{"err_code":"2","text":"  "}}}"#;
        assert_eq!(decode_envelope(json).unwrap().text.as_deref(), Some("  "));

        let json = r#"{"response":{"msg":{"err_code":"2","text":17}}}"#;
        assert_eq!(decode_envelope(json).unwrap().text, None);
    }

    #[test]
    fn data_shape_is_only_checked_on_success() {
        let json = r#"{"response":{"msg":{"err_code":"0"},"data":[]}}"#;
        assert!(decode_envelope(json).unwrap().data.is_empty());

        let json = r#"{"response":{"msg":{"err_code":"0"},"data":"oops"}}"#;
        assert!(matches!(
            decode_envelope(json),
            Err(TransportError::InvalidField {
                path: DATA_PATH,
                ..
            })
        ));

        let json = r#"{"response":{"msg":{"err_code":"36"},"data":"oops"}}"#;
        assert_eq!(decode_envelope(json).unwrap().error_code, ErrorCode::new(36));
    }
}
