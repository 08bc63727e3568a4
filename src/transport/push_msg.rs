use serde_json::Value;

use super::TransportError;
use crate::domain::{
    ApiRequest, ApiVersion, MessageText, PushMsg, PushMsgResponse, RawPhoneNumber, ResponseData,
    SenderName,
};

const N_RAW_SMS_FIELD: &str = "n_raw_sms";
const CREDITS_FIELD: &str = "credits";

/// Append the message fields and options of `request` to `base`.
///
/// Options are applied last, so they replace base fields with the same name.
pub fn encode_push_msg_form(mut base: ApiRequest, request: &PushMsg) -> ApiRequest {
    base.insert(RawPhoneNumber::FIELD, request.phone().raw());
    base.insert(MessageText::FIELD, request.text().as_str());

    let options = request.options();
    if let Some(sender_name) = options.sender_name.as_ref() {
        base.insert(SenderName::FIELD, sender_name.as_str());
    }
    if let Some(version) = options.api_version.as_ref() {
        base.insert(ApiVersion::FIELD, version.as_str());
    }
    for (key, value) in &options.extra {
        base.insert(key.as_str(), value.as_str());
    }

    base
}

/// Extract `n_raw_sms` and `credits` from successful push data.
///
/// Both must be present and non-null; the message has already been accepted,
/// so their shape is not checked further.
pub fn decode_push_msg_data(mut data: ResponseData) -> Result<PushMsgResponse, TransportError> {
    let n_raw_sms = take_text(&mut data, N_RAW_SMS_FIELD, "response.data.n_raw_sms")?;
    let credits = take_text(&mut data, CREDITS_FIELD, "response.data.credits")?;

    Ok(PushMsgResponse {
        n_raw_sms,
        credits,
        other: data,
    })
}

fn take_text(
    data: &mut ResponseData,
    field: &str,
    path: &'static str,
) -> Result<String, TransportError> {
    match data.remove(field) {
        None | Some(Value::Null) => Err(TransportError::MissingField { path }),
        Some(Value::String(value)) => Ok(value),
        Some(other) => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::domain::{ApiMethod, PushOptions};

    use super::*;

    fn data(value: Value) -> ResponseData {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn push(options: PushOptions) -> PushMsg {
        PushMsg::new(
            RawPhoneNumber::new("79251234567").unwrap(),
            MessageText::new("hello").unwrap(),
            options,
        )
    }

    #[test]
    fn encode_push_msg_adds_phone_and_text() {
        let base = ApiRequest::new(ApiMethod::PushMsg, &ApiVersion::default());
        let request = encode_push_msg_form(base, &push(PushOptions::default()));

        assert_eq!(
            request.into_form(),
            vec![
                ("api".to_owned(), "1.1".to_owned()),
                ("method".to_owned(), "push_msg".to_owned()),
                ("phone".to_owned(), "79251234567".to_owned()),
                ("text".to_owned(), "hello".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_push_msg_options_override_base_fields() {
        let base = ApiRequest::new(ApiMethod::PushMsg, &ApiVersion::default());
        let options = PushOptions::default()
            .sender_name(SenderName::new("Acme").unwrap())
            .api_version(ApiVersion::new("1.0").unwrap())
            .param("satellite_adv", "IF_EXISTS");
        let request = encode_push_msg_form(base, &push(options));

        assert_eq!(request.get("sender_name"), Some("Acme"));
        assert_eq!(request.get("api"), Some("1.0"));
        assert_eq!(request.get("satellite_adv"), Some("IF_EXISTS"));
    }

    #[test]
    fn decode_push_msg_accepts_numbers_and_strings() {
        let parsed = decode_push_msg_data(data(json!({
            "n_raw_sms": "2",
            "credits": 0.55,
            "sms_id": "777"
        })))
        .unwrap();
        assert_eq!(parsed.n_raw_sms, "2");
        assert_eq!(parsed.parts(), Some(2));
        assert_eq!(parsed.credits, "0.55");
        assert_eq!(parsed.other.get("sms_id"), Some(&json!("777")));
        assert!(!parsed.other.contains_key("n_raw_sms"));

        let parsed = decode_push_msg_data(data(json!({ "n_raw_sms": 1, "credits": "1.20" }))).unwrap();
        assert_eq!(parsed.n_raw_sms, "1");
        assert_eq!(parsed.parts(), Some(1));
        assert_eq!(parsed.credits, "1.20");
    }

    #[test]
    fn decode_push_msg_keeps_unusual_values() {
        let parsed = decode_push_msg_data(data(json!({ "n_raw_sms": 1.0, "credits": "0.5" }))).unwrap();
        assert_eq!(parsed.n_raw_sms, "1.0");
        assert_eq!(parsed.parts(), Some(1));

        let parsed = decode_push_msg_data(data(json!({
            "n_raw_sms": "many",
            "credits": { "amount": 1 }
        })))
        .unwrap();
        assert_eq!(parsed.n_raw_sms, "many");
        assert_eq!(parsed.parts(), None);
        assert_eq!(parsed.credits, r#"{"amount":1}"#);
    }

    #[test]
    fn decode_push_msg_requires_both_fields() {
        assert!(matches!(
            decode_push_msg_data(data(json!({ "credits": "1" }))),
            Err(TransportError::MissingField { .. })
        ));
        assert!(matches!(
            decode_push_msg_data(data(json!({ "n_raw_sms": 1 }))),
            Err(TransportError::MissingField { .. })
        ));
        assert!(matches!(
            decode_push_msg_data(data(json!({ "n_raw_sms": null, "credits": "1" }))),
            Err(TransportError::MissingField { .. })
        ));
    }
}
