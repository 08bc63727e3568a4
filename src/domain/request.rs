use std::collections::BTreeMap;

use crate::domain::value::{ApiVersion, MessageText, RawPhoneNumber, SenderName};

/// Form field selecting the response format.
pub const FORMAT_FIELD: &str = "format";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// API method name sent as `method`.
pub enum ApiMethod {
    Login,
    PushMsg,
}

impl ApiMethod {
    /// Form field name used by sms24x7 (`method`).
    pub const FIELD: &'static str = "method";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::PushMsg => "push_msg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Form payload for a single API call.
///
/// Later inserts replace earlier ones. `format` is owned by the client and is
/// overwritten right before the request goes out.
pub struct ApiRequest {
    params: BTreeMap<String, String>,
}

impl ApiRequest {
    /// Start a request for `method` speaking API `version`.
    pub fn new(method: ApiMethod, version: &ApiVersion) -> Self {
        let mut request = Self {
            params: BTreeMap::new(),
        };
        request.insert(ApiMethod::FIELD, method.as_str());
        request.insert(ApiVersion::FIELD, version.as_str());
        request
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Method name currently set on the request.
    pub fn method(&self) -> Option<&str> {
        self.get(ApiMethod::FIELD)
    }

    pub(crate) fn force_json_format(&mut self) {
        self.insert(FORMAT_FIELD, "json");
    }

    pub(crate) fn into_form(self) -> Vec<(String, String)> {
        self.params.into_iter().collect()
    }
}

#[derive(Debug, Clone, Default)]
/// Optional `push_msg` parameters.
///
/// Everything set here is merged after the base fields and wins over them,
/// except `format`.
pub struct PushOptions {
    pub sender_name: Option<SenderName>,
    /// Per-call override of the client's API version.
    pub api_version: Option<ApiVersion>,
    /// Provider-specific parameters such as `satellite_adv`.
    pub extra: BTreeMap<String, String>,
}

impl PushOptions {
    /// Add a raw provider parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn sender_name(mut self, sender_name: SenderName) -> Self {
        self.sender_name = Some(sender_name);
        self
    }

    pub fn api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = Some(api_version);
        self
    }
}

#[derive(Debug, Clone)]
/// A single `push_msg` call: one recipient, one text.
pub struct PushMsg {
    phone: RawPhoneNumber,
    text: MessageText,
    options: PushOptions,
}

impl PushMsg {
    pub fn new(phone: RawPhoneNumber, text: MessageText, options: PushOptions) -> Self {
        Self {
            phone,
            text,
            options,
        }
    }

    pub fn phone(&self) -> &RawPhoneNumber {
        &self.phone
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }

    pub fn options(&self) -> &PushOptions {
        &self.options
    }
}
