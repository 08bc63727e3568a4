use crate::domain::error_code::ErrorCode;

/// JSON object carried in `response.data`.
pub type ResponseData = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, PartialEq)]
/// Successful envelope returned by the protocol engine.
pub struct ApiResponse {
    pub error_code: ErrorCode,
    /// `response.data`; empty when the server omitted it.
    pub data: ResponseData,
}

#[derive(Debug, Clone, PartialEq)]
/// Data of an accepted `push_msg` call.
///
/// `n_raw_sms` and `credits` keep the server's text: strings verbatim, any
/// other JSON value in its JSON form.
pub struct PushMsgResponse {
    /// Number of SMS parts the message was split into.
    pub n_raw_sms: String,
    /// Price of a single part, as reported by the server.
    pub credits: String,
    /// Any other fields returned alongside.
    pub other: ResponseData,
}

impl PushMsgResponse {
    /// `n_raw_sms` as a count, when it is a non-negative integral number.
    ///
    /// Accepts `2`, `"2"` and `2.0`.
    pub fn parts(&self) -> Option<u32> {
        let trimmed = self.n_raw_sms.trim();
        if let Ok(count) = trimmed.parse::<u32>() {
            return Some(count);
        }
        let value = trimmed.parse::<f64>().ok()?;
        if value.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&value) {
            Some(value as u32)
        } else {
            None
        }
    }
}
