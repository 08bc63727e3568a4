//! Transport layer: wire-format details (form encoding, JSON envelope decoding).

mod envelope;
mod login;
mod push_msg;

pub use envelope::decode_envelope;
pub use login::{decode_login_data, encode_login_form};
pub use push_msg::{decode_push_msg_data, encode_push_msg_form};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing `{path}`")]
    MissingField { path: &'static str },

    #[error("`{path}` has unexpected value: {value}")]
    InvalidField { path: &'static str, value: String },
}
