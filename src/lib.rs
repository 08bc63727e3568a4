//! Typed Rust client for the sms24x7 HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format quirks, and a small client layer that owns the HTTP client and the
//! login session.
//!
//! ```rust,no_run
//! use sms24x7::{Credentials, MessageText, PushOptions, RawPhoneNumber, Sms24x7Client};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sms24x7::Sms24x7Error> {
//!     let client = Sms24x7Client::new(Credentials::new("me@example.com", "...")?);
//!     let phone = RawPhoneNumber::new("79251234567")?;
//!     let text = MessageText::new("hello")?;
//!     let sent = client
//!         .send_message_with_credentials(phone, text, PushOptions::default())
//!         .await?;
//!     println!("{} part(s), {} each", sent.n_raw_sms, sent.credits);
//!     Ok(())
//! }
//! ```
//!
//! Errors carry a [`ErrorKind`] so callers can branch on the failure category, for
//! example logging in again on [`ErrorKind::SessionExpired`].
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{Credentials, Scheme, Sms24x7Client, Sms24x7ClientBuilder, Sms24x7Error};
pub use domain::{
    ApiMethod, ApiRequest, ApiResponse, ApiVersion, ErrorCode, ErrorKind, MessageText,
    PhoneNumber, PushOptions, PushMsgResponse, RawPhoneNumber, SenderName, SessionCookie,
    ValidationError,
};
