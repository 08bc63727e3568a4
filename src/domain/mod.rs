//! Domain layer: strong types with validation and invariants (no I/O).

mod error_code;
mod request;
mod response;
mod validation;
mod value;

pub use error_code::{ErrorCode, ErrorKind};
pub use request::{ApiMethod, ApiRequest, FORMAT_FIELD, PushMsg, PushOptions};
pub use response::{ApiResponse, PushMsgResponse, ResponseData};
pub use validation::ValidationError;
pub use value::{
    ApiHost, ApiVersion, Email, MessageText, Password, PhoneNumber, RawPhoneNumber, SenderName,
    SessionCookie, SessionId,
};
