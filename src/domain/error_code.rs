use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Closed set of failure categories a caller can match on.
///
/// Server error codes map onto these through a static table; local failures
/// (transport, malformed responses, missing session) are projected onto
/// [`ErrorKind::Interface`] and [`ErrorKind::NoLogin`].
pub enum ErrorKind {
    Auth,
    AccountBlocked,
    AccountNotFound,
    ActionRejected,
    ApiVersion,
    Arguments,
    Balance,
    Delivery,
    DomainBusy,
    Encoding,
    Interface,
    Internal,
    MessagesNotDelivery,
    NoGate,
    NoLogin,
    /// Fallback for positive codes missing from the table.
    Other,
    Password,
    Save,
    SenderName,
    SessionExpired,
    Spam,
    TarifNotFound,
    Timeout,
    UnauthorizedPartner,
    Undefined,
    /// Basic account settings are missing on the provider side.
    Base,
}

const ERROR_TABLE: &[(i64, ErrorKind, &str)] = &[
    (2, ErrorKind::Auth, "Wrong login or password"),
    (3, ErrorKind::Timeout, "Inactive for more than 24 minutes"),
    (4, ErrorKind::AccountBlocked, "Account is blocked"),
    (5, ErrorKind::Undefined, "Undefined method"),
    (6, ErrorKind::ApiVersion, "Wrong API version"),
    (7, ErrorKind::Arguments, "Not all necessary parameters are set"),
    (10, ErrorKind::UnauthorizedPartner, "Partner is not authorized"),
    (11, ErrorKind::Save, "Error saving"),
    (15, ErrorKind::ActionRejected, "Action rejected"),
    (16, ErrorKind::Password, "Wrong password"),
    (18, ErrorKind::SessionExpired, "Session expired"),
    (19, ErrorKind::Internal, "Internal operator error"),
    (22, ErrorKind::AccountNotFound, "Account is not found"),
    (29, ErrorKind::NoGate, "Mobile operator gateway is not connected"),
    (35, ErrorKind::Encoding, "Wrong encoding"),
    (36, ErrorKind::Balance, "Not enough money"),
    (37, ErrorKind::Spam, "Spam detected"),
    (38, ErrorKind::Spam, "Spam detected"),
    (59, ErrorKind::Spam, "Spam detected"),
    (39, ErrorKind::SenderName, "Invalid sender name"),
    (40, ErrorKind::Delivery, "Undeliverable"),
    (42, ErrorKind::NoLogin, "Login to continue"),
    (43, ErrorKind::DomainBusy, "Domain busy"),
    (45, ErrorKind::Base, "Basic settings not found"),
    (44, ErrorKind::TarifNotFound, "Tarif is not found"),
    (47, ErrorKind::TarifNotFound, "Tarif is not found"),
    (58, ErrorKind::MessagesNotDelivery, "Messages are not delivered"),
];

impl ErrorKind {
    /// Map a failure code to its kind. Unknown positive codes map to [`ErrorKind::Other`].
    ///
    /// Returns `None` for success codes (zero and below).
    pub fn from_code(code: i64) -> Option<Self> {
        if code <= 0 {
            return None;
        }
        Some(lookup(code).map_or(Self::Other, |(kind, _)| kind))
    }

    /// Canonical error name, e.g. `"BalanceError"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Auth => "AuthError",
            Self::AccountBlocked => "AccountBlockedError",
            Self::AccountNotFound => "AccountNotFoundError",
            Self::ActionRejected => "ActionRejectedError",
            Self::ApiVersion => "ApiVersionError",
            Self::Arguments => "ArgumentsError",
            Self::Balance => "BalanceError",
            Self::Delivery => "DeliveryError",
            Self::DomainBusy => "DomainBusyError",
            Self::Encoding => "EncodingError",
            Self::Interface => "InterfaceError",
            Self::Internal => "InternalError",
            Self::MessagesNotDelivery => "MessagesNotDeliveryError",
            Self::NoGate => "NoGateError",
            Self::NoLogin => "NoLoginError",
            Self::Other => "OtherError",
            Self::Password => "PasswordError",
            Self::Save => "SaveError",
            Self::SenderName => "SenderNameError",
            Self::SessionExpired => "SessionExpiredError",
            Self::Spam => "SpamError",
            Self::TarifNotFound => "TarifNotFoundError",
            Self::Timeout => "TimeoutError",
            Self::UnauthorizedPartner => "UnauthorizedPartnerError",
            Self::Undefined => "UndefinedError",
            Self::Base => "BaseError",
        }
    }

    /// Whether logging in again is the usual recovery for this kind.
    pub fn is_session_error(self) -> bool {
        matches!(self, Self::SessionExpired | Self::Timeout | Self::NoLogin)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn lookup(code: i64) -> Option<(ErrorKind, &'static str)> {
    ERROR_TABLE
        .iter()
        .find(|(known, _, _)| *known == code)
        .map(|&(_, kind, message)| (kind, message))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// sms24x7 `err_code`.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ErrorCode(i64);

impl ErrorCode {
    /// Construct an error code from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by sms24x7.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// `true` for zero and negative codes.
    pub fn is_success(self) -> bool {
        self.0 <= 0
    }

    /// Kind of failure this code stands for, `None` on success.
    pub fn kind(self) -> Option<ErrorKind> {
        ErrorKind::from_code(self.0)
    }

    /// Message used when the server does not send its own text.
    pub fn default_message(self) -> String {
        match lookup(self.0) {
            Some((_, message)) => message.to_owned(),
            None => format!("Communication to API failed. Error code: {}", self.0),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_have_no_kind() {
        assert_eq!(ErrorKind::from_code(0), None);
        assert_eq!(ErrorKind::from_code(-1), None);
        assert!(ErrorCode::new(0).is_success());
        assert!(ErrorCode::new(-5).is_success());
        assert!(!ErrorCode::new(1).is_success());
    }

    #[test]
    fn shared_codes_map_to_the_same_kind() {
        for code in [37, 38, 59] {
            assert_eq!(ErrorKind::from_code(code), Some(ErrorKind::Spam));
            assert_eq!(ErrorCode::new(code).default_message(), "Spam detected");
        }
        for code in [44, 47] {
            assert_eq!(ErrorKind::from_code(code), Some(ErrorKind::TarifNotFound));
        }
    }

    #[test]
    fn table_entries_match_documented_messages() {
        assert_eq!(ErrorCode::new(3).kind(), Some(ErrorKind::Timeout));
        assert_eq!(
            ErrorCode::new(3).default_message(),
            "Inactive for more than 24 minutes"
        );
        assert_eq!(ErrorCode::new(45).kind(), Some(ErrorKind::Base));
        assert_eq!(
            ErrorCode::new(45).default_message(),
            "Basic settings not found"
        );
        assert_eq!(ErrorCode::new(42).kind(), Some(ErrorKind::NoLogin));
    }

    #[test]
    fn unknown_positive_code_falls_back_to_other() {
        let code = ErrorCode::new(1);
        assert_eq!(code.kind(), Some(ErrorKind::Other));
        assert_eq!(
            code.default_message(),
            "Communication to API failed. Error code: 1"
        );
        assert_eq!(ErrorCode::new(999).kind(), Some(ErrorKind::Other));
    }

    #[test]
    fn table_codes_are_unique() {
        for (idx, (code, _, _)) in ERROR_TABLE.iter().enumerate() {
            assert!(
                ERROR_TABLE[idx + 1..].iter().all(|(other, _, _)| other != code),
                "duplicate code {code}"
            );
        }
    }

    #[test]
    fn kind_names_use_error_suffix() {
        assert_eq!(ErrorKind::Balance.to_string(), "BalanceError");
        assert_eq!(ErrorKind::Base.name(), "BaseError");
        assert!(ErrorKind::SessionExpired.is_session_error());
        assert!(!ErrorKind::Spam.is_session_error());
    }
}
