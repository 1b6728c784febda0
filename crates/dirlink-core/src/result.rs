//! Operation result codes and the result types carried by operation futures.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result status reported for one directory operation.
///
/// Protocol codes carry their RFC 4511 value. Codes with a value of `4096`
/// or above are synthesized locally by this client and never appear on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    /// The operation completed successfully.
    Success,
    /// The operation was out of sequence with the current exchange.
    OperationsError,
    /// The request violated the protocol.
    ProtocolError,
    /// The server-side time limit was reached before completion.
    TimeLimitExceeded,
    /// The search returned more entries than the size limit allows.
    ///
    /// This is the truncation code: the true number of matching entries is
    /// unknown but at least the number delivered.
    SizeLimitExceeded,
    /// A compare operation evaluated to false.
    CompareFalse,
    /// A compare operation evaluated to true.
    CompareTrue,
    /// The requested authentication method is not supported.
    AuthMethodNotSupported,
    /// A stronger authentication mechanism is required.
    StrongerAuthRequired,
    /// The server returned a referral to another server.
    Referral,
    /// An administrative limit was exceeded.
    AdminLimitExceeded,
    /// A multi-stage SASL bind is in progress.
    SaslBindInProgress,
    /// The named attribute does not exist on the entry.
    NoSuchAttribute,
    /// An attribute value violated its syntax.
    InvalidAttributeSyntax,
    /// The targeted entry does not exist.
    NoSuchObject,
    /// The supplied name was syntactically invalid.
    InvalidDnSyntax,
    /// The supplied credentials were rejected.
    InvalidCredentials,
    /// The authenticated identity lacks the required access rights.
    InsufficientAccessRights,
    /// The server is too busy to service the operation.
    Busy,
    /// The server is shutting down or otherwise unavailable.
    Unavailable,
    /// The server declined to perform the operation.
    UnwillingToPerform,
    /// An entry with the target name already exists.
    EntryAlreadyExists,
    /// An unclassified server-side failure.
    Other,
    /// The operation was cancelled (RFC 3909).
    Canceled,
    /// Client-side: a search expected to match an entry returned none.
    NoResultsReturned,
    /// Client-side: a search returned more results than expected.
    UnexpectedResults,
    /// Client-side: no result arrived within the caller-imposed deadline.
    ClientTimeout,
}

impl ResultCode {
    /// Returns the numeric value of this code.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Success => 0,
            Self::OperationsError => 1,
            Self::ProtocolError => 2,
            Self::TimeLimitExceeded => 3,
            Self::SizeLimitExceeded => 4,
            Self::CompareFalse => 5,
            Self::CompareTrue => 6,
            Self::AuthMethodNotSupported => 7,
            Self::StrongerAuthRequired => 8,
            Self::Referral => 10,
            Self::AdminLimitExceeded => 11,
            Self::SaslBindInProgress => 14,
            Self::NoSuchAttribute => 16,
            Self::InvalidAttributeSyntax => 21,
            Self::NoSuchObject => 32,
            Self::InvalidDnSyntax => 34,
            Self::InvalidCredentials => 49,
            Self::InsufficientAccessRights => 50,
            Self::Busy => 51,
            Self::Unavailable => 52,
            Self::UnwillingToPerform => 53,
            Self::EntryAlreadyExists => 68,
            Self::Other => 80,
            Self::Canceled => 118,
            Self::NoResultsReturned => 4096,
            Self::UnexpectedResults => 4097,
            Self::ClientTimeout => 4098,
        }
    }

    /// Returns the protocol name of this code.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::OperationsError => "operationsError",
            Self::ProtocolError => "protocolError",
            Self::TimeLimitExceeded => "timeLimitExceeded",
            Self::SizeLimitExceeded => "sizeLimitExceeded",
            Self::CompareFalse => "compareFalse",
            Self::CompareTrue => "compareTrue",
            Self::AuthMethodNotSupported => "authMethodNotSupported",
            Self::StrongerAuthRequired => "strongerAuthRequired",
            Self::Referral => "referral",
            Self::AdminLimitExceeded => "adminLimitExceeded",
            Self::SaslBindInProgress => "saslBindInProgress",
            Self::NoSuchAttribute => "noSuchAttribute",
            Self::InvalidAttributeSyntax => "invalidAttributeSyntax",
            Self::NoSuchObject => "noSuchObject",
            Self::InvalidDnSyntax => "invalidDNSyntax",
            Self::InvalidCredentials => "invalidCredentials",
            Self::InsufficientAccessRights => "insufficientAccessRights",
            Self::Busy => "busy",
            Self::Unavailable => "unavailable",
            Self::UnwillingToPerform => "unwillingToPerform",
            Self::EntryAlreadyExists => "entryAlreadyExists",
            Self::Other => "other",
            Self::Canceled => "canceled",
            Self::NoResultsReturned => "noResultsReturned",
            Self::UnexpectedResults => "unexpectedResults",
            Self::ClientTimeout => "clientTimeout",
        }
    }

    /// Returns true when the code reports a failed operation.
    ///
    /// Only `success`, the two compare verdicts and an in-progress SASL bind
    /// are non-exceptional; every other code surfaces as an error to callers.
    #[must_use]
    pub const fn is_exceptional(self) -> bool {
        !matches!(
            self,
            Self::Success | Self::CompareFalse | Self::CompareTrue | Self::SaslBindInProgress
        )
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.value())
    }
}

/// Terminal result of one directory operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    code: ResultCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    matched_dn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    diagnostic_message: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    referral_uris: Vec<String>,
}

impl OperationResult {
    /// Creates a result with the given code and no further detail.
    #[must_use]
    pub const fn new(code: ResultCode) -> Self {
        Self {
            code,
            matched_dn: None,
            diagnostic_message: None,
            referral_uris: Vec::new(),
        }
    }

    /// Sets the matched DN reported by the server.
    #[must_use]
    pub fn with_matched_dn(mut self, dn: impl Into<String>) -> Self {
        self.matched_dn = Some(dn.into());
        self
    }

    /// Sets the human-readable diagnostic message.
    #[must_use]
    pub fn with_diagnostic_message(mut self, message: impl Into<String>) -> Self {
        self.diagnostic_message = Some(message.into());
        self
    }

    /// Appends a referral URI.
    #[must_use]
    pub fn with_referral_uri(mut self, uri: impl Into<String>) -> Self {
        self.referral_uris.push(uri.into());
        self
    }

    /// Returns the result code.
    #[must_use]
    pub const fn result_code(&self) -> ResultCode {
        self.code
    }

    /// Returns the matched DN, when the server reported one.
    #[must_use]
    pub fn matched_dn(&self) -> Option<&str> {
        self.matched_dn.as_deref()
    }

    /// Returns the diagnostic message, when the server reported one.
    #[must_use]
    pub fn diagnostic_message(&self) -> Option<&str> {
        self.diagnostic_message.as_deref()
    }

    /// Returns the referral URIs attached to the result.
    #[must_use]
    pub fn referral_uris(&self) -> &[String] {
        &self.referral_uris
    }

    /// Returns true when the result reports a failure.
    #[must_use]
    pub const fn is_exceptional(&self) -> bool {
        self.code.is_exceptional()
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        if let Some(message) = &self.diagnostic_message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

/// Result of a bind operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindResult {
    result: OperationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    server_sasl_credentials: Option<Vec<u8>>,
}

impl BindResult {
    /// Creates a bind result with the given code.
    #[must_use]
    pub const fn new(code: ResultCode) -> Self {
        Self {
            result: OperationResult::new(code),
            server_sasl_credentials: None,
        }
    }

    /// Attaches the server SASL credentials for a multi-stage bind.
    #[must_use]
    pub fn with_server_sasl_credentials(mut self, credentials: Vec<u8>) -> Self {
        self.server_sasl_credentials = Some(credentials);
        self
    }

    /// Returns the result code.
    #[must_use]
    pub const fn result_code(&self) -> ResultCode {
        self.result.result_code()
    }

    /// Returns the underlying operation result.
    #[must_use]
    pub const fn result(&self) -> &OperationResult {
        &self.result
    }

    /// Returns the server SASL credentials, when present.
    #[must_use]
    pub fn server_sasl_credentials(&self) -> Option<&[u8]> {
        self.server_sasl_credentials.as_deref()
    }
}

/// Result of a compare operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResult {
    result: OperationResult,
}

impl CompareResult {
    /// Creates a compare result with the given code.
    #[must_use]
    pub const fn new(code: ResultCode) -> Self {
        Self {
            result: OperationResult::new(code),
        }
    }

    /// Returns the result code.
    #[must_use]
    pub const fn result_code(&self) -> ResultCode {
        self.result.result_code()
    }

    /// Returns the underlying operation result.
    #[must_use]
    pub const fn result(&self) -> &OperationResult {
        &self.result
    }

    /// Returns true when the assertion evaluated to `compareTrue`.
    #[must_use]
    pub fn matched(&self) -> bool {
        self.result_code() == ResultCode::CompareTrue
    }
}

/// Result of an extended operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedResult {
    result: OperationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Vec<u8>>,
}

impl ExtendedResult {
    /// Creates an extended result with the given code.
    #[must_use]
    pub const fn new(code: ResultCode) -> Self {
        Self {
            result: OperationResult::new(code),
            oid: None,
            value: None,
        }
    }

    /// Sets the response OID.
    #[must_use]
    pub fn with_oid(mut self, oid: impl Into<String>) -> Self {
        self.oid = Some(oid.into());
        self
    }

    /// Sets the response value.
    #[must_use]
    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the result code.
    #[must_use]
    pub const fn result_code(&self) -> ResultCode {
        self.result.result_code()
    }

    /// Returns the underlying operation result.
    #[must_use]
    pub const fn result(&self) -> &OperationResult {
        &self.result
    }

    /// Returns the response OID, when present.
    #[must_use]
    pub fn oid(&self) -> Option<&str> {
        self.oid.as_deref()
    }

    /// Returns the response value, when present.
    #[must_use]
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }
}

/// Unsolicited intermediate response delivered while an operation is in
/// flight, forwarded unmodified to the caller-supplied handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermediateResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    oid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<Vec<u8>>,
}

impl IntermediateResponse {
    /// Creates an empty intermediate response.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            oid: None,
            value: None,
        }
    }

    /// Sets the response OID.
    #[must_use]
    pub fn with_oid(mut self, oid: impl Into<String>) -> Self {
        self.oid = Some(oid.into());
        self
    }

    /// Sets the response value.
    #[must_use]
    pub fn with_value(mut self, value: Vec<u8>) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns the response OID, when present.
    #[must_use]
    pub fn oid(&self) -> Option<&str> {
        self.oid.as_deref()
    }

    /// Returns the response value, when present.
    #[must_use]
    pub fn value(&self) -> Option<&[u8]> {
        self.value.as_deref()
    }
}

impl Default for IntermediateResponse {
    fn default() -> Self {
        Self::new()
    }
}
