use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Application-level return code embedded in every PathFinder response body.
///
/// Distinct from the HTTP status. The value is preserved as-is even when the
/// code is unknown to this crate.
pub struct ReturnCode(i32);

impl ReturnCode {
    /// Construct a return code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by the server.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Returns `true` for the codes the service treats as success (200, 201, 202).
    pub fn is_success(self) -> bool {
        matches!(self.0, 200 | 201 | 202)
    }

    /// Map this code to its error kind. Codes outside the fixed table map to
    /// [`ApiErrorKind::UnhandledCode`].
    pub fn error_kind(self) -> ApiErrorKind {
        ApiErrorKind::from_code(self.0)
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Failure classification for non-success return codes.
pub enum ApiErrorKind {
    BadRequest,
    Unauthorized,
    NotFound,
    InvalidValue,
    ValueMissing,
    Server,
    ServiceUnavailable,
    UnhandledCode,
}

impl ApiErrorKind {
    /// Classify a raw return code.
    pub fn from_code(code: i32) -> Self {
        match code {
            400 => Self::BadRequest,
            401 => Self::Unauthorized,
            404 => Self::NotFound,
            420 => Self::InvalidValue,
            421 => Self::ValueMissing,
            500 => Self::Server,
            503 => Self::ServiceUnavailable,
            _ => Self::UnhandledCode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Failure reported by the provisioning service through its return code.
///
/// The display message is fixed per kind; `server_messages` carries the raw
/// per-call `TextMessage` entries for diagnostics.
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub code: ReturnCode,
    pub server_messages: Vec<String>,
}

impl ApiError {
    /// Classify a non-success return code together with the server's messages.
    pub fn from_response(code: ReturnCode, server_messages: Vec<String>) -> Self {
        Self {
            kind: code.error_kind(),
            code,
            server_messages,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ApiErrorKind::BadRequest => f.write_str("Invalid request"),
            ApiErrorKind::Unauthorized => {
                f.write_str("Client lacks privileges to execute the requested operation")
            }
            ApiErrorKind::NotFound => f.write_str("The requested resource could not be found"),
            ApiErrorKind::InvalidValue => f.write_str("One or more request values is invalid"),
            ApiErrorKind::ValueMissing => f.write_str("Required attribute value is missing"),
            ApiErrorKind::Server => f.write_str(
                "Unable to process the provisioning call due to a problem with the PathFinder server",
            ),
            ApiErrorKind::ServiceUnavailable => f.write_str(
                "The server is currently unable to handle the request due to a temporary overload or maintenance on the server",
            ),
            ApiErrorKind::UnhandledCode => {
                write!(f, "Received unhandled return code: {}", self.code)
            }
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_codes_are_200_201_202() {
        assert!(ReturnCode::new(200).is_success());
        assert!(ReturnCode::new(201).is_success());
        assert!(ReturnCode::new(202).is_success());
        assert!(!ReturnCode::new(204).is_success());
        assert!(!ReturnCode::new(400).is_success());
    }

    #[test]
    fn error_kind_mapping_matches_fixed_table() {
        assert_eq!(ApiErrorKind::from_code(400), ApiErrorKind::BadRequest);
        assert_eq!(ApiErrorKind::from_code(401), ApiErrorKind::Unauthorized);
        assert_eq!(ApiErrorKind::from_code(404), ApiErrorKind::NotFound);
        assert_eq!(ApiErrorKind::from_code(420), ApiErrorKind::InvalidValue);
        assert_eq!(ApiErrorKind::from_code(421), ApiErrorKind::ValueMissing);
        assert_eq!(ApiErrorKind::from_code(500), ApiErrorKind::Server);
        assert_eq!(
            ApiErrorKind::from_code(503),
            ApiErrorKind::ServiceUnavailable
        );
        assert_eq!(ApiErrorKind::from_code(999), ApiErrorKind::UnhandledCode);
    }

    #[test]
    fn api_error_carries_code_and_server_messages() {
        let messages = vec!["Not Found".to_owned(), "No TN profile".to_owned()];
        let err = ApiError::from_response(ReturnCode::new(404), messages.clone());
        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.code, ReturnCode::new(404));
        assert_eq!(err.server_messages, messages);
        assert_eq!(err.to_string(), "The requested resource could not be found");
    }

    #[test]
    fn fixed_messages_per_kind() {
        let cases = [
            (400, "Invalid request"),
            (
                401,
                "Client lacks privileges to execute the requested operation",
            ),
            (404, "The requested resource could not be found"),
            (420, "One or more request values is invalid"),
            (421, "Required attribute value is missing"),
            (
                500,
                "Unable to process the provisioning call due to a problem with the PathFinder server",
            ),
            (
                503,
                "The server is currently unable to handle the request due to a temporary overload or maintenance on the server",
            ),
        ];
        for (code, message) in cases {
            let err = ApiError::from_response(ReturnCode::new(code), Vec::new());
            assert_eq!(err.to_string(), message, "code {code}");
        }
    }

    #[test]
    fn unhandled_code_message_embeds_the_code() {
        let err = ApiError::from_response(ReturnCode::new(999), Vec::new());
        assert_eq!(err.kind, ApiErrorKind::UnhandledCode);
        assert_eq!(err.to_string(), "Received unhandled return code: 999");
    }
}
