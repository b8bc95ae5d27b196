use thiserror::Error;

/// HTTP statuses the HipChat API documents as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteStatus {
    BadRequest,
    Unauthorized,
    RateLimited,
    NotAcceptable,
    InternalServerError,
    ServiceUnavailable,
}

impl RemoteStatus {
    /// Map a response status to a documented failure, if it is one.
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            403 => Some(Self::RateLimited),
            406 => Some(Self::NotAcceptable),
            500 => Some(Self::InternalServerError),
            503 => Some(Self::ServiceUnavailable),
            _ => None,
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::RateLimited => 403,
            Self::NotAcceptable => 406,
            Self::InternalServerError => 500,
            Self::ServiceUnavailable => 503,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Self::BadRequest => "bad request",
            Self::Unauthorized => "authentication rejected",
            Self::RateLimited => "rate limit exceeded",
            Self::NotAcceptable => "invalid content type",
            Self::InternalServerError => "internal server error",
            Self::ServiceUnavailable => "service unavailable",
        }
    }
}

impl std::fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.reason(), self.code())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Startup-fatal: the configuration cannot be used.
    #[error("invalid {field}: {message}")]
    Config {
        field: &'static str,
        message: String,
    },

    #[error("failed to serialize message: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("HipChat request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HipChat rejected message: {0}")]
    RemoteStatus(RemoteStatus),

    #[error("failed to decode HipChat response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("HipChat status response was not sent (got {status:?})")]
    NotSent { status: String },
}

impl Error {
    #[must_use]
    pub fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::Config {
            field,
            message: message.into(),
        }
    }

    /// Short label for the failure class, used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Serialize(_) => "serialize",
            Self::Transport(_) => "transport",
            Self::RemoteStatus(_) => "remote_status",
            Self::Decode(_) => "decode",
            Self::NotSent { .. } => "not_sent",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case(400, RemoteStatus::BadRequest, "bad request")]
    #[case(401, RemoteStatus::Unauthorized, "authentication rejected")]
    #[case(403, RemoteStatus::RateLimited, "rate limit exceeded")]
    #[case(406, RemoteStatus::NotAcceptable, "invalid content type")]
    #[case(500, RemoteStatus::InternalServerError, "internal server error")]
    #[case(503, RemoteStatus::ServiceUnavailable, "service unavailable")]
    fn status_table(#[case] code: u16, #[case] expected: RemoteStatus, #[case] reason: &str) {
        let status = RemoteStatus::from_code(code).unwrap();
        assert_eq!(status, expected);
        assert_eq!(status.code(), code);
        assert_eq!(status.reason(), reason);
        assert_eq!(
            Error::RemoteStatus(status).to_string(),
            format!("HipChat rejected message: {reason} ({code})")
        );
    }

    #[test]
    fn only_documented_codes_are_special() {
        assert_eq!(RemoteStatus::from_code(401), Some(RemoteStatus::Unauthorized));
        assert_eq!(RemoteStatus::from_code(200), None);
        assert_eq!(RemoteStatus::from_code(404), None);
        assert_eq!(RemoteStatus::from_code(502), None);
    }

    #[test]
    fn rate_limit_message() {
        let err = Error::RemoteStatus(RemoteStatus::RateLimited);
        assert_eq!(
            err.to_string(),
            "HipChat rejected message: rate limit exceeded (403)"
        );
        assert_eq!(err.kind(), "remote_status");
    }

    #[test]
    fn config_error_names_field() {
        let err = Error::config("room_id", "must not be empty");
        assert_eq!(err.to_string(), "invalid room_id: must not be empty");
    }
}
