//! Errors returned by API calls

/// Fixed, human-readable failure message for each call site
pub mod messages {
    pub const ACCOUNT: &str = "Something went wrong with getting account id";
    pub const OPENINGS: &str = "Something went wrong with getting all vacancies";
    pub const STAGES: &str = "Something went wrong with getting all statuses";
    pub const UPLOAD: &str = "Something went wrong with uploading candidate resume";
    pub const CREATE: &str = "Something went wrong with creating candidate";
    pub const LINK: &str = "Something went wrong with connection candidate to vacancy";
}

/// A failed API call: the call site's fixed message plus diagnostic detail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: &'static str,
    pub status: Option<u16>,
    pub detail: String,
}

impl ApiError {
    pub fn new(message: &'static str, detail: impl Into<String>) -> Self {
        Self {
            message,
            status: None,
            detail: detail.into(),
        }
    }

    pub fn with_status(message: &'static str, status: u16, detail: impl Into<String>) -> Self {
        Self {
            message,
            status: Some(status),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (HTTP {}): {}", self.message, status, self.detail),
            None => write!(f, "{}: {}", self.message, self.detail),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_status_when_known() {
        let err = ApiError::with_status(messages::CREATE, 400, "bad money");
        assert_eq!(
            err.to_string(),
            "Something went wrong with creating candidate (HTTP 400): bad money"
        );

        let err = ApiError::new(messages::UPLOAD, "connection refused");
        assert_eq!(
            err.to_string(),
            "Something went wrong with uploading candidate resume: connection refused"
        );
    }
}
