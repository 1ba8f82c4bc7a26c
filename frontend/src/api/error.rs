use thiserror::Error;

/// Identity-provider failure: invalid credentials, weak password,
/// invalid or expired session. Message text is user-facing.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
}

impl AuthError {
    pub fn new(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
            code: None,
        }
    }

    /// Unrecoverable session conditions that must force a local
    /// sign-out: revoked refresh tokens and 400/401 token responses.
    pub fn is_invalid_session(&self) -> bool {
        if matches!(self.status, Some(400) | Some(401)) {
            return true;
        }
        let message = self.message.to_lowercase();
        message.contains("invalid refresh token")
            || message.contains("token not found")
            || message.contains("refresh_token_not_found")
    }
}

/// Data-store failure surfaced with the provider's diagnostic fields.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", self.diagnostic())]
pub struct DataError {
    pub message: String,
    pub code: Option<String>,
    pub details: Option<String>,
    pub hint: Option<String>,
}

/// Single-object queries signal a missing row with this code.
const ROW_NOT_FOUND_CODE: &str = "PGRST116";

impl DataError {
    pub fn is_row_not_found(&self) -> bool {
        self.code.as_deref() == Some(ROW_NOT_FOUND_CODE)
    }

    fn diagnostic(&self) -> String {
        let mut text = self.message.clone();
        if let Some(code) = &self.code {
            text.push_str(&format!(" (code: {})", code));
        }
        if let Some(details) = &self.details {
            text.push_str(&format!(" details: {}", details));
        }
        if let Some(hint) = &self.hint {
            text.push_str(&format!(" hint: {}", hint));
        }
        text
    }
}

/// Object-storage failure. "Not found" is benign in delete flows and is
/// only logged there.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct StorageError {
    pub message: String,
    pub status: Option<u16>,
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404) || self.message.to_lowercase().contains("not found")
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Data(#[from] DataError),
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_invalid_session(&self) -> bool {
        matches!(self, ApiError::Auth(err) if err.is_invalid_session())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn revoked_refresh_token_is_invalid_session() {
        let err = AuthError::new("Invalid Refresh Token: Already Used", Some(200));
        assert!(err.is_invalid_session());
    }

    #[test]
    fn unauthorized_status_is_invalid_session() {
        assert!(AuthError::new("Unauthorized", Some(401)).is_invalid_session());
        assert!(AuthError::new("Bad Request", Some(400)).is_invalid_session());
    }

    #[test]
    fn wrong_credentials_are_not_invalid_session() {
        let err = AuthError::new("Invalid login credentials", Some(403));
        assert!(!err.is_invalid_session());
    }

    #[test]
    fn data_error_diagnostic_concatenates_code_details_hint() {
        let err = DataError {
            message: "permission denied".into(),
            code: Some("42501".into()),
            details: Some("row-level security".into()),
            hint: Some("check policies".into()),
        };
        let text = err.to_string();
        assert!(text.contains("permission denied"));
        assert!(text.contains("42501"));
        assert!(text.contains("row-level security"));
        assert!(text.contains("check policies"));
    }

    #[test]
    fn missing_row_code_is_recognized() {
        let err = DataError {
            message: "0 rows".into(),
            code: Some("PGRST116".into()),
            details: None,
            hint: None,
        };
        assert!(err.is_row_not_found());
    }

    #[test]
    fn storage_not_found_is_benign() {
        let err = StorageError {
            message: "Object not found".into(),
            status: Some(400),
        };
        assert!(err.is_not_found());
        assert!(StorageError {
            message: "quota exceeded".into(),
            status: Some(413)
        }
        .is_not_found()
            == false);
    }
}
