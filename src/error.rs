use thiserror::Error;

/// Failures loading or refreshing the stored OAuth credential.
///
/// All variants are fatal for the run: the pipeline never issues a metadata
/// or translation call without a valid token.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("credential file not found: {0}")]
    Missing(String),

    #[error("credential file is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("credential file is missing required field '{0}'")]
    Incomplete(&'static str),

    #[error("credential is expired and has no refresh token")]
    Expired,

    #[error("token refresh rejected ({status}): {message}")]
    Refresh { status: u16, message: String },

    #[error("token refresh request failed")]
    Http(#[source] reqwest::Error),

    #[error("failed to read credential file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures reading or writing video metadata.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("video not found: {0}")]
    NotFound(String),

    #[error("permission denied by the YouTube API ({status}): {message}")]
    PermissionDenied { status: u16, message: String },

    #[error("YouTube API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("YouTube API request failed")]
    Http(#[source] reqwest::Error),

    #[error("failed to decode YouTube API response")]
    Decode(#[source] reqwest::Error),
}

/// A single translation call failing for one field of one language.
///
/// Recovered at the call site: the affected language is dropped from the
/// run's output and the pipeline continues.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("OpenAI returned no translation")]
    EmptyResponse,

    #[error("translation request failed")]
    Http(#[source] reqwest::Error),
}

impl TranslationError {
    /// 429 and 5xx responses are transient; other API rejections are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            TranslationError::Api { status, .. } => *status == 429 || *status >= 500,
            TranslationError::EmptyResponse => false,
            TranslationError::Http(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_500_is_retryable() {
        let err = TranslationError::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_api_429_is_retryable() {
        let err = TranslationError::Api {
            status: 429,
            message: "Rate limit exceeded".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_api_400_is_not_retryable() {
        let err = TranslationError::Api {
            status: 400,
            message: "Bad request".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_api_401_is_not_retryable() {
        let err = TranslationError::Api {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_empty_response_is_not_retryable() {
        assert!(!TranslationError::EmptyResponse.is_retryable());
    }

    #[test]
    fn test_credential_error_messages_name_the_component() {
        let err = CredentialError::Missing("oauth2.json".to_string());
        assert!(err.to_string().contains("oauth2.json"));

        let err = CredentialError::Incomplete("token");
        assert!(err.to_string().contains("token"));
    }

    #[test]
    fn test_metadata_error_messages() {
        let err = MetadataError::NotFound("abc123".to_string());
        assert!(err.to_string().contains("abc123"));

        let err = MetadataError::PermissionDenied {
            status: 403,
            message: "forbidden".to_string(),
        };
        assert!(err.to_string().contains("403"));
    }
}
