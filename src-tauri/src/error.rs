//! Error taxonomy for API calls.
//!
//! Four failure classes reach the UI: transport problems before a response
//! arrives, non-2xx HTTP statuses, application failures reported inside a
//! `success: false` envelope, and malformed payloads.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response.
    #[error("{0}")]
    Transport(String),

    /// The server answered with a non-success status code.
    #[error("{message} (HTTP {code})")]
    Status { code: u16, message: String },

    /// The server processed the request but reported `success: false`.
    /// The message is shown to the operator verbatim.
    #[error("{0}")]
    App(String),

    /// The response body did not match the expected shape.
    #[error("Invalid response from server: {0}")]
    Decode(String),
}

impl ApiError {
    pub(crate) fn from_reqwest(base: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport(format!("Connection to {base} timed out"))
        } else if err.is_connect() {
            ApiError::Transport(format!("Cannot reach the AmigoCake server at {base}"))
        } else if err.is_builder() {
            ApiError::Transport(format!("Invalid API base URL: {base}"))
        } else {
            ApiError::Transport(format!("Request failed: {err}"))
        }
    }

    pub(crate) fn from_status(status: StatusCode) -> Self {
        let code = status.as_u16();
        let message = match code {
            401 => "Unauthorized access".to_string(),
            404 => "Server endpoint not found".to_string(),
            code if code >= 500 => "Internal server error".to_string(),
            code => format!("Unexpected response from server (HTTP {code})"),
        };
        ApiError::Status { code, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_messages_follow_the_login_screen_wording() {
        let unauthorized = ApiError::from_status(StatusCode::UNAUTHORIZED);
        assert_eq!(unauthorized.to_string(), "Unauthorized access (HTTP 401)");

        let missing = ApiError::from_status(StatusCode::NOT_FOUND);
        assert_eq!(missing.to_string(), "Server endpoint not found (HTTP 404)");

        let broken = ApiError::from_status(StatusCode::BAD_GATEWAY);
        assert_eq!(broken.to_string(), "Internal server error (HTTP 502)");
    }

    #[test]
    fn app_errors_surface_the_server_message_verbatim() {
        let err = ApiError::App("Username atau password salah".into());
        assert_eq!(err.to_string(), "Username atau password salah");
    }
}
