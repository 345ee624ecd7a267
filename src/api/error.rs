use reqwest::StatusCode;

/// Failures talking to the hosted backend. Backend-reported messages are
/// carried verbatim so the UI can surface them as-is.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not signed in or session expired. Run 'tally login' again.")]
    Unauthorized,

    #[error("{message}")]
    Backend { status: StatusCode, message: String },

    #[error("Could not reach the backend: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Error body shapes used by the data and auth planes.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(alias = "msg", alias = "error_description")]
    pub message: Option<String>,
}

/// Map a non-success response to an `ApiError`, pulling the backend's own
/// message out of the body when one is present.
pub(crate) async fn error_from_response(response: reqwest::Response) -> ApiError {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        return ApiError::Unauthorized;
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(ErrorBody {
            message: Some(message),
        }) => message,
        _ => format!("Request failed with status {}", status),
    };

    ApiError::Backend { status, message }
}
