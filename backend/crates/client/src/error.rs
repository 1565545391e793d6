//! Client Error Types

use kernel::error::kind::ErrorKind;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-success status
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        /// `detail` from a problem-details body, if any
        detail: Option<String>,
    },

    /// Replay skipped because the page that issued the request is gone
    #[error("request abandoned after navigation")]
    Abandoned,

    /// Network failure or timeout
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Success status but the body did not decode
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Build a status error from a failed response, keeping the problem
    /// `detail` when present.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let detail = response
            .text()
            .await
            .ok()
            .and_then(|body| serde_json::from_str::<serde_json::Value>(&body).ok())
            .and_then(|body| body.get("detail")?.as_str().map(str::to_owned));
        ClientError::Status { status, detail }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Classification in the shared vocabulary. `None` for failures that
    /// never reached a status line or were abandoned locally.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ClientError::Status { status, .. } => ErrorKind::from_status_code(*status),
            ClientError::Transport(e) if e.is_timeout() => Some(ErrorKind::ServiceUnavailable),
            ClientError::Decode(_) => Some(ErrorKind::BadGateway),
            _ => None,
        }
    }
}
