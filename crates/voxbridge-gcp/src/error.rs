use thiserror::Error;

/// Failures talking to the vendor APIs. There is deliberately no retry or
/// recovery behind any of these; they propagate to the process boundary.
#[derive(Debug, Error)]
pub enum GcpError {
    #[error("authentication failed: {0}")]
    Auth(#[from] gcp_auth::Error),

    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("streaming call failed: {0}")]
    Grpc(#[from] tonic::Status),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("failed to decode audio content: {0}")]
    AudioDecode(#[from] base64::DecodeError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
