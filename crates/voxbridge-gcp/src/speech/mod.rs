pub mod proto;
pub mod session;

use crate::error::GcpError;
use proto::{StreamingRecognizeRequest, StreamingRecognizeResponse};
use tonic::codegen::http;
use tonic::transport::{Channel, ClientTlsConfig};

pub const SPEECH_ENDPOINT: &str = "https://speech.googleapis.com";

/// gRPC client for the v1 Speech service, wired by hand for the single
/// streaming method this tool uses.
#[derive(Clone)]
pub struct SpeechClient {
    inner: tonic::client::Grpc<Channel>,
}

impl SpeechClient {
    /// Connect to the public Speech endpoint over TLS.
    pub async fn connect() -> Result<Self, GcpError> {
        let tls = ClientTlsConfig::new().with_native_roots();
        let channel = Channel::from_static(SPEECH_ENDPOINT)
            .tls_config(tls)?
            .connect()
            .await?;
        tracing::debug!(endpoint = SPEECH_ENDPOINT, "speech channel connected");
        Ok(Self {
            inner: tonic::client::Grpc::new(channel),
        })
    }

    /// Bidirectional streaming recognition: the request stream carries one
    /// configuration message followed by audio chunks; the response stream
    /// carries recognition results as the service produces them.
    pub async fn streaming_recognize(
        &mut self,
        request: impl tonic::IntoStreamingRequest<Message = StreamingRecognizeRequest>,
    ) -> Result<tonic::Response<tonic::codec::Streaming<StreamingRecognizeResponse>>, tonic::Status>
    {
        self.inner
            .ready()
            .await
            .map_err(|e| tonic::Status::unavailable(format!("service was not ready: {e}")))?;
        let codec = tonic::codec::ProstCodec::default();
        let path = http::uri::PathAndQuery::from_static(
            "/google.cloud.speech.v1.Speech/StreamingRecognize",
        );
        self.inner
            .streaming(request.into_streaming_request(), path, codec)
            .await
    }
}
