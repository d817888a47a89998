//! Glue for one streaming-recognition session: building the vendor
//! configuration, shaping the request sequence, and iterating responses.

use crate::error::GcpError;
use crate::speech::proto::{
    streaming_recognize_request::StreamingRequest, AudioEncoding, RecognitionConfig,
    StreamingRecognitionConfig, StreamingRecognizeRequest, StreamingRecognizeResponse,
};
use crate::translate::Translator;
use std::io::Write;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::{Stream, StreamExt};
use voxbridge_core::{SpeechConfig, Utterance};

/// Map our speech settings onto the vendor streaming configuration.
pub fn streaming_config(speech: &SpeechConfig, sample_rate: u32) -> StreamingRecognitionConfig {
    StreamingRecognitionConfig {
        config: Some(RecognitionConfig {
            encoding: AudioEncoding::Linear16 as i32,
            sample_rate_hertz: sample_rate as i32,
            language_code: speech.language_code.clone(),
            enable_automatic_punctuation: speech.punctuation,
            model: speech.model.clone(),
            alternative_language_codes: speech.alternative_languages.clone(),
        }),
        single_utterance: speech.single_utterance,
        interim_results: speech.interim_results,
    }
}

/// The request sequence for one session: the configuration message first,
/// then one request per audio chunk, lazily as chunks arrive.
pub fn request_stream(
    config: StreamingRecognitionConfig,
    audio_rx: mpsc::UnboundedReceiver<Vec<u8>>,
) -> impl Stream<Item = StreamingRecognizeRequest> + Send + 'static {
    let head = tokio_stream::once(StreamingRecognizeRequest {
        streaming_request: Some(StreamingRequest::StreamingConfig(config)),
    });
    let body = UnboundedReceiverStream::new(audio_rx).map(|chunk| StreamingRecognizeRequest {
        streaming_request: Some(StreamingRequest::AudioContent(chunk)),
    });
    head.chain(body)
}

/// The only part of a response this tool acts on: the first alternative
/// of the first result. Responses lacking either produce `None`.
pub fn first_utterance(response: &StreamingRecognizeResponse) -> Option<Utterance> {
    let result = response.results.first()?;
    let alternative = result.alternatives.first()?;
    Some(Utterance {
        transcript: alternative.transcript.clone(),
        language_code: result.language_code.clone(),
        is_final: result.is_final,
    })
}

/// Iterate the response stream, printing finalized transcripts to `out`
/// and translating those not already in English. Interim results and
/// empty responses are skipped without output.
pub async fn listen_print_loop<S, W>(
    mut responses: S,
    translator: &dyn Translator,
    target_language: &str,
    out: &mut W,
) -> Result<(), GcpError>
where
    S: Stream<Item = Result<StreamingRecognizeResponse, tonic::Status>> + Unpin,
    W: Write,
{
    while let Some(response) = responses.next().await {
        let response = response?;
        let Some(utterance) = first_utterance(&response) else {
            continue;
        };
        if !utterance.is_final {
            continue;
        }

        writeln!(out)?;
        writeln!(out, "Detected Language: {}", utterance.language_code)?;
        writeln!(out, "Original Transcript: {}", utterance.transcript)?;

        if utterance.is_english() {
            writeln!(
                out,
                "Transcript ({}): {}",
                target_language, utterance.transcript
            )?;
        } else {
            let translated = translator
                .translate(&utterance.transcript, target_language)
                .await?;
            writeln!(out, "Translation ({}): {}", target_language, translated)?;
        }

        write!(out, "\nListening...")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::proto::{SpeechRecognitionAlternative, StreamingRecognitionResult};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingTranslator {
        calls: Mutex<Vec<(String, String)>>,
    }

    impl RecordingTranslator {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        async fn translate(&self, text: &str, target_language: &str) -> Result<String, GcpError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), target_language.to_string()));
            Ok(format!("<{}>", text))
        }
    }

    fn response(transcript: &str, language: &str, is_final: bool) -> StreamingRecognizeResponse {
        StreamingRecognizeResponse {
            results: vec![StreamingRecognitionResult {
                alternatives: vec![SpeechRecognitionAlternative {
                    transcript: transcript.to_string(),
                    confidence: 0.95,
                }],
                is_final,
                stability: 0.0,
                language_code: language.to_string(),
            }],
        }
    }

    fn speech_config() -> SpeechConfig {
        SpeechConfig::default()
    }

    #[test]
    fn test_streaming_config_maps_all_fields() {
        let config = streaming_config(&speech_config(), 16_000);
        assert!(config.interim_results);
        assert!(!config.single_utterance);

        let inner = config.config.unwrap();
        assert_eq!(inner.encoding, AudioEncoding::Linear16 as i32);
        assert_eq!(inner.sample_rate_hertz, 16_000);
        assert_eq!(inner.language_code, "en-US");
        assert_eq!(inner.model, "latest_long");
        assert!(inner.enable_automatic_punctuation);
        assert_eq!(inner.alternative_language_codes.len(), 7);
    }

    #[tokio::test]
    async fn test_request_stream_config_first_then_chunks_in_order() {
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(vec![1, 2]).unwrap();
        tx.send(vec![3]).unwrap();
        drop(tx);

        let requests: Vec<_> = request_stream(streaming_config(&speech_config(), 16_000), rx)
            .collect()
            .await;

        assert_eq!(requests.len(), 3);
        assert!(matches!(
            requests[0].streaming_request,
            Some(StreamingRequest::StreamingConfig(_))
        ));
        assert_eq!(
            requests[1].streaming_request,
            Some(StreamingRequest::AudioContent(vec![1, 2]))
        );
        assert_eq!(
            requests[2].streaming_request,
            Some(StreamingRequest::AudioContent(vec![3]))
        );
    }

    #[test]
    fn test_first_utterance_empty_results() {
        let response = StreamingRecognizeResponse { results: vec![] };
        assert!(first_utterance(&response).is_none());
    }

    #[test]
    fn test_first_utterance_empty_alternatives() {
        let response = StreamingRecognizeResponse {
            results: vec![StreamingRecognitionResult {
                alternatives: vec![],
                is_final: true,
                stability: 0.0,
                language_code: "en-US".to_string(),
            }],
        };
        assert!(first_utterance(&response).is_none());
    }

    #[test]
    fn test_first_utterance_picks_first_of_each() {
        let mut resp = response("first", "fr-FR", true);
        resp.results[0]
            .alternatives
            .push(SpeechRecognitionAlternative {
                transcript: "second".to_string(),
                confidence: 0.5,
            });
        let utterance = first_utterance(&resp).unwrap();
        assert_eq!(utterance.transcript, "first");
        assert_eq!(utterance.language_code, "fr-FR");
        assert!(utterance.is_final);
    }

    #[tokio::test]
    async fn test_final_non_english_result_is_translated() {
        let translator = RecordingTranslator::new();
        let mut out = Vec::new();
        let responses = tokio_stream::iter(vec![Ok(response("Hola", "es-ES", true))]);

        listen_print_loop(responses, &translator, "en", &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Detected Language: es-ES"));
        assert!(printed.contains("Original Transcript: Hola"));
        assert!(printed.contains("Translation (en): <Hola>"));
        assert_eq!(translator.calls(), vec![("Hola".to_string(), "en".to_string())]);
    }

    #[tokio::test]
    async fn test_final_english_result_is_not_translated() {
        let translator = RecordingTranslator::new();
        let mut out = Vec::new();
        let responses = tokio_stream::iter(vec![Ok(response("Hello", "en-US", true))]);

        listen_print_loop(responses, &translator, "en", &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Detected Language: en-US"));
        assert!(printed.contains("Transcript (en): Hello"));
        assert!(!printed.contains("Translation"));
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_interim_result_produces_no_output() {
        let translator = RecordingTranslator::new();
        let mut out = Vec::new();
        let responses = tokio_stream::iter(vec![Ok(response("Hol", "es-ES", false))]);

        listen_print_loop(responses, &translator, "en", &mut out)
            .await
            .unwrap();

        assert!(out.is_empty());
        assert!(translator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_is_skipped() {
        let translator = RecordingTranslator::new();
        let mut out = Vec::new();
        let responses =
            tokio_stream::iter(vec![Ok(StreamingRecognizeResponse { results: vec![] })]);

        listen_print_loop(responses, &translator, "en", &mut out)
            .await
            .unwrap();

        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_stream_error_propagates() {
        let translator = RecordingTranslator::new();
        let mut out = Vec::new();
        let responses = tokio_stream::iter(vec![
            Ok(response("Hello", "en-US", true)),
            Err(tonic::Status::deadline_exceeded("session expired")),
        ]);

        let result = listen_print_loop(responses, &translator, "en", &mut out).await;
        match result {
            Err(GcpError::Grpc(status)) => {
                assert_eq!(status.code(), tonic::Code::DeadlineExceeded);
            }
            _ => panic!("expected Grpc error"),
        }
        // The result ahead of the failure was still printed
        assert!(String::from_utf8(out).unwrap().contains("Hello"));
    }

    #[tokio::test]
    async fn test_mixed_interim_and_final_sequence() {
        let translator = RecordingTranslator::new();
        let mut out = Vec::new();
        let responses = tokio_stream::iter(vec![
            Ok(response("Bon", "fr-FR", false)),
            Ok(response("Bonjour", "fr-FR", true)),
            Ok(response("Hi", "en-US", true)),
        ]);

        listen_print_loop(responses, &translator, "en", &mut out)
            .await
            .unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(!printed.contains("Bon\n"));
        assert!(printed.contains("Translation (en): <Bonjour>"));
        assert!(printed.contains("Transcript (en): Hi"));
        assert_eq!(translator.calls().len(), 1);
    }
}
