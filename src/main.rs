use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use voxbridge_core::AppConfig;
use voxbridge_gcp::speech::session;
use voxbridge_gcp::{Credentials, SpeechClient, Synthesizer, TranslateClient};

#[derive(Parser)]
#[command(
    name = "voxbridge",
    about = "Microphone bridge to Google Cloud speech, translation, and TTS"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stream microphone audio to streaming recognition and print
    /// translated transcripts until interrupted
    Listen {
        /// Input device name ("default" for the system default)
        #[arg(short, long, default_value = "default")]
        device: String,
    },
    /// Synthesize text into an MP3 file
    Speak {
        /// Text to synthesize
        text: String,
        /// Output file path (overwritten if present)
        #[arg(short, long, default_value = "output.mp3")]
        output: PathBuf,
        /// BCP-47 language code of the voice
        #[arg(long)]
        language: Option<String>,
        /// Voice name, e.g. "hi-IN-Wavenet-A"
        #[arg(long)]
        voice: Option<String>,
        /// Speaking rate (1.0 = normal)
        #[arg(long)]
        rate: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::from_env().context("failed to load configuration from environment")?;

    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::Registry::default().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(false),
    );
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    tracing::info!(
        credentials = %config.credentials_path.display(),
        project_id = %config.project_id,
        "voxbridge starting"
    );

    let credentials = Arc::new(
        Credentials::from_file(&config.credentials_path)
            .context("failed to load service-account credentials")?,
    );

    match cli.command {
        Command::Listen { device } => {
            config.capture.device_name = device;
            run_listen(&config, credentials).await
        }
        Command::Speak {
            text,
            output,
            language,
            voice,
            rate,
        } => {
            if let Some(language) = language {
                config.tts.language_code = language;
            }
            if let Some(voice) = voice {
                config.tts.voice_name = voice;
            }
            if let Some(rate) = rate {
                config.tts.speaking_rate = rate;
            }
            let synthesizer = Synthesizer::new(credentials, &config.tts);
            synthesizer
                .synthesize(&text, &output)
                .await
                .context("speech synthesis failed")?;
            Ok(())
        }
    }
}

async fn run_listen(config: &AppConfig, credentials: Arc<Credentials>) -> Result<()> {
    let manager = voxbridge_audio::DeviceManager::new();
    let device = manager
        .get_input_device(&config.capture.device_name)
        .with_context(|| {
            format!(
                "failed to get input device '{}'",
                config.capture.device_name
            )
        })?;

    let (mic, mut chunks) = voxbridge_audio::MicrophoneStream::open(
        &device,
        config.capture.sample_rate,
        config.capture.chunk_frames,
    )
    .context("failed to open microphone stream")?;

    // Bridge coalesced chunks into the request pump; the pump ends when
    // the capture stream's sentinel is observed
    let (audio_tx, audio_rx) = mpsc::unbounded_channel();
    let pump = tokio::spawn(async move {
        while let Some(chunk) = chunks.next_chunk().await {
            if audio_tx.send(chunk).is_err() {
                break;
            }
        }
    });

    let streaming_config = session::streaming_config(&config.speech, config.capture.sample_rate);
    let requests = session::request_stream(streaming_config, audio_rx);

    let mut client = SpeechClient::connect()
        .await
        .context("failed to connect to speech service")?;

    let token = credentials
        .bearer_token()
        .await
        .context("failed to fetch access token")?;
    let mut request = tonic::Request::new(requests);
    request.metadata_mut().insert(
        "authorization",
        token.parse().context("invalid authorization header value")?,
    );

    let responses = client
        .streaming_recognize(request)
        .await
        .context("streaming recognition call failed")?
        .into_inner();

    let translator = TranslateClient::new(Arc::clone(&credentials), config.project_id.clone());

    println!("\n=== Speak now (Press Ctrl+C to stop) ===");
    print!("Listening...");
    std::io::stdout().flush().ok();

    let session_timeout = Duration::from_secs(config.speech.session_timeout_secs);
    let mut stdout = std::io::stdout();

    tokio::select! {
        outcome = tokio::time::timeout(
            session_timeout,
            session::listen_print_loop(
                responses,
                &translator,
                &config.translate.target_language,
                &mut stdout,
            ),
        ) => {
            match outcome {
                Ok(result) => result.context("recognition loop failed")?,
                Err(_) => tracing::info!("session timeout reached"),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            println!("\nStopped");
        }
    }

    mic.close();
    let _ = pump.await;
    Ok(())
}
