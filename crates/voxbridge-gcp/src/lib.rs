pub mod auth;
pub mod error;
pub mod speech;
pub mod translate;
pub mod tts;

pub use auth::Credentials;
pub use error::GcpError;
pub use speech::SpeechClient;
pub use translate::{TranslateClient, Translator};
pub use tts::Synthesizer;
