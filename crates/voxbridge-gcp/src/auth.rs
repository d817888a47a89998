use crate::error::GcpError;
use gcp_auth::{CustomServiceAccount, TokenProvider};
use std::path::Path;

pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Service-account credentials, loaded once at startup and shared by
/// every client via `Arc` instead of living in process-wide globals.
pub struct Credentials {
    provider: CustomServiceAccount,
}

impl Credentials {
    /// Load a service-account JSON key file (the file named by
    /// `GOOGLE_APPLICATION_CREDENTIALS`).
    pub fn from_file(path: &Path) -> Result<Self, GcpError> {
        let provider = CustomServiceAccount::from_file(path)?;
        Ok(Self { provider })
    }

    /// Fetch an access token for the cloud-platform scope, formatted as
    /// an `Authorization` header value. gcp_auth caches tokens until
    /// expiry, so calling this per request is cheap.
    pub async fn bearer_token(&self) -> Result<String, GcpError> {
        let token = self.provider.token(&[CLOUD_PLATFORM_SCOPE]).await?;
        Ok(format!("Bearer {}", token.as_str()))
    }
}
