//! IPFS media store backed by the Pinata pinning API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use url::Url;

use crate::domain::{AppError, IpfsConfig, StagedMedia};
use crate::ports::MediaStore;

const PINATA_JWT: &str = "PINATA_JWT";

/// Uploads staged media with `pinFileToIPFS` and returns a gateway URL.
#[derive(Clone)]
pub struct PinataMediaStore {
    jwt: Option<String>,
    api_url: Url,
    gateway_url: Url,
    client: Client,
}

impl std::fmt::Debug for PinataMediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinataMediaStore")
            .field("api_url", &self.api_url)
            .field("gateway_url", &self.gateway_url)
            .field("jwt", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct PinResponse {
    #[serde(rename = "IpfsHash")]
    ipfs_hash: String,
}

impl PinataMediaStore {
    pub fn new(jwt: String, config: &IpfsConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            jwt: Some(jwt),
            api_url: config.api_url.clone(),
            gateway_url: config.gateway_url.clone(),
            client,
        })
    }

    /// Create from the `PINATA_JWT` environment variable.
    ///
    /// A missing credential is only reported when an upload is attempted.
    pub fn from_env_with_config(config: &IpfsConfig) -> Result<Self, AppError> {
        match std::env::var(PINATA_JWT) {
            Ok(jwt) => Self::new(jwt, config),
            Err(_) => Ok(Self { jwt: None, ..Self::new(String::new(), config)? }),
        }
    }

    fn gateway_link(&self, hash: &str) -> Result<String, AppError> {
        self.gateway_url
            .join(hash)
            .map(String::from)
            .map_err(|e| AppError::Upload(format!("Invalid gateway URL for {}: {}", hash, e)))
    }
}

impl MediaStore for PinataMediaStore {
    fn upload(&self, media: &StagedMedia) -> Result<String, AppError> {
        let jwt = self.jwt.as_deref().ok_or_else(|| {
            AppError::Configuration(format!("{} environment variable not set", PINATA_JWT))
        })?;
        let part = Part::bytes(media.bytes().to_vec())
            .file_name(media.file_name().to_string())
            .mime_str(media.mime_type())
            .map_err(|e| AppError::Upload(format!("Invalid MIME type: {}", e)))?;
        let metadata = serde_json::json!({ "name": media.file_name() }).to_string();
        let form = Form::new().part("file", part).text("pinataMetadata", metadata);

        log::info!("Uploading {} ({} bytes) to IPFS", media.file_name(), media.bytes().len());
        let response = self
            .client
            .post(self.api_url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", jwt))
            .multipart(form)
            .send()
            .map_err(|e| AppError::Upload(format!("network request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upload(format!("{} {}", status.as_u16(), error_text.trim())));
        }

        let pinned: PinResponse = response
            .json()
            .map_err(|e| AppError::Upload(format!("Failed to parse response: {}", e)))?;
        let url = self.gateway_link(&pinned.ipfs_hash)?;
        log::debug!("Pinned {} at {}", media.file_name(), url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(server: &mockito::Server) -> IpfsConfig {
        IpfsConfig {
            api_url: Url::parse(&server.url()).unwrap(),
            gateway_url: Url::parse("https://gateway.example/ipfs/").unwrap(),
            timeout_secs: 1,
        }
    }

    fn logo() -> StagedMedia {
        StagedMedia::new("logo.png", vec![0x89, b'P', b'N', b'G']).unwrap()
    }

    #[test]
    fn upload_returns_gateway_url() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/")
            .match_header("authorization", "Bearer test-jwt")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"IpfsHash": "QmLogo", "PinSize": 4, "Timestamp": "2026-10-19T12:00:00Z"}"#)
            .create();

        let store = PinataMediaStore::new("test-jwt".to_string(), &config(&server)).unwrap();
        let url = store.upload(&logo()).unwrap();

        assert_eq!(url, "https://gateway.example/ipfs/QmLogo");
        mock.assert();
    }

    #[test]
    fn rejected_upload_reports_status() {
        let mut server = mockito::Server::new();
        let mock = server.mock("POST", "/").with_status(401).with_body("Unauthorized").create();

        let store = PinataMediaStore::new("bad-jwt".to_string(), &config(&server)).unwrap();
        let err = store.upload(&logo()).unwrap_err();

        assert!(matches!(&err, AppError::Upload(msg) if msg.contains("401")));
        mock.assert();
    }

    #[test]
    fn missing_credential_fails_on_upload() {
        let server = mockito::Server::new();
        let store = PinataMediaStore {
            jwt: None,
            ..PinataMediaStore::new(String::new(), &config(&server)).unwrap()
        };
        let err = store.upload(&logo()).unwrap_err();
        assert!(err.to_string().contains("PINATA_JWT"));
    }

    #[test]
    fn debug_output_redacts_token() {
        let server = mockito::Server::new();
        let store = PinataMediaStore::new("secret".to_string(), &config(&server)).unwrap();
        assert!(!format!("{:?}", store).contains("secret"));
    }
}
