//! Uploads to the content-addressed storage backend.

use alloy::primitives::Address;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::blockchain::api::API_KEY_HEADER;
use crate::config::ApiConfig;
use crate::service::{ServiceError, ServiceErrorKind, ServiceResult};

const SERVICE: &str = "metadata upload";

/// Header naming the creator the upload is made on behalf of.
pub const CREATOR_HEADER: &str = "x-creator-address";

/// A file to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// External boundary for storing files by content address.
#[allow(async_fn_in_trait)]
pub trait MetadataUploader {
    /// Store a file and return its content-addressed URI (`ipfs://...`).
    async fn upload(&self, file: UploadFile) -> ServiceResult<String>;
}

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash", alias = "cid")]
    hash: String,
}

/// Uploader for the Zora IPFS gateway, scoped to one creator.
#[derive(Debug, Clone)]
pub struct ZoraUploader {
    client: Client,
    upload_url: String,
    api_key: String,
    creator: Address,
}

impl ZoraUploader {
    pub fn new(config: &ApiConfig, api_key: impl Into<String>, creator: Address) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e))?;

        Ok(Self {
            client,
            upload_url: config.upload_url.clone(),
            api_key: api_key.into(),
            creator,
        })
    }
}

impl MetadataUploader for ZoraUploader {
    async fn upload(&self, file: UploadFile) -> ServiceResult<String> {
        let size = file.bytes.len();
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| ServiceError::new(ServiceErrorKind::Other, SERVICE, e.to_string()))?;
        let form = Form::new().part("file", part);

        let res = self
            .client
            .post(&self.upload_url)
            .query(&[("cid-version", "1")])
            .header(API_KEY_HEADER, &self.api_key)
            .header(CREATOR_HEADER, self.creator.to_string())
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| ServiceError::from_reqwest(SERVICE, e))?;

        if !status.is_success() {
            return Err(ServiceError::from_response(SERVICE, status, &text));
        }

        let uri = parse_add_response(&text)?;
        tracing::info!(file = %file.file_name, size, uri = %uri, "File uploaded");
        Ok(uri)
    }
}

fn parse_add_response(text: &str) -> ServiceResult<String> {
    let response: AddResponse = serde_json::from_str(text).map_err(|e| {
        ServiceError::new(
            ServiceErrorKind::Rejected,
            SERVICE,
            format!("unexpected response: {}", e),
        )
    })?;
    if response.hash.is_empty() {
        return Err(ServiceError::new(
            ServiceErrorKind::Rejected,
            SERVICE,
            "response did not include a content hash",
        ));
    }
    Ok(format!("ipfs://{}", response.hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kubo_response() {
        let uri = parse_add_response(r#"{"Name":"a.png","Hash":"bafkreiabc","Size":"12"}"#).unwrap();
        assert_eq!(uri, "ipfs://bafkreiabc");
    }

    #[test]
    fn test_parse_cid_alias() {
        let uri = parse_add_response(r#"{"cid":"bafkreixyz"}"#).unwrap();
        assert_eq!(uri, "ipfs://bafkreixyz");
    }

    #[test]
    fn test_empty_hash_rejected() {
        let err = parse_add_response(r#"{"Hash":""}"#).unwrap_err();
        assert_eq!(err.kind, ServiceErrorKind::Rejected);
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_network_error() {
        let config = ApiConfig {
            upload_url: "http://127.0.0.1:9/api/v0/add".to_string(),
            timeout_secs: 2,
            ..ApiConfig::default()
        };
        let uploader = ZoraUploader::new(&config, "key", Address::ZERO).unwrap();
        let err = uploader
            .upload(UploadFile {
                file_name: "a.png".to_string(),
                mime_type: "image/png".to_string(),
                bytes: vec![1, 2, 3],
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ServiceErrorKind::Network);
    }
}
