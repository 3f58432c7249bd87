//! Coin metadata document building and upload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::metadata::image::ImageFile;
use crate::metadata::uploader::{MetadataUploader, UploadFile};
use crate::metadata::{MetadataError, MetadataResult};

/// File name used for the uploaded metadata document.
const METADATA_FILE_NAME: &str = "metadata.json";

/// The descriptive document a coin's metadata URI points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub symbol: String,
    pub description: String,
    /// URI of the uploaded image.
    pub image: String,
    pub properties: BTreeMap<String, String>,
    pub content: ContentRef,
}

/// Primary media of the coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRef {
    pub mime: String,
    pub uri: String,
}

/// Result of a successful metadata upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataUpload {
    pub metadata_uri: String,
    pub image_uri: String,
    pub document: MetadataDocument,
}

/// Builder for coin metadata.
#[derive(Debug, Default)]
pub struct MetadataBuilder {
    name: Option<String>,
    symbol: Option<String>,
    description: Option<String>,
    image: Option<ImageFile>,
    properties: BTreeMap<String, String>,
}

impl MetadataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_image(mut self, image: ImageFile) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check that every required field is present and non-empty.
    pub fn validate(&self) -> MetadataResult<()> {
        if self.name.as_deref().map_or(true, str::is_empty) {
            return Err(MetadataError::Incomplete("name"));
        }
        if self.symbol.as_deref().map_or(true, str::is_empty) {
            return Err(MetadataError::Incomplete("symbol"));
        }
        if self.image.is_none() {
            return Err(MetadataError::Incomplete("image"));
        }
        Ok(())
    }

    /// Upload the image, then the metadata document referencing it.
    pub async fn upload<U: MetadataUploader>(self, uploader: &U) -> MetadataResult<MetadataUpload> {
        self.validate()?;
        let (Some(name), Some(symbol), Some(image)) = (self.name, self.symbol, self.image) else {
            return Err(MetadataError::Incomplete("image"));
        };

        let mime = image.format.mime_type().to_string();
        let image_uri = uploader
            .upload(UploadFile {
                file_name: image.file_name(),
                mime_type: mime.clone(),
                bytes: image.bytes,
            })
            .await?;

        let document = MetadataDocument {
            description: self.description.unwrap_or_else(|| name.clone()),
            name,
            symbol,
            image: image_uri.clone(),
            properties: self.properties,
            content: ContentRef {
                mime,
                uri: image_uri.clone(),
            },
        };

        let bytes = serde_json::to_vec(&document).map_err(MetadataError::Serialize)?;
        let metadata_uri = uploader
            .upload(UploadFile {
                file_name: METADATA_FILE_NAME.to_string(),
                mime_type: "application/json".to_string(),
                bytes,
            })
            .await?;

        Ok(MetadataUpload {
            metadata_uri,
            image_uri,
            document,
        })
    }
}
