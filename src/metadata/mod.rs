//! Coin metadata subsystem.
//!
//! # Data Flow
//! ```text
//! image path
//!     → image.rs (format + existence checks, read bytes)
//!     → builder.rs (metadata document)
//!     → uploader.rs (image upload, then document upload)
//!     → metadata URI
//! ```

pub mod builder;
pub mod image;
pub mod uploader;

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::service::ServiceError;

pub use builder::{MetadataBuilder, MetadataDocument, MetadataUpload};
pub use image::{validate_image, ImageFile, ImageFormat};
pub use uploader::{MetadataUploader, UploadFile, ZoraUploader};

/// Category recorded in every coin's metadata properties.
pub const COIN_CATEGORY: &str = "social";

/// Errors from metadata preparation and upload.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Unsupported image format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Image file not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("metadata is missing its {0}")]
    Incomplete(&'static str),

    #[error("failed to encode metadata: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Upload(#[from] ServiceError),
}

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Inputs for a coin's metadata.
#[derive(Debug, Clone)]
pub struct MetadataParams<'a> {
    pub name: &'a str,
    pub symbol: &'a str,
    pub description: &'a str,
    pub image_path: &'a Path,
}

/// Read the image, build the metadata document, and upload both.
pub async fn upload_metadata<U: MetadataUploader>(
    params: &MetadataParams<'_>,
    uploader: &U,
) -> MetadataResult<MetadataUpload> {
    let image = ImageFile::load(params.image_path)?;

    let builder = MetadataBuilder::new()
        .with_name(params.name)
        .with_symbol(params.symbol)
        .with_description(params.description)
        .with_image(image)
        .with_property("category", COIN_CATEGORY);

    builder.validate()?;
    builder.upload(uploader).await
}
