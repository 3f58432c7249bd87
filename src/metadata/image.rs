//! Image validation and loading.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::metadata::{MetadataError, MetadataResult};

/// Supported coin image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Extensions accepted for coin images, for operator messages.
    pub const SUPPORTED_EXTENSIONS: &'static [&'static str] =
        &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

    /// Detect the format from a path's extension, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// Check that `path` names a supported image that exists on disk.
///
/// The format is checked first so an unsupported file is reported as such
/// even when it is also missing.
pub fn validate_image(path: &Path) -> MetadataResult<ImageFormat> {
    let format = ImageFormat::from_path(path).ok_or_else(|| MetadataError::UnsupportedFormat {
        extension: path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_ascii_lowercase()))
            .unwrap_or_default(),
    })?;

    if !path.is_file() {
        return Err(MetadataError::ImageNotFound(path.to_path_buf()));
    }

    Ok(format)
}

/// An image read into memory, ready for upload.
#[derive(Debug, Clone)]
pub struct ImageFile {
    pub path: PathBuf,
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    /// Validate and read an image from disk.
    pub fn load(path: &Path) -> MetadataResult<Self> {
        let format = validate_image(path)?;
        let bytes = std::fs::read(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            format,
            bytes,
        })
    }

    /// File name used for the upload.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string())
    }
}
