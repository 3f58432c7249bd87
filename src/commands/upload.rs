//! `upload`: store an image and its metadata document, print the URI.

use alloy::primitives::Address;
use clap::Args;
use std::path::PathBuf;

use crate::commands::error::CommandError;
use crate::config::credentials::api_key_from_env;
use crate::config::CoinsConfig;
use crate::metadata::{upload_metadata, validate_image, MetadataParams, MetadataUpload, MetadataUploader, ZoraUploader};

/// Arguments of the `upload` command.
#[derive(Debug, Clone, Args)]
pub struct UploadArgs {
    /// Path to a .jpg, .jpeg, .png, .gif, or .webp image
    #[arg(long)]
    pub image: PathBuf,

    /// Address the upload is made on behalf of
    #[arg(long)]
    pub creator: String,

    #[arg(long, default_value = "Untitled")]
    pub name: String,

    #[arg(long, default_value = "COIN")]
    pub symbol: String,

    /// Defaults to the name
    #[arg(long)]
    pub description: Option<String>,
}

/// Parse the `--creator` value.
pub fn parse_creator(raw: &str) -> Result<Address, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::validation(format!("Invalid --creator address: {}", raw)))
}

/// Run `upload` against the real storage backend.
pub async fn run(args: UploadArgs, config: &CoinsConfig) -> Result<(), CommandError> {
    let creator = parse_creator(&args.creator)?;
    validate_image(&args.image)?;
    let api_key = api_key_from_env()?;

    let uploader = ZoraUploader::new(&config.api, api_key, creator)?;
    let upload = execute(&args, &uploader).await?;

    println!("Metadata URI: {}", upload.metadata_uri);
    Ok(())
}

/// Build and upload the metadata described by `args`.
pub async fn execute<U: MetadataUploader>(
    args: &UploadArgs,
    uploader: &U,
) -> Result<MetadataUpload, CommandError> {
    let description = args
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .unwrap_or(args.name.as_str());

    let upload = upload_metadata(
        &MetadataParams {
            name: &args.name,
            symbol: &args.symbol,
            description,
            image_path: &args.image,
        },
        uploader,
    )
    .await?;

    Ok(upload)
}
