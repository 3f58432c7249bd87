//! Command-line interface.
//!
//! One binary with three subcommands. Argument errors print usage to
//! stderr and exit 1; every other failure is a [`CommandError`].

pub mod create;
pub mod error;
pub mod list;
pub mod upload;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CoinsConfig;

pub use create::{CreateArgs, CreateContext, CreateOutcome, CreatePlan};
pub use error::CommandError;
pub use upload::UploadArgs;

#[derive(Debug, Parser)]
#[command(name = "zora-coins", version)]
#[command(about = "Create Zora content coins on Base and keep a local registry of them", long_about = None)]
pub struct Cli {
    /// TOML config file (defaults to zora-coins.toml in the install root, if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload metadata and create a new coin
    Create(CreateArgs),
    /// List coins created with this tool
    List,
    /// Upload an image and metadata, print the metadata URI
    Upload(UploadArgs),
}

/// Run a parsed command.
pub async fn run(command: Command, config: &CoinsConfig) -> Result<(), CommandError> {
    match command {
        Command::Create(args) => create::run(args, config).await,
        Command::List => list::run(config),
        Command::Upload(args) => upload::run(args, config).await,
    }
}

/// Exit code for a failed argument parse. Help and version output are not
/// failures.
pub fn parse_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Clap value parser rejecting blank strings.
pub(crate) fn non_empty(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        Err("must not be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "zora-coins", "create", "--name", "Test", "--symbol", "test", "--image", "./a.png",
            "--preview",
        ])
        .unwrap();
        match cli.command {
            Command::Create(args) => {
                assert_eq!(args.name, "Test");
                assert_eq!(args.symbol, "test");
                assert_eq!(args.image, PathBuf::from("./a.png"));
                assert!(args.preview);
                assert_eq!(args.description, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_create_requires_name_symbol_image() {
        let err = Cli::try_parse_from(["zora-coins", "create", "--name", "Test"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

        let err = Cli::try_parse_from([
            "zora-coins", "create", "--name", "", "--symbol", "T", "--image", "a.png",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn test_upload_defaults_and_required_creator() {
        let cli = Cli::try_parse_from([
            "zora-coins", "upload", "--image", "a.png", "--creator", "0xabc",
        ])
        .unwrap();
        match cli.command {
            Command::Upload(args) => {
                assert_eq!(args.name, "Untitled");
                assert_eq!(args.symbol, "COIN");
                assert_eq!(args.creator, "0xabc");
            }
            other => panic!("unexpected command: {:?}", other),
        }

        let err = Cli::try_parse_from(["zora-coins", "upload", "--image", "a.png"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["zora-coins", "list", "--config", "/etc/coins.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/coins.toml")));
        assert!(matches!(cli.command, Command::List));
    }
}
