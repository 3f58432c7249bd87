//! `create`: upload metadata, create the coin, record it.
//!
//! ```text
//! args → credentials → image → balance → upload metadata → prepare call
//!     → preview: print predicted address, stop
//!     → submit → append to registry
//! ```
//!
//! Any failure aborts the run. Earlier side effects (uploads) are not undone.

use alloy::primitives::{Address, U256};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;

use crate::blockchain::types::format_native;
use crate::blockchain::{
    BlockchainClient, BlockchainError, CoinApiClient, CoinFactory, CoinParams, Wallet,
    ZoraCoinFactory, MIN_BALANCE_WEI,
};
use crate::commands::error::CommandError;
use crate::commands::non_empty;
use crate::config::{install_root, CoinsConfig, Credentials, LinkConfig};
use crate::metadata::{upload_metadata, validate_image, MetadataParams, MetadataUploader, ZoraUploader};
use crate::registry::{append, normalize_symbol, CoinRecord, RegistryStore};
use crate::service::ServiceErrorKind;

/// Arguments of the `create` command.
#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Coin display name
    #[arg(long, value_parser = non_empty)]
    pub name: String,

    /// Ticker symbol (uppercased, at most 6 characters are kept)
    #[arg(long, value_parser = non_empty)]
    pub symbol: String,

    /// Path to a .jpg, .jpeg, .png, .gif, or .webp image
    #[arg(long)]
    pub image: PathBuf,

    /// Coin description (defaults to the name)
    #[arg(long)]
    pub description: Option<String>,

    /// Compute the predicted address without sending a transaction
    #[arg(long)]
    pub preview: bool,
}

/// Validated inputs of a creation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePlan {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: PathBuf,
    pub preview: bool,
}

impl CreatePlan {
    /// Normalize and validate arguments. Touches only the local filesystem.
    ///
    /// The name is kept as given; the symbol is uppercased and cut to six
    /// characters without trimming.
    pub fn from_args(args: &CreateArgs) -> Result<Self, CommandError> {
        if args.name.trim().is_empty() {
            return Err(CommandError::Argument("--name must not be empty".to_string()));
        }
        if args.symbol.trim().is_empty() {
            return Err(CommandError::Argument("--symbol must not be empty".to_string()));
        }
        let symbol = normalize_symbol(&args.symbol);

        validate_image(&args.image)?;

        let description = args
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&args.name)
            .to_string();

        Ok(Self {
            name: args.name.clone(),
            symbol,
            description,
            image: args.image.clone(),
            preview: args.preview,
        })
    }
}

/// Services and settings a creation run works against.
pub struct CreateContext<'a, F, U> {
    pub factory: &'a F,
    pub uploader: &'a U,
    pub store: &'a RegistryStore,
    pub links: &'a LinkConfig,
    pub chain_id: u64,
    pub native_symbol: &'a str,
    pub referrer: Option<Address>,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Preview only; nothing was sent or recorded.
    Preview {
        predicted_address: Address,
        metadata_uri: String,
    },
    /// The coin was created and appended to the registry.
    Created(CoinRecord),
}

/// Run `create` against the real chain, API, and registry.
pub async fn run(args: CreateArgs, config: &CoinsConfig) -> Result<(), CommandError> {
    let credentials = Credentials::from_env()?;
    let plan = CreatePlan::from_args(&args)?;

    println!("\nCreating Zora Coin: \"{}\"", plan.name);
    println!("Symbol: ${}", plan.symbol);

    let wallet = Wallet::from_private_key(credentials.private_key(), config.chain.chain_id)?;
    println!("Wallet: {}", wallet.address());

    let uploader = ZoraUploader::new(&config.api, &credentials.api_key, wallet.address())?;
    let api = CoinApiClient::new(&config.api, &credentials.api_key)?;
    let client = BlockchainClient::new(config.chain.clone()).await?;
    let factory = ZoraCoinFactory::new(client, api, wallet)?;
    let store = RegistryStore::new(config.registry.resolve(&install_root()));

    let ctx = CreateContext {
        factory: &factory,
        uploader: &uploader,
        store: &store,
        links: &config.links,
        chain_id: config.chain.chain_id,
        native_symbol: &config.chain.native_symbol,
        referrer: credentials.referrer,
    };

    execute(&plan, &ctx).await.map(|_| ())
}

/// Carry out a validated plan.
pub async fn execute<F, U>(
    plan: &CreatePlan,
    ctx: &CreateContext<'_, F, U>,
) -> Result<CreateOutcome, CommandError>
where
    F: CoinFactory,
    U: MetadataUploader,
{
    let creator = ctx.factory.creator();

    let balance = ctx.factory.balance().await?;
    println!("Balance: {} {}", format_native(balance), ctx.native_symbol);
    if balance < MIN_BALANCE_WEI {
        return Err(insufficient_funds(balance, creator, ctx.native_symbol));
    }

    println!("\nUploading image and metadata...");
    let upload = upload_metadata(
        &MetadataParams {
            name: &plan.name,
            symbol: &plan.symbol,
            description: &plan.description,
            image_path: &plan.image,
        },
        ctx.uploader,
    )
    .await?;
    println!("Metadata URI: {}", upload.metadata_uri);

    let params = CoinParams {
        creator,
        name: plan.name.clone(),
        symbol: plan.symbol.clone(),
        metadata_uri: upload.metadata_uri.clone(),
        platform_referrer: ctx.referrer,
        chain_id: ctx.chain_id,
    };

    if plan.preview {
        println!("\nPreview Mode - Calculating predicted address...");
    }
    let call = ctx.factory.prepare(&params).await?;

    if plan.preview {
        println!("\nCoin Details:");
        println!("   Name: {}", plan.name);
        println!("   Symbol: ${}", plan.symbol);
        println!("   Metadata: {}", upload.metadata_uri);
        println!("   Predicted Address: {}", call.predicted_address);
        println!("   Creator: {}", creator);
        if let Some(referrer) = ctx.referrer {
            println!("   Referrer: {}", referrer);
        }
        println!("\nPreview only - no transaction sent");
        println!("   Run without --preview to create the coin");
        return Ok(CreateOutcome::Preview {
            predicted_address: call.predicted_address,
            metadata_uri: upload.metadata_uri,
        });
    }

    println!("\nCreating coin on chain {}...", ctx.chain_id);
    let deployment = ctx.factory.submit(&call).await.map_err(|e| match e {
        BlockchainError::Unconfirmed { tx_hash, reason } => CommandError::Unconfirmed {
            tx_hash,
            reason,
            explorer_url: Some(ctx.links.transaction_url(tx_hash)),
        },
        e if e.kind() == ServiceErrorKind::InsufficientFunds => {
            insufficient_funds(balance, creator, ctx.native_symbol)
        }
        e => CommandError::from(e),
    })?;

    let explorer_url = ctx.links.transaction_url(deployment.tx_hash);
    println!("\nCoin created successfully!");
    println!("   Transaction: {}", deployment.tx_hash);
    match deployment.address {
        Some(address) => {
            println!("   Coin Address: {}", address);
            println!("   Explorer: {}", explorer_url);
            println!("   Zora: {}", ctx.links.coin_url(address));
        }
        None => {
            println!("   Coin Address: unknown");
            println!("   Explorer: {}", explorer_url);
        }
    }

    let record = CoinRecord {
        address: deployment.address,
        name: plan.name.clone(),
        symbol: plan.symbol.clone(),
        tx_hash: deployment.tx_hash,
        created_at: Utc::now(),
        metadata_uri: upload.metadata_uri,
        explorer_url,
    };

    let registry = ctx.store.load()?;
    ctx.store.save(&append(registry, record.clone()))?;
    println!("\nSaved to {}", ctx.store.path().display());

    Ok(CreateOutcome::Created(record))
}

fn insufficient_funds(balance: U256, address: Address, symbol: &str) -> CommandError {
    CommandError::InsufficientFunds {
        balance: format_native(balance),
        minimum: format_native(MIN_BALANCE_WEI),
        symbol: symbol.to_string(),
        address,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(image: PathBuf) -> CreateArgs {
        CreateArgs {
            name: "Test".to_string(),
            symbol: "mycoin123".to_string(),
            image,
            description: None,
            preview: false,
        }
    }

    #[test]
    fn test_plan_normalizes_symbol_and_description() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("a.png");
        std::fs::write(&image, [0u8; 4]).unwrap();

        let plan = CreatePlan::from_args(&args(image)).unwrap();
        assert_eq!(plan.symbol, "MYCOIN");
        assert_eq!(plan.description, "Test");
        assert!(!plan.preview);
    }

    #[test]
    fn test_plan_does_not_trim_symbol_or_name() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("a.png");
        std::fs::write(&image, [0u8; 4]).unwrap();

        let mut a = args(image);
        a.name = " Test ".to_string();
        for raw in [" ab cdefg", "x y", "  pad  ", "ünïcödé!"] {
            a.symbol = raw.to_string();
            let plan = CreatePlan::from_args(&a).unwrap();
            let expected: String = raw.to_uppercase().chars().take(6).collect();
            assert_eq!(plan.symbol, expected);
            assert_eq!(plan.name, " Test ");
            assert_eq!(plan.description, " Test ");
        }
        a.symbol = " ab cdefg".to_string();
        assert_eq!(CreatePlan::from_args(&a).unwrap().symbol, " AB CD");
    }

    #[test]
    fn test_plan_keeps_explicit_description() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("a.webp");
        std::fs::write(&image, [0u8; 4]).unwrap();

        let mut a = args(image);
        a.description = Some("A post about things".to_string());
        assert_eq!(
            CreatePlan::from_args(&a).unwrap().description,
            "A post about things"
        );
    }

    #[test]
    fn test_plan_rejects_bad_images() {
        let dir = tempfile::tempdir().unwrap();

        let bmp = dir.path().join("a.bmp");
        std::fs::write(&bmp, [0u8; 4]).unwrap();
        assert!(matches!(
            CreatePlan::from_args(&args(bmp)),
            Err(CommandError::Validation { hint: Some(_), .. })
        ));

        let missing = dir.path().join("missing.png");
        assert!(matches!(
            CreatePlan::from_args(&args(missing)),
            Err(CommandError::Validation { hint: None, .. })
        ));
    }

    #[test]
    fn test_plan_rejects_blank_name() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("a.gif");
        std::fs::write(&image, [0u8; 4]).unwrap();

        let mut a = args(image);
        a.name = "   ".to_string();
        assert!(matches!(
            CreatePlan::from_args(&a),
            Err(CommandError::Argument(_))
        ));
    }
}
