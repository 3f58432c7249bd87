//! `list`: print every coin in the registry.

use crate::commands::error::CommandError;
use crate::config::{install_root, CoinsConfig};
use crate::registry::{render, RegistryStore};

pub fn run(config: &CoinsConfig) -> Result<(), CommandError> {
    let store = RegistryStore::new(config.registry.resolve(&install_root()));
    let registry = store.load()?;
    println!("{}", render(&registry, &config.links));
    Ok(())
}
