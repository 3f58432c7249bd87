//! Human-readable registry listing.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Write;

use crate::config::LinkConfig;
use crate::registry::types::Registry;

const RULE_WIDTH: usize = 60;

/// Command shown to operators with an empty registry.
pub const CREATE_USAGE_HINT: &str =
    r#"zora-coins create --name "My Post" --symbol "POST" --image "/path/to/image.jpg""#;

/// Format a creation timestamp like `Jan 2, 2025, 03:04 AM` in `tz`.
pub fn format_created_at<Tz>(created_at: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    created_at
        .with_timezone(tz)
        .format("%b %-d, %Y, %I:%M %p")
        .to_string()
}

/// Render the registry in local time.
pub fn render(registry: &Registry, links: &LinkConfig) -> String {
    render_in(registry, links, &Local)
}

/// Render the registry with timestamps shown in `tz`.
pub fn render_in<Tz>(registry: &Registry, links: &LinkConfig, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();

    if registry.is_empty() {
        let _ = writeln!(out, "\nNo coins created yet.\n");
        let _ = writeln!(out, "Create your first coin with:");
        let _ = writeln!(out, "  {}\n", CREATE_USAGE_HINT);
        return out;
    }

    let rule = "─".repeat(RULE_WIDTH);
    let _ = writeln!(out, "\nCreated Coins ({} total)\n", registry.len());
    let _ = writeln!(out, "{}", rule);

    for coin in &registry.coins {
        let _ = writeln!(out, "\n  {} (${})", coin.name, coin.symbol);
        let _ = writeln!(out, "  Created: {}", format_created_at(&coin.created_at, tz));
        if let Some(address) = coin.address {
            let _ = writeln!(out, "  Address: {}", address);
            let _ = writeln!(out, "  Zora: {}", links.coin_url(address));
        }
        let _ = writeln!(out, "  Explorer: {}", coin.explorer_url);
        let _ = writeln!(out, "{}", rule);
    }

    out
}
