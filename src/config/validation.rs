//! Configuration validation.
//!
//! Semantic checks only; serde already handled syntax. Every problem is
//! collected so the operator can fix the file in one pass.

use std::fmt;

use crate::config::schema::CoinsConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration.
pub fn validate_config(config: &CoinsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_url(&mut errors, "chain.rpc_url", &config.chain.rpc_url);
    for (i, url) in config.chain.failover_urls.iter().enumerate() {
        check_url(&mut errors, &format!("chain.failover_urls[{}]", i), url);
    }
    if config.chain.chain_id == 0 {
        errors.push(ValidationError::new("chain.chain_id", "must be non-zero"));
    }
    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("chain.rpc_timeout_secs", "must be greater than 0"));
    }
    if config.chain.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "chain.receipt_timeout_secs",
            "must be greater than 0",
        ));
    }

    check_url(&mut errors, "api.base_url", &config.api.base_url);
    check_url(&mut errors, "api.upload_url", &config.api.upload_url);
    if config.api.timeout_secs == 0 {
        errors.push(ValidationError::new("api.timeout_secs", "must be greater than 0"));
    }
    if config.api.currency.trim().is_empty() {
        errors.push(ValidationError::new("api.currency", "must not be empty"));
    }

    if config.registry.path.as_os_str().is_empty() {
        errors.push(ValidationError::new("registry.path", "must not be empty"));
    }

    check_url(&mut errors, "links.explorer_url", &config.links.explorer_url);
    check_url(&mut errors, "links.marketplace_url", &config.links.marketplace_url);

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level '{}'", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError::new(
            field,
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(field, format!("invalid URL '{}': {}", value, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CoinsConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = CoinsConfig::default();
        config.chain.rpc_url = "not a url".to_string();
        config.chain.chain_id = 0;
        config.api.timeout_secs = 0;
        config.observability.log_level = "loud".to_string();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "chain.rpc_url",
                "chain.chain_id",
                "api.timeout_secs",
                "observability.log_level"
            ]
        );
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let mut config = CoinsConfig::default();
        config.chain.failover_urls.push("ws://localhost:8546".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "chain.failover_urls[0]");
        assert!(errors[0].to_string().contains("unsupported scheme 'ws'"));
    }
}
