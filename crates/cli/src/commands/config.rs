use dealerprice_core::config::{AppConfig, LoadOptions};
use serde_json::json;

use crate::commands::CommandResult;

/// Effective configuration after defaults, file, environment and overrides are applied.
pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let data = match serde_json::to_value(&config) {
        Ok(value) => value,
        Err(error) => {
            return CommandResult::failure("config", "serialization", error.to_string(), 3);
        }
    };

    CommandResult::success_with_data(
        "config",
        format!(
            "effective config (precedence: overrides > env > file > default); listening on {}",
            config.listen_address()
        ),
        Some(json!({ "effective": data, "cors_enabled": config.cors.enabled() })),
    )
}
