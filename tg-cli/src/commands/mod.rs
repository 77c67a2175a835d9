//! CLI command implementations.

pub mod bot;
pub mod bots;
pub mod markup;
pub mod media;
pub mod messages;
pub mod webhook;

use console::style;

use tg_api::{ApiClient, ApiResponse, BotResolver};
use tg_core::config::AppConfig;
use tg_core::error::{TgError, TgResult};
use crate::OutputFormat;

/// Helper to create an API client for the selected bot.
///
/// Without `--bot` the only configured bot is used.
pub fn create_client(config: &AppConfig, bot: Option<&str>) -> TgResult<ApiClient> {
    let resolver = BotResolver::from_config(config);
    let name = match bot {
        Some(name) => name.to_string(),
        None => default_bot(&resolver)?,
    };
    resolver.take(&name)
}

fn default_bot(resolver: &BotResolver) -> TgResult<String> {
    let names: Vec<&str> = resolver.names().collect();
    match names.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(TgError::MissingConfig("no bots configured".into())),
        _ => Err(TgError::MissingConfig(format!(
            "several bots configured ({}); pick one with --bot",
            names.join(", ")
        ))),
    }
}

/// Print a raw Bot API answer. An `ok:false` answer becomes an error.
pub fn print_response(value: serde_json::Value, format: OutputFormat) -> TgResult<()> {
    let response: ApiResponse = ApiResponse::from_value(value.clone())?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
        }
        OutputFormat::Text => {
            if response.is_ok() {
                println!("{}", style("ok").green().bold());
                if let Some(ref result) = response.result {
                    println!("{}", serde_json::to_string_pretty(result).unwrap_or_default());
                }
            }
        }
    }

    match response.error_message() {
        Some(message) => Err(TgError::Other(anyhow::anyhow!("Bot API error {message}"))),
        None => Ok(()),
    }
}

/// Truncate a string to a maximum number of characters, appending an ellipsis if truncated.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_core::config::BotEntry;

    fn config_with(names: &[&str]) -> AppConfig {
        let mut config = AppConfig::default();
        config.api.upload_dir = "/tmp".into();
        for (i, name) in names.iter().enumerate() {
            config.bots.insert(name.to_string(), BotEntry::new(format!("{i}:KEY")));
        }
        config
    }

    #[test]
    fn test_single_bot_is_default() {
        let client = create_client(&config_with(&["only"]), None).unwrap();
        assert_eq!(client.api_key(), "0:KEY");
    }

    #[test]
    fn test_ambiguous_bot_requires_flag() {
        let config = config_with(&["a", "b"]);
        assert!(matches!(create_client(&config, None), Err(TgError::MissingConfig(_))));
        assert_eq!(create_client(&config, Some("b")).unwrap().api_key(), "1:KEY");
        assert!(matches!(
            create_client(&config, Some("c")),
            Err(TgError::CredentialNotFound(_))
        ));
    }

    #[test]
    fn test_print_response_reports_failure() {
        let failed = serde_json::json!({"ok": false, "error_code": 401, "description": "Unauthorized"});
        assert!(print_response(failed, OutputFormat::Json).is_err());
        let ok = serde_json::json!({"ok": true, "result": true});
        assert!(print_response(ok, OutputFormat::Text).is_ok());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer string", 8), "a lon...");
    }
}
