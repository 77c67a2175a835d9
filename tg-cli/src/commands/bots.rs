//! Bots command - list configured bots.

use console::style;

use tg_api::client::mask_key;
use tg_core::config::AppConfig;
use tg_core::error::TgResult;
use crate::OutputFormat;

pub fn run(config: &AppConfig, format: OutputFormat) -> TgResult<()> {
    match format {
        OutputFormat::Json => {
            let bots: Vec<serde_json::Value> = config
                .bots
                .iter()
                .map(|(name, entry)| {
                    serde_json::json!({
                        "name": name,
                        "api_key": mask_key(&entry.api_key),
                        "webhook": entry.webhook,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&bots).unwrap_or_default());
        }
        OutputFormat::Text => {
            if config.bots.is_empty() {
                println!("{}", style("No bots configured.").dim());
                return Ok(());
            }
            println!("{}", style("Configured bots").bold().underlined());
            for (name, entry) in &config.bots {
                let delivery = if entry.webhook { "webhook" } else { "polling" };
                println!(
                    "  {:<20} {:<16} {}",
                    style(super::truncate(name, 20)).cyan(),
                    mask_key(&entry.api_key),
                    style(delivery).dim()
                );
            }
        }
    }
    Ok(())
}
