//! Webhook commands: register, remove, and listen for updates locally.

use std::net::SocketAddr;

use clap::Subcommand;
use console::style;
use tokio::sync::{mpsc, watch};
use tracing::info;

use tg_api::{BotResolver, WebhookServer};
use tg_core::config::AppConfig;
use tg_core::error::{TgError, TgResult};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum WebhookAction {
    /// Register an HTTPS url that receives updates.
    Set {
        /// Public HTTPS url.
        url: String,
    },
    /// Remove the webhook and go back to polling.
    Remove,
    /// Receive updates on a local address and print them.
    Listen {
        /// Address to bind.
        #[arg(short, long, default_value = "127.0.0.1:8443")]
        address: String,
        /// Stop after this many updates.
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
}

pub async fn run(
    config: &AppConfig,
    bot: Option<&str>,
    action: WebhookAction,
    format: OutputFormat,
) -> TgResult<()> {
    match action {
        WebhookAction::Set { url } => {
            let api = super::create_client(config, bot)?;
            super::print_response(api.set_webhook(&url).await?, format)
        }
        WebhookAction::Remove => {
            let api = super::create_client(config, bot)?;
            super::print_response(api.remove_webhook().await?, format)
        }
        WebhookAction::Listen { address, count } => {
            let name = webhook_bot(config, bot)?;
            info!("receiving updates for {name}");
            listen(&address, count, format).await
        }
    }
}

/// Pick the bot updates are received for. Only bots configured with
/// `webhook = true` qualify.
fn webhook_bot(config: &AppConfig, bot: Option<&str>) -> TgResult<String> {
    let resolver = BotResolver::from_config(config);
    if let Some(name) = bot {
        return if resolver.resolve(name)?.webhook {
            Ok(name.to_string())
        } else {
            Err(TgError::Config(format!(
                "bot {name} does not receive updates by webhook (set webhook = true)"
            )))
        };
    }

    let candidates: Vec<&str> = resolver.webhook_bots().collect();
    match candidates.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(TgError::MissingConfig("no bot is configured with webhook = true".into())),
        _ => Err(TgError::MissingConfig(format!(
            "several webhook bots configured ({}); pick one with --bot",
            candidates.join(", ")
        ))),
    }
}

async fn listen(address: &str, count: Option<usize>, format: OutputFormat) -> TgResult<()> {
    let addr: SocketAddr = address
        .parse()
        .map_err(|e| TgError::Config(format!("invalid listen address {address}: {e}")))?;

    let server = WebhookServer::bind(addr).await?;
    let local_addr = server.local_addr();
    let (updates_tx, mut updates_rx) = mpsc::channel(64);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server_task = tokio::spawn(server.run(updates_tx, shutdown_rx));

    if let OutputFormat::Text = format {
        println!(
            "{} on http://{local_addr} (Ctrl+C to stop)",
            style("Listening for updates").bold()
        );
    }

    let mut received = 0usize;
    loop {
        tokio::select! {
            update = updates_rx.recv() => {
                let Some(update) = update else { break };
                received += 1;
                print_update(&update, format);
                if count.is_some_and(|limit| received >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }
    }

    let _ = shutdown_tx.send(true);
    server_task
        .await
        .map_err(|e| TgError::Internal(format!("webhook listener task failed: {e}")))??;

    if let OutputFormat::Text = format {
        println!("{} {received} update(s)", style("Received").dim());
    }
    Ok(())
}

fn print_update(update: &serde_json::Value, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(update).unwrap_or_default());
        }
        OutputFormat::Text => {
            let id = update.get("update_id").and_then(|v| v.as_i64());
            let text = update
                .pointer("/message/text")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            match id {
                Some(id) => println!("  #{:<10} {}", style(id).cyan(), super::truncate(text, 60)),
                None => println!("  {}", serde_json::to_string(update).unwrap_or_default()),
            }
        }
    }
}
