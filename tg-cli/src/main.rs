//! tgbot CLI - command-line client for the Telegram Bot API.
//!
//! Every subcommand maps onto one Bot API call made on behalf of a bot from
//! the configuration file. Useful for scripting, checking API keys and
//! receiving webhook updates during development.

mod commands;

use clap::{Parser, Subcommand};
use tracing::info;

use tg_core::config::AppConfig;
use tg_core::error::TgResult;
use tg_core::logging;

/// tgbot - talk to the Telegram Bot API from the terminal.
#[derive(Parser)]
#[command(
    name = "tgbot",
    version,
    about = "Telegram Bot API client CLI",
    long_about = "A command-line client for the Telegram Bot API.\n\
                   Bots and their API keys are read from the configuration file."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Configured bot to act as. Optional when exactly one bot is configured.
    #[arg(short, long, global = true)]
    bot: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured bots.
    Bots,
    /// Show information about the bot (checks the API key).
    Me,
    /// Fetch pending updates once.
    Updates {
        /// Identifier of the first update to return.
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<i64>,
        /// Maximum number of updates (1-100).
        #[arg(short = 'n', long)]
        limit: Option<u32>,
        /// Long polling timeout in seconds.
        #[arg(short, long)]
        timeout: Option<u32>,
    },
    /// Send a text message.
    Send(commands::messages::SendArgs),
    /// Forward a message.
    Forward {
        /// Target chat id or @channel.
        chat: String,
        /// Chat the message comes from.
        from_chat: String,
        /// Message id in the source chat.
        message_id: i64,
    },
    /// Send a location.
    Location(commands::messages::LocationArgs),
    /// Broadcast a chat action (typing, upload_photo, ...).
    Action {
        /// Target chat id or @channel.
        chat: String,
        /// Action name.
        action: String,
    },
    /// List a user's profile photos.
    Photos {
        /// User id.
        user_id: i64,
        #[arg(long)]
        offset: Option<u32>,
        #[arg(short = 'n', long)]
        limit: Option<u32>,
    },
    /// Send a photo, audio, document, sticker or video.
    Media(commands::media::MediaArgs),
    /// Manage or receive webhooks.
    Webhook {
        #[command(subcommand)]
        action: commands::webhook::WebhookAction,
    },
    /// Print reply markup JSON without calling the API.
    Markup {
        #[command(subcommand)]
        action: commands::markup::MarkupAction,
    },
}

#[tokio::main]
async fn main() -> TgResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_file(std::path::Path::new(path))?,
        None => AppConfig::load_default()?,
    };

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let log_dir = config
        .effective_log_dir()
        .unwrap_or_else(|_| std::path::PathBuf::from("logs"));
    let _guard = logging::init_logging(log_level, &log_dir, config.logging.json_output)?;

    info!("tgbot CLI v{}", tg_core::constants::APP_VERSION);

    let bot = cli.bot.as_deref();
    let format = cli.format;

    // Dispatch to command handlers
    match cli.command {
        Commands::Bots => commands::bots::run(&config, format),
        Commands::Me => commands::bot::me(&config, bot, format).await,
        Commands::Updates { offset, limit, timeout } => {
            commands::bot::updates(&config, bot, offset, limit, timeout, format).await
        }
        Commands::Send(args) => commands::messages::send(&config, bot, args, format).await,
        Commands::Forward { chat, from_chat, message_id } => {
            commands::messages::forward(&config, bot, chat, from_chat, message_id, format).await
        }
        Commands::Location(args) => commands::messages::location(&config, bot, args, format).await,
        Commands::Action { chat, action } => {
            commands::messages::action(&config, bot, chat, &action, format).await
        }
        Commands::Photos { user_id, offset, limit } => {
            commands::bot::photos(&config, bot, user_id, offset, limit, format).await
        }
        Commands::Media(args) => commands::media::run(&config, bot, args, format).await,
        Commands::Webhook { action } => commands::webhook::run(&config, bot, action, format).await,
        Commands::Markup { action } => commands::markup::run(action),
    }
}
