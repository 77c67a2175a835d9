//! Bot-level commands: me, updates, photos.

use tg_api::GetUpdatesParams;
use tg_core::config::AppConfig;
use tg_core::error::TgResult;
use crate::OutputFormat;

pub async fn me(config: &AppConfig, bot: Option<&str>, format: OutputFormat) -> TgResult<()> {
    let api = super::create_client(config, bot)?;
    super::print_response(api.get_me().await?, format)
}

pub async fn updates(
    config: &AppConfig,
    bot: Option<&str>,
    offset: Option<i64>,
    limit: Option<u32>,
    timeout: Option<u32>,
    format: OutputFormat,
) -> TgResult<()> {
    let api = super::create_client(config, bot)?;
    let params = GetUpdatesParams { offset, limit, timeout };
    super::print_response(api.get_updates(&params).await?, format)
}

pub async fn photos(
    config: &AppConfig,
    bot: Option<&str>,
    user_id: i64,
    offset: Option<u32>,
    limit: Option<u32>,
    format: OutputFormat,
) -> TgResult<()> {
    let api = super::create_client(config, bot)?;
    let value = api.get_user_profile_photos(user_id, offset, limit).await?;
    super::print_response(value, format)
}
