//! Bot name to credential resolution.

use std::collections::BTreeMap;

use tg_core::config::{ApiConfig, AppConfig, BotEntry};
use tg_core::error::{TgError, TgResult};
use crate::client::ApiClient;

/// Resolves configured bot names to API keys and clients.
///
/// A name that is not configured is always an error.
#[derive(Debug, Clone)]
pub struct BotResolver {
    bots: BTreeMap<String, BotEntry>,
    api: ApiConfig,
}

impl BotResolver {
    pub fn new(bots: BTreeMap<String, BotEntry>, api: ApiConfig) -> Self {
        Self { bots, api }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.bots.clone(), config.api.clone())
    }

    /// Look up the configured entry for `name`.
    pub fn resolve(&self, name: &str) -> TgResult<&BotEntry> {
        self.bots
            .get(name)
            .ok_or_else(|| TgError::CredentialNotFound(name.to_string()))
    }

    /// Build a client bound to the API key of `name`.
    pub fn take(&self, name: &str) -> TgResult<ApiClient> {
        let entry = self.resolve(name)?;
        ApiClient::new(entry.api_key.clone(), &self.api)
    }

    /// Configured bot names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bots.keys().map(String::as_str)
    }

    /// Names of bots that receive updates through a webhook.
    pub fn webhook_bots(&self) -> impl Iterator<Item = &str> {
        self.bots
            .iter()
            .filter(|(_, entry)| entry.webhook)
            .map(|(name, _)| name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver() -> BotResolver {
        let mut bots = BTreeMap::new();
        bots.insert("news".to_string(), BotEntry { api_key: "111:AAA".into(), webhook: true });
        bots.insert("echo".to_string(), BotEntry::new("222:BBB"));
        let api = ApiConfig {
            upload_dir: "/tmp".into(),
            ..ApiConfig::default()
        };
        BotResolver::new(bots, api)
    }

    #[test]
    fn test_take_binds_configured_key() {
        let resolver = resolver();
        for (name, key) in [("news", "111:AAA"), ("echo", "222:BBB")] {
            let client = resolver.take(name).unwrap();
            assert_eq!(client.api_key(), key);
        }
    }

    #[test]
    fn test_absent_name_fails() {
        let resolver = resolver();
        for name in ["", "News", "missing"] {
            let err = resolver.take(name).unwrap_err();
            assert!(matches!(err, TgError::CredentialNotFound(ref n) if n == name));
        }
        assert!(resolver.resolve("missing").is_err());
    }

    #[test]
    fn test_names_and_webhook_bots() {
        let resolver = resolver();
        assert_eq!(resolver.names().collect::<Vec<_>>(), vec!["echo", "news"]);
        assert_eq!(resolver.webhook_bots().collect::<Vec<_>>(), vec!["news"]);
        assert!(!resolver.is_empty());
    }
}
