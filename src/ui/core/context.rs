use crate::config::Config;
use crate::constants::APP_NAME;

/// Connection details the UI displays and the recovery flow reuses
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub server_url: String,
    pub username: String,
    pub api_key: String,
}

impl Session {
    pub fn from_config(config: &Config) -> Self {
        Self {
            server_url: config.server.url.clone(),
            username: config.server.username.clone(),
            api_key: config.server.api_key.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Shell command that restores a working key for this session
    pub fn recovery_command(&self) -> String {
        let username = if self.username.is_empty() {
            "<username>"
        } else {
            self.username.as_str()
        };
        format!("{APP_NAME} login --username {username} --server {}", self.server_url)
    }

    /// Key with everything but the last four characters hidden
    pub fn masked_key(&self) -> String {
        let key = self.api_key.trim();
        if key.is_empty() {
            return "not configured".to_string();
        }
        let visible: String = key.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
        format!("****{visible}")
    }
}
