//! Wire types for the AppCenter HTTP API (`/api/v1`).

use serde::{Deserialize, Serialize};

/// Settings key holding the server-configured display timezone.
pub const UI_TIMEZONE_KEY: &str = "ui_timezone";

/// One key/value pair from `GET /settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingItem {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Loosely-formatted server timestamp; parse with `appcenter-utils`.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Response body of `GET /settings`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPage {
    pub items: Vec<SettingItem>,
    #[serde(default)]
    pub total: usize,
}

impl SettingsPage {
    #[must_use]
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .map(|item| item.value.as_str())
    }

    /// Trimmed `ui_timezone` value, `None` when the key is missing or blank.
    #[must_use]
    pub fn ui_timezone(&self) -> Option<&str> {
        self.value_of(UI_TIMEZONE_KEY)
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// Request body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response body of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::{SettingsPage, TokenResponse};

    #[test]
    fn settings_page_decodes_minimal_body() {
        let page: SettingsPage = serde_json::from_value(serde_json::json!({
            "items": []
        }))
        .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.ui_timezone(), None);
    }

    #[test]
    fn settings_page_decodes_full_items() {
        let page: SettingsPage = serde_json::from_value(serde_json::json!({
            "items": [
                {
                    "key": "ui_timezone",
                    "value": "Europe/Istanbul",
                    "description": "Display timezone",
                    "updated_at": "2024-01-15 10:30:00"
                },
                { "key": "agent_poll_interval", "value": "30" }
            ],
            "total": 2
        }))
        .unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.ui_timezone(), Some("Europe/Istanbul"));
        assert_eq!(page.value_of("agent_poll_interval"), Some("30"));
        assert_eq!(page.value_of("missing"), None);
    }

    #[test]
    fn ui_timezone_trims_and_rejects_blank() {
        let page: SettingsPage = serde_json::from_value(serde_json::json!({
            "items": [{ "key": "ui_timezone", "value": "  America/Denver  " }]
        }))
        .unwrap();
        assert_eq!(page.ui_timezone(), Some("America/Denver"));

        let blank: SettingsPage = serde_json::from_value(serde_json::json!({
            "items": [{ "key": "ui_timezone", "value": "   " }]
        }))
        .unwrap();
        assert_eq!(blank.ui_timezone(), None);
    }

    #[test]
    fn token_response_defaults_token_type() {
        let token: TokenResponse =
            serde_json::from_value(serde_json::json!({ "access_token": "abc" })).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.token_type, "bearer");
    }
}
