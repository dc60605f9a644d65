use std::collections::HashMap;
use std::env;
use std::path::Path;

use serde::Deserialize;

/// Environment variables the embedded chat widget's backend expects. Absence
/// is a startup warning, never a hard failure: the site still serves with the
/// widget degraded.
pub const CHAT_ENV_VARS: [&str; 4] = [
    "OPENAI_API_KEY",
    "OPENAI_ASSISTANT_ID",
    "CHATBOT_API_URL",
    "CHATBOT_API_KEY",
];

#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub port: u16,
    pub calendar_api_url: String,
    pub calendar_api_key: String,
    /// First path segment -> enabled. Sections absent from the map are open.
    pub routes: HashMap<String, bool>,
}

/// Partial override layer, deserialized from an optional JSON file. Every
/// field is optional so deployments only state what they change.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverride {
    port: Option<u16>,
    calendar_api_url: Option<String>,
    calendar_api_key: Option<String>,
    routes: Option<HashMap<String, bool>>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let routes = [
            ("services".to_string(), true),
            ("about".to_string(), true),
            ("contact".to_string(), true),
            ("appointments".to_string(), true),
            ("chatbot".to_string(), true),
            ("promo".to_string(), false),
        ]
        .into_iter()
        .collect();

        SiteConfig {
            port: 3000,
            calendar_api_url: "http://localhost:8080".to_string(),
            calendar_api_key: String::new(),
            routes,
        }
    }
}

impl SiteConfig {
    /// Resolves configuration in three tiers, later tiers winning:
    /// compiled defaults, then the JSON override file (path from
    /// SITE_CONFIG_OVERRIDE, default `site_config.json`), then env vars.
    pub fn load() -> Self {
        let mut config = SiteConfig::default();

        let override_path =
            env::var("SITE_CONFIG_OVERRIDE").unwrap_or_else(|_| "site_config.json".to_string());
        if Path::new(&override_path).exists() {
            match std::fs::read_to_string(&override_path) {
                Ok(raw) => match serde_json::from_str::<ConfigOverride>(&raw) {
                    Ok(layer) => config.apply(layer),
                    Err(e) => {
                        tracing::warn!(path = %override_path, error = %e, "ignoring malformed config override");
                    }
                },
                Err(e) => {
                    tracing::warn!(path = %override_path, error = %e, "ignoring unreadable config override");
                }
            }
        }

        if let Some(port) = env::var("PORT").ok().and_then(|v| v.parse().ok()) {
            config.port = port;
        }
        if let Ok(url) = env::var("CALENDAR_API_URL") {
            config.calendar_api_url = url;
        }
        if let Ok(key) = env::var("CALENDAR_API_KEY") {
            config.calendar_api_key = key;
        }

        config
    }

    fn apply(&mut self, layer: ConfigOverride) {
        if let Some(port) = layer.port {
            self.port = port;
        }
        if let Some(url) = layer.calendar_api_url {
            self.calendar_api_url = url;
        }
        if let Some(key) = layer.calendar_api_key {
            self.calendar_api_key = key;
        }
        if let Some(routes) = layer.routes {
            // Per-route merge: the layer flips individual sections without
            // discarding the default map.
            self.routes.extend(routes);
        }
    }
}

/// Startup preflight for the chat widget's backend variables.
pub fn warn_missing_chat_env() {
    for name in CHAT_ENV_VARS {
        if env::var(name).map(|v| v.is_empty()).unwrap_or(true) {
            tracing::warn!(var = name, "chat backend variable not set; chatbot will be degraded");
        }
    }
}
