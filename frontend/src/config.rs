use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub provider_url: Option<String>,
    pub anon_key: Option<String>,
    pub functions_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub provider_url: String,
    pub anon_key: String,
    pub functions_url: String,
}

static SETTINGS: OnceLock<ProviderSettings> = OnceLock::new();

fn get_global_string(object: &js_sys::Object, key: &str) -> Option<String> {
    js_sys::Reflect::get(object, &key.into())
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .and_then(|v| v.as_string())
}

fn snapshot_from_globals() -> Option<RuntimeConfig> {
    // Expect optional global object:
    // window.__RESOURCE_HUB_ENV = { PROVIDER_URL: "...", ANON_KEY: "...", FUNCTIONS_URL: "..." }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &"__RESOURCE_HUB_ENV".into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    Some(RuntimeConfig {
        provider_url: get_global_string(&obj, "PROVIDER_URL")
            .or_else(|| get_global_string(&obj, "provider_url")),
        anon_key: get_global_string(&obj, "ANON_KEY")
            .or_else(|| get_global_string(&obj, "anon_key")),
        functions_url: get_global_string(&obj, "FUNCTIONS_URL")
            .or_else(|| get_global_string(&obj, "functions_url")),
    })
}

async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let resp = reqwest::get("./config.json").await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

fn settle(config: RuntimeConfig) -> ProviderSettings {
    let provider_url = config
        .provider_url
        .unwrap_or_else(|| "http://localhost:54321".to_string());
    let provider_url = provider_url.trim_end_matches('/').to_string();
    let functions_url = config
        .functions_url
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| provider_url.clone());
    let settings = ProviderSettings {
        provider_url,
        anon_key: config.anon_key.unwrap_or_default(),
        functions_url,
    };
    let _ = SETTINGS.set(settings.clone());
    settings
}

pub async fn await_settings() -> ProviderSettings {
    if let Some(cached) = SETTINGS.get() {
        return cached.clone();
    }
    if let Some(from_globals) = snapshot_from_globals() {
        return settle(from_globals);
    }
    if let Some(cfg) = fetch_runtime_config().await {
        return settle(cfg);
    }
    settle(RuntimeConfig::default())
}

pub async fn init() {
    let _ = await_settings().await;
}
