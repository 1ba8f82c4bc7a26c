use anyhow::anyhow;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub provider_url: String,
    pub service_role_key: String,
    pub anon_key: String,
    pub storage_bucket: String,
    pub signed_url_expires_secs: u64,
    pub port: u16,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let provider_url = env::var("PROVIDER_URL")
            .map_err(|_| anyhow!("PROVIDER_URL is required (base URL of the managed provider)"))?;
        let provider_url = provider_url.trim_end_matches('/').to_string();

        let service_role_key = env::var("SERVICE_ROLE_KEY")
            .map_err(|_| anyhow!("SERVICE_ROLE_KEY is required for admin provider access"))?;

        let anon_key = env::var("ANON_KEY").unwrap_or_default();

        let storage_bucket =
            env::var("STORAGE_BUCKET").unwrap_or_else(|_| "resource-files".to_string());

        let signed_url_expires_secs = env::var("SIGNED_URL_EXPIRES_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        Ok(Config {
            provider_url,
            service_role_key,
            anon_key,
            storage_bucket,
            signed_url_expires_secs,
            port,
        })
    }
}
