use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use garden_core::AppError;
use garden_domain::AllowedOrigins;
use ipnet::IpNet;
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeStoreConfig {
    Redis { url: String },
    Memory,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub like_store: LikeStoreConfig,
    pub content_dir: PathBuf,
    pub site_url: Option<String>,
    pub vercel_url: Option<String>,
    pub trusted_proxies: Vec<IpNet>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = match optional_env("API_PORT") {
            Some(value) => value
                .parse::<u16>()
                .map_err(|error| AppError::Validation(format!("invalid API_PORT: {error}")))?,
            None => 4321,
        };

        let like_store = match env::var("LIKES_STORE")
            .unwrap_or_else(|_| "redis".to_owned())
            .as_str()
        {
            "redis" => LikeStoreConfig::Redis {
                url: required_non_empty_env("REDIS_URL")?,
            },
            "memory" => LikeStoreConfig::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "LIKES_STORE must be either 'redis' or 'memory', got '{other}'"
                )));
            }
        };

        let content_dir = optional_env("CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("src/content/blog"));

        let trusted_proxies = optional_env("TRUSTED_PROXY_CIDRS")
            .map(|value| parse_trusted_proxies(&value))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            api_host,
            api_port,
            like_store,
            content_dir,
            site_url: optional_env("SITE_URL"),
            vercel_url: optional_env("VERCEL_URL"),
            trusted_proxies,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }

    /// Builds the vote origin allow-list from the deployment URLs.
    ///
    /// Unusable values are logged and skipped rather than failing startup.
    pub fn allowed_origins(&self) -> AllowedOrigins {
        let mut origins = AllowedOrigins::new();

        if let Some(site_url) = &self.site_url
            && let Err(error) = origins.insert_url(site_url)
        {
            warn!(%error, "invalid SITE_URL; origin enforcement may be disabled");
        }

        if let Some(vercel_url) = &self.vercel_url
            && let Err(error) = origins.insert_https_host(vercel_url)
        {
            warn!(%error, "invalid VERCEL_URL; preview origin not allowed");
        }

        origins
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_trusted_proxies(value: &str) -> Result<Vec<IpNet>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            IpNet::from_str(entry)
                .or_else(|_| IpAddr::from_str(entry).map(IpNet::from))
                .map_err(|error| {
                    AppError::Validation(format!(
                        "invalid TRUSTED_PROXY_CIDRS entry '{entry}': {error}"
                    ))
                })
        })
        .collect()
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
