use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::extraction::DEFAULT_MAX_UPLOAD_BYTES;

/// Which `KeyValueStore` backend persists records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Redis,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            other => bail!("Unknown STORAGE_BACKEND '{other}' (expected memory, redis or postgres)"),
        }
    }
}

/// Object storage for retained uploads. Present only when `S3_BUCKET` is set.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub endpoint: Option<String>,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Application configuration loaded from environment variables.
/// Startup fails if the selected backend's connection URL is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub storage_backend: StorageBackend,
    pub redis_url: Option<String>,
    pub database_url: Option<String>,
    pub storage_key_prefix: String,
    pub s3: Option<S3Config>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let storage_backend: StorageBackend = var("STORAGE_BACKEND")
            .unwrap_or_else(|| "memory".to_string())
            .parse()?;

        let redis_url = var("REDIS_URL");
        let database_url = var("DATABASE_URL");
        match storage_backend {
            StorageBackend::Redis if redis_url.is_none() => {
                bail!("Required environment variable 'REDIS_URL' is not set")
            }
            StorageBackend::Postgres if database_url.is_none() => {
                bail!("Required environment variable 'DATABASE_URL' is not set")
            }
            _ => {}
        }

        let s3 = var("S3_BUCKET").map(|bucket| S3Config {
            bucket,
            endpoint: var("S3_ENDPOINT"),
            region: var("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            access_key_id: var("AWS_ACCESS_KEY_ID"),
            secret_access_key: var("AWS_SECRET_ACCESS_KEY"),
        });

        let max_upload_bytes = match var("MAX_UPLOAD_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };
        if max_upload_bytes == 0 {
            return Err(anyhow!("MAX_UPLOAD_BYTES must be greater than zero"));
        }

        Ok(Config {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            storage_backend,
            redis_url,
            database_url,
            storage_key_prefix: var("STORAGE_KEY_PREFIX").unwrap_or_else(|| "resumatch:".to_string()),
            s3,
            max_upload_bytes,
        })
    }
}
