use crate::gateway::{RazorpayConfig, RazorpayCredentials};
use anyhow::{Context, Result, anyhow};
use shared::config::RedisConfig;
use std::{str::FromStr, time::Duration};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub redis: RedisConfig,
    pub session_ttl_minutes: i64,
    pub razorpay: RazorpayConfig,
    pub otel_endpoint: String,
    pub dev_mode: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let required = |key: &str| var(key).context(format!("Missing environment variable: {key}"));

        fn parsed<T>(value: Option<String>, key: &str, default: T) -> Result<T>
        where
            T: FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            match value {
                Some(raw) => raw
                    .trim()
                    .parse::<T>()
                    .with_context(|| format!("Unable to parse {key} from '{raw}'")),
                None => Ok(default),
            }
        }

        let flag = |key: &str| {
            var(key)
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false)
        };

        let database_url = required("DATABASE_URL")?;
        let jwt_secret = required("JWT_SECRET")?;

        let run_migrations = match var("RUN_MIGRATIONS").as_deref() {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(anyhow!(
                    "RUN_MIGRATIONS must be 'true' or 'false', got '{}'",
                    other
                ));
            }
        };

        let port = parsed(var("PORT"), "PORT", 5000u16)?;
        let db_max_conn = parsed(var("DB_MAX_CONNECTION"), "DB_MAX_CONNECTION", 5u32)?;
        let db_min_conn = parsed(var("DB_MIN_CONNECTION"), "DB_MIN_CONNECTION", 1u32)?;

        let redis = RedisConfig::new(
            var("REDIS_HOST").unwrap_or_else(|| "redis".into()),
            parsed(var("REDIS_PORT"), "REDIS_PORT", 6379u16)?,
            parsed(var("REDIS_DB"), "REDIS_DB", 0u8)?,
            var("REDIS_PASSWORD"),
        );

        let session_ttl_minutes = parsed(var("SESSION_TTL_MINUTES"), "SESSION_TTL_MINUTES", 30i64)?;

        let credentials = match (var("RAZORPAY_KEY_ID"), var("RAZORPAY_KEY_SECRET")) {
            (Some(key_id), Some(key_secret)) => Some(RazorpayCredentials { key_id, key_secret }),
            _ => None,
        };

        let signature_secret = var("RAZORPAY_SIGNATURE_SECRET").or_else(|| {
            credentials
                .as_ref()
                .map(|creds| creds.key_secret.clone())
        });

        let razorpay = RazorpayConfig {
            credentials,
            signature_secret,
            api_base: var("RAZORPAY_API_BASE")
                .unwrap_or_else(|| "https://api.razorpay.com/v1".into()),
            currency: var("PAYMENT_CURRENCY").unwrap_or_else(|| "INR".into()),
            timeout: Duration::from_secs(parsed(
                var("PAYMENT_GATEWAY_TIMEOUT_SECS"),
                "PAYMENT_GATEWAY_TIMEOUT_SECS",
                10u64,
            )?),
        };

        Ok(Self {
            database_url,
            jwt_secret,
            run_migrations,
            port,
            db_max_conn,
            db_min_conn,
            redis,
            session_ttl_minutes,
            razorpay,
            otel_endpoint: var("OTEL_ENDPOINT")
                .unwrap_or_else(|| "http://otel-collector:4317".into()),
            dev_mode: flag("DEV_MODE"),
            enable_file_log: flag("ENABLE_FILE_LOG"),
        })
    }
}
