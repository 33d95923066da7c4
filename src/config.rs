use anyhow::{Context, Result};
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
#[allow(dead_code)] // Postgres part fields back the DATABASE_URL fallback only
pub struct Config {
    // Server
    pub port: u16,
    pub rust_log: String,

    // Database
    pub database_url: String,
    pub postgres_host: String,
    pub postgres_port: u16,
    pub postgres_user: String,
    pub postgres_password: String,
    pub postgres_db: String,

    // JWT
    pub jwt_secret: String,

    // CORS
    pub cors_allowed_origins: String,

    // Rate Limiting
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let database_url = get_env("DATABASE_URL").unwrap_or_else(|_| {
            format!(
                "postgresql://{}:{}@{}:{}/{}",
                get_env_or_default("POSTGRES_USER", "postgres"),
                get_env_or_default("POSTGRES_PASSWORD", ""),
                get_env_or_default("POSTGRES_HOST", "localhost"),
                get_env_or_default("POSTGRES_PORT", "5432"),
                get_env_or_default("POSTGRES_DB", "tackle")
            )
        });

        Ok(Self {
            // Server
            port: get_env_or_default("PORT", "8080").parse().unwrap_or(8080),
            rust_log: get_env_or_default("RUST_LOG", "info"),

            // Database
            database_url,
            postgres_host: get_env_or_default("POSTGRES_HOST", "localhost"),
            postgres_port: get_env_or_default("POSTGRES_PORT", "5432")
                .parse()
                .unwrap_or(5432),
            postgres_user: get_env_or_default("POSTGRES_USER", "postgres"),
            postgres_password: get_env_or_default("POSTGRES_PASSWORD", ""),
            postgres_db: get_env_or_default("POSTGRES_DB", "tackle"),

            // JWT
            jwt_secret: get_env("JWT_SECRET").context("JWT_SECRET is required")?,

            // CORS
            cors_allowed_origins: get_env_or_default(
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:3000,http://localhost:8080",
            ),

            // Rate Limiting
            rate_limit_per_minute: get_env_or_default("RATE_LIMIT_PER_MINUTE", "100")
                .parse()
                .unwrap_or(100),
        })
    }
}

fn get_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing environment variable: {}", key))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
