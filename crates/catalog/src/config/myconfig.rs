use anyhow::{Context, Result, anyhow};
use std::str::FromStr;

/// Knobs that change request semantics rather than infrastructure.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Look the warehouse up inside the creation transaction and reject
    /// unknown ids with a validation error.
    pub verify_warehouse: bool,
    pub sales_window_days: i32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            verify_warehouse: false,
            sales_window_days: 30,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_min_conn: u32,
    pub db_max_conn: u32,
    pub otel_endpoint: String,
    pub is_dev: bool,
    pub enable_file_log: bool,
    pub service: ServiceConfig,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = required(&lookup, "DATABASE_URL")?;
        let run_migrations = parse_bool("RUN_MIGRATIONS", &required(&lookup, "RUN_MIGRATIONS")?)?;

        let port = required(&lookup, "PORT")?
            .parse::<u16>()
            .context("PORT must be a valid u16 integer")?;

        let db_min_conn = optional(&lookup, "DB_MIN_CONN", 1u32)?;
        let db_max_conn = optional(&lookup, "DB_MAX_CONN", 10u32)?;
        if db_min_conn > db_max_conn {
            return Err(anyhow!(
                "DB_MIN_CONN ({db_min_conn}) must not exceed DB_MAX_CONN ({db_max_conn})"
            ));
        }

        let otel_endpoint = lookup("OTEL_ENDPOINT")
            .unwrap_or_else(|| "http://otel-collector:4317".to_string());

        let is_dev = lookup("DEV_MODE").is_some_and(|v| v == "true" || v == "1");
        let enable_file_log = lookup("ENABLE_FILE_LOG").is_some_and(|v| v == "true");

        let verify_warehouse = match lookup("VERIFY_WAREHOUSE") {
            Some(value) => parse_bool("VERIFY_WAREHOUSE", &value)?,
            None => false,
        };

        let sales_window_days = optional(&lookup, "LOW_STOCK_SALES_WINDOW_DAYS", 30i32)?;
        if sales_window_days <= 0 {
            return Err(anyhow!(
                "LOW_STOCK_SALES_WINDOW_DAYS must be positive, got {sales_window_days}"
            ));
        }

        Ok(Self {
            database_url,
            run_migrations,
            port,
            db_min_conn,
            db_max_conn,
            otel_endpoint,
            is_dev,
            enable_file_log,
            service: ServiceConfig {
                verify_warehouse,
                sales_window_days,
            },
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).with_context(|| format!("Missing environment variable: {key}"))
}

fn optional<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| anyhow!("{key} has an invalid value: '{raw}'")),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(anyhow!("{key} must be 'true' or 'false', got '{other}'")),
    }
}
