//! Configuration loading and representation.
//!
//! Everything comes from environment variables. Unset variables fall back to
//! development defaults; set-but-malformed variables are an error, including
//! `APP_LOG_FORMAT`.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

use storefront_observability::LogFormat;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8001";
const DEV_JWT_SECRET: &str = "dev-secret";
/// One year.
pub const MAX_JWT_TTL_MINUTES: i64 = 525_600;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Language used for client-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" | "ja_jp" => Ok(Self::Ja),
            "en" | "en-us" | "en_us" | "en-gb" => Ok(Self::En),
            other => Err(format!("unsupported locale {other:?} (expected ja or en)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub locale: Locale,
    pub log_format: LogFormat,
    pub jwt_secret: String,
    pub jwt_ttl_minutes: i64,
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB.
    pub password_hash_memory_kib: u32,
    /// Argon2 iteration count.
    pub password_hash_iterations: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8001)),
            locale: Locale::Ja,
            log_format: LogFormat::Json,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            jwt_ttl_minutes: 60,
            password_min_length: 8,
            password_hash_memory_kib: 19 * 1024,
            password_hash_iterations: 2,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// True when `JWT_SECRET` was unset and the insecure dev key is in use.
    pub fn uses_dev_jwt_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the
    /// process environment).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.jwt_secret);

        let jwt_ttl_minutes = parse(&lookup, "JWT_TTL_MINUTES", defaults.jwt_ttl_minutes)?;
        if !(1..=MAX_JWT_TTL_MINUTES).contains(&jwt_ttl_minutes) {
            return Err(invalid(
                "JWT_TTL_MINUTES",
                jwt_ttl_minutes,
                &format!("must be between 1 and {MAX_JWT_TTL_MINUTES}"),
            ));
        }

        let password_hash_memory_kib =
            parse(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.password_hash_memory_kib)?;
        if password_hash_memory_kib < 8 {
            return Err(invalid("PASSWORD_HASH_MEMORY_KIB", password_hash_memory_kib, "must be at least 8"));
        }

        let password_hash_iterations =
            parse(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.password_hash_iterations)?;
        if password_hash_iterations == 0 {
            return Err(invalid("PASSWORD_HASH_ITERATIONS", password_hash_iterations, "must be at least 1"));
        }

        Ok(Self {
            bind_addr: parse(&lookup, "APP_BIND_ADDR", defaults.bind_addr)?,
            locale: parse(&lookup, "APP_LOCALE", defaults.locale)?,
            log_format: parse(&lookup, "APP_LOG_FORMAT", defaults.log_format)?,
            jwt_secret,
            jwt_ttl_minutes,
            password_min_length: parse(&lookup, "PASSWORD_MIN_LENGTH", defaults.password_min_length)?,
            password_hash_memory_kib,
            password_hash_iterations,
        })
    }
}

fn parse<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}

fn invalid(var: &'static str, value: impl ToString, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
