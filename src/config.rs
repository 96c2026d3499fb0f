use reqwest::Url;
use std::env;
use std::time::Duration;

use crate::error::{RelayError, Result};

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Which change entries of a push get a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangePolicy {
    /// Only `changes[0]`; the rest of the push is ignored.
    FirstOnly,
    /// One message per change entry, in payload order.
    EachChange,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub discord_webhook_url: Url,
    pub bind_address: String,
    pub inbound_timeout: Duration,
    pub outbound_timeout: Duration,
    pub change_policy: ChangePolicy,
}

impl RelayConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("DISCORD_WEBHOOK_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(RelayError::ConfigurationMissing("DISCORD_WEBHOOK_URL"))?;

        let discord_webhook_url =
            Url::parse(&raw_url).map_err(|e| RelayError::InvalidConfig {
                key: "DISCORD_WEBHOOK_URL",
                reason: e.to_string(),
            })?;

        if !matches!(discord_webhook_url.scheme(), "http" | "https") {
            return Err(RelayError::InvalidConfig {
                key: "DISCORD_WEBHOOK_URL",
                reason: format!("unsupported scheme {:?}", discord_webhook_url.scheme()),
            });
        }

        let bind_address = lookup("BIND_ADDRESS")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        Ok(Self {
            discord_webhook_url,
            bind_address,
            inbound_timeout: parse_secs(&lookup, "INBOUND_TIMEOUT_SECS")?,
            outbound_timeout: parse_secs(&lookup, "OUTBOUND_TIMEOUT_SECS")?,
            change_policy: if parse_flag(&lookup, "NOTIFY_EACH_CHANGE")? {
                ChangePolicy::EachChange
            } else {
                ChangePolicy::FirstOnly
            },
        })
    }
}

fn parse_secs<F>(lookup: &F, key: &'static str) -> Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(RelayError::InvalidConfig {
            key,
            reason: "timeout must be at least one second".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(RelayError::InvalidConfig {
            key,
            reason: format!("{:?}: {}", raw, e),
        }),
    }
}

fn parse_flag<F>(lookup: &F, key: &'static str) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(RelayError::InvalidConfig {
            key,
            reason: format!("expected true or false, got {:?}", v),
        }),
    }
}
