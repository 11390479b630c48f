//! Pool and delivery configuration structures.

use std::env;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, PoolLimits};
use crate::hooks::JSON_API_CONTENT_TYPE;

/// Pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Maximum concurrently executing tasks.
    pub max_in_flight: u32,
    /// Maximum queued tasks before rejection.
    pub max_queue_depth: usize,
    /// Upper bound on one task, in seconds.
    pub task_timeout_secs: u64,
    /// How long a task may wait in the queue, in seconds.
    #[serde(default)]
    pub task_ttl_secs: Option<u64>,
}

/// HTTP settings for delivery attempts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// Whole-request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
    /// `User-Agent` sent with every delivery.
    pub user_agent: String,
    /// `Content-Type` of the notification body.
    pub content_type: String,
}

/// Root configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HooksConfig {
    /// Pool running dispatches (registry read + fan-out).
    pub dispatch: PoolConfig,
    /// Pool running delivery attempts.
    pub delivery: PoolConfig,
    /// HTTP client settings.
    #[serde(default)]
    pub http: DeliveryConfig,
}

impl PoolConfig {
    /// Validate pool configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_in_flight == 0 {
            return Err("max_in_flight must be greater than 0".into());
        }
        if self.max_queue_depth == 0 {
            return Err("max_queue_depth must be greater than 0".into());
        }
        if self.task_timeout_secs == 0 {
            return Err("task_timeout_secs must be greater than 0".into());
        }
        if self.task_ttl_secs == Some(0) {
            return Err("task_ttl_secs must be greater than 0 when set".into());
        }
        Ok(())
    }

    /// Limits handed to the task pool.
    #[must_use]
    pub fn limits(&self) -> PoolLimits {
        PoolLimits {
            max_in_flight: self.max_in_flight,
            max_queue_depth: self.max_queue_depth,
            task_timeout: Duration::from_secs(self.task_timeout_secs),
            task_ttl: self.task_ttl_secs.map(Duration::from_secs),
        }
    }
}

impl DeliveryConfig {
    /// Validate delivery settings.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.request_timeout_ms == 0 {
            return Err("request_timeout_ms must be greater than 0".into());
        }
        if self.connect_timeout_ms == 0 {
            return Err("connect_timeout_ms must be greater than 0".into());
        }
        if self.content_type.is_empty() {
            return Err("content_type must not be empty".into());
        }
        Ok(())
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 5_000,
            connect_timeout_ms: 2_000,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            content_type: JSON_API_CONTENT_TYPE.to_string(),
        }
    }
}

impl Default for HooksConfig {
    fn default() -> Self {
        let workers = u32::try_from(num_cpus::get()).unwrap_or(1).max(1);
        Self {
            dispatch: PoolConfig {
                max_in_flight: workers,
                max_queue_depth: 1_024,
                task_timeout_secs: 30,
                task_ttl_secs: None,
            },
            delivery: PoolConfig {
                max_in_flight: workers * 8,
                max_queue_depth: 10_000,
                task_timeout_secs: 10,
                task_ttl_secs: Some(300),
            },
            http: DeliveryConfig::default(),
        }
    }
}

impl HooksConfig {
    /// Validate both pools and the HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns a description naming the offending section.
    pub fn validate(&self) -> Result<(), String> {
        self.dispatch
            .validate()
            .map_err(|e| format!("dispatch pool invalid: {e}"))?;
        self.delivery
            .validate()
            .map_err(|e| format!("delivery pool invalid: {e}"))?;
        self.http.validate().map_err(|e| format!("http invalid: {e}"))?;
        if u128::from(self.http.request_timeout_ms) > u128::from(self.delivery.task_timeout_secs) * 1_000 {
            return Err("http.request_timeout_ms must not exceed delivery.task_timeout_secs".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation message.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults overridden by `HOOKS_*` environment variables.
    ///
    /// A `.env` file in the working directory is loaded first if present.
    /// Recognised keys: `HOOKS_DISPATCH_MAX_IN_FLIGHT`,
    /// `HOOKS_DISPATCH_MAX_QUEUE_DEPTH`, `HOOKS_DELIVERY_MAX_IN_FLIGHT`,
    /// `HOOKS_DELIVERY_MAX_QUEUE_DEPTH`, `HOOKS_DELIVERY_TASK_TIMEOUT_SECS`,
    /// `HOOKS_DELIVERY_TASK_TTL_SECS`, `HOOKS_HTTP_REQUEST_TIMEOUT_MS`,
    /// `HOOKS_HTTP_CONNECT_TIMEOUT_MS`, `HOOKS_HTTP_USER_AGENT`.
    ///
    /// # Errors
    ///
    /// Fails on unparsable values or an invalid resulting configuration.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();

        override_from_env(&mut cfg.dispatch.max_in_flight, "HOOKS_DISPATCH_MAX_IN_FLIGHT")?;
        override_from_env(&mut cfg.dispatch.max_queue_depth, "HOOKS_DISPATCH_MAX_QUEUE_DEPTH")?;
        override_from_env(&mut cfg.delivery.max_in_flight, "HOOKS_DELIVERY_MAX_IN_FLIGHT")?;
        override_from_env(&mut cfg.delivery.max_queue_depth, "HOOKS_DELIVERY_MAX_QUEUE_DEPTH")?;
        override_from_env(&mut cfg.delivery.task_timeout_secs, "HOOKS_DELIVERY_TASK_TIMEOUT_SECS")?;
        if let Ok(raw) = env::var("HOOKS_DELIVERY_TASK_TTL_SECS") {
            let ttl: u64 = raw
                .parse()
                .with_context(|| format!("HOOKS_DELIVERY_TASK_TTL_SECS=`{raw}`"))?;
            cfg.delivery.task_ttl_secs = Some(ttl);
        }
        override_from_env(&mut cfg.http.request_timeout_ms, "HOOKS_HTTP_REQUEST_TIMEOUT_MS")?;
        override_from_env(&mut cfg.http.connect_timeout_ms, "HOOKS_HTTP_CONNECT_TIMEOUT_MS")?;
        if let Ok(agent) = env::var("HOOKS_HTTP_USER_AGENT") {
            cfg.http.user_agent = agent;
        }

        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

fn override_from_env<T>(slot: &mut T, key: &str) -> AppResult<()>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    if let Ok(raw) = env::var(key) {
        *slot = raw.parse().with_context(|| format!("{key}=`{raw}`"))?;
    }
    Ok(())
}
