//! Embedding configuration

use serde::{Deserialize, Serialize};

use crate::{CoreError, TagName};

pub const ENV_SCRIPT_TYPE: &str = "SCRIPT_EMBED_TYPE";
pub const ENV_FRESH_PREFIX: &str = "SCRIPT_EMBED_FRESH_PREFIX";
pub const ENV_CONTAINER_TAG: &str = "SCRIPT_EMBED_CONTAINER_TAG";
pub const ENV_COUNTER_START: &str = "SCRIPT_EMBED_COUNTER_START";

/// Largest accepted `counter_start`; leaves 2^63 labels before the counter
/// could run out.
pub const MAX_COUNTER_START: u64 = u64::MAX / 2;

/// Settings shared by every rendering context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// `type` attribute of emitted `<script>` elements
    pub script_type: String,
    /// Stem used when naming hygienic locals
    pub fresh_prefix: String,
    /// Element created to parse markup back into DOM nodes
    pub container_tag: String,
    /// First identifier handed out by a new context
    pub counter_start: u64,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            script_type: "text/javascript".to_string(),
            fresh_prefix: "jsid".to_string(),
            container_tag: "div".to_string(),
            counter_start: 0,
        }
    }
}

impl EmbedConfig {
    /// Load from `SCRIPT_EMBED_*` environment variables, falling back to
    /// the defaults for anything unset.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let counter_start = match lookup(ENV_COUNTER_START) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                CoreError::Config(format!("{} must be a non-negative integer: {}", ENV_COUNTER_START, e))
            })?,
            None => defaults.counter_start,
        };

        let config = Self {
            script_type: lookup(ENV_SCRIPT_TYPE).unwrap_or(defaults.script_type),
            fresh_prefix: lookup(ENV_FRESH_PREFIX).unwrap_or(defaults.fresh_prefix),
            container_tag: lookup(ENV_CONTAINER_TAG).unwrap_or(defaults.container_tag),
            counter_start,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.script_type.trim().is_empty() {
            return Err(CoreError::Config("script type cannot be empty".to_string()));
        }

        let mut prefix = self.fresh_prefix.chars();
        let prefix_ok = match prefix.next() {
            Some(first) => {
                (first.is_ascii_alphabetic() || first == '_' || first == '$')
                    && prefix.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
            }
            None => false,
        };
        if !prefix_ok {
            return Err(CoreError::Config(format!(
                "fresh prefix {:?} is not a valid identifier stem",
                self.fresh_prefix
            )));
        }

        if self.counter_start > MAX_COUNTER_START {
            return Err(CoreError::Config(format!(
                "counter start {} exceeds {}",
                self.counter_start, MAX_COUNTER_START
            )));
        }

        TagName::new(self.container_tag.as_str())
            .map_err(|e| CoreError::Config(format!("container tag: {}", e)))?;

        Ok(())
    }
}
