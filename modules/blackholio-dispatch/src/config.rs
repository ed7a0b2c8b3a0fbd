use std::env;

use anyhow::{bail, Context, Result};
use tracing::info;

const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Dispatch configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Capacity of the transport → dispatch loop channel.
    pub queue_capacity: usize,
    /// Log events nobody handled at `warn` (otherwise `debug`).
    pub warn_on_unhandled: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            warn_on_unhandled: true,
        }
    }
}

impl DispatchConfig {
    /// Load from `REDUCER_DISPATCH_QUEUE_CAPACITY` and
    /// `REDUCER_DISPATCH_WARN_UNHANDLED`, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let queue_capacity = match lookup("REDUCER_DISPATCH_QUEUE_CAPACITY") {
            Some(raw) => raw.trim().parse::<usize>().with_context(|| {
                format!("REDUCER_DISPATCH_QUEUE_CAPACITY must be a number, got '{raw}'")
            })?,
            None => defaults.queue_capacity,
        };
        if queue_capacity == 0 {
            bail!("REDUCER_DISPATCH_QUEUE_CAPACITY must be greater than zero");
        }

        let warn_on_unhandled = match lookup("REDUCER_DISPATCH_WARN_UNHANDLED") {
            Some(raw) => parse_flag(&raw).with_context(|| {
                format!("REDUCER_DISPATCH_WARN_UNHANDLED must be a boolean, got '{raw}'")
            })?,
            None => defaults.warn_on_unhandled,
        };

        Ok(Self {
            queue_capacity,
            warn_on_unhandled,
        })
    }

    pub fn log(&self) {
        info!(
            queue_capacity = self.queue_capacity,
            warn_on_unhandled = self.warn_on_unhandled,
            "Dispatch config loaded"
        );
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
