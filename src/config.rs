//! Configuration management for reqlog

use crate::decode::DEFAULT_CHARSET;
use serde::Deserialize;
use std::num::NonZeroUsize;

/// Number of formatted reports kept for reuse
pub const DEFAULT_CACHE_CAPACITY: usize = 2;

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Reports memoized per logger; zero is treated as one
    pub cache_capacity: usize,
    /// Charset tried when a body does not declare one
    pub default_charset: String,
    /// Emit `<details>` HTML fragments instead of plain text
    pub html: bool,
}

impl LoggerConfig {
    pub fn cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.cache_capacity).unwrap_or(NonZeroUsize::MIN)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            default_charset: DEFAULT_CHARSET.to_string(),
            html: true,
        }
    }
}
