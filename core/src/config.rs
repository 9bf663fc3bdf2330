use std::env;

use crate::client::DEFAULT_USER_ID;
use crate::query::DEFAULT_READ_RETRIES;

// Runtime settings, read from the environment with defaults.

pub const DEFAULT_API_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub page_limit: u32,
    pub read_retries: u32,
    pub user_id: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_limit: DEFAULT_PAGE_LIMIT,
            read_retries: DEFAULT_READ_RETRIES,
            user_id: DEFAULT_USER_ID,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            api_url: lookup("TODO_API_URL").unwrap_or(defaults.api_url),
            page_limit: lookup("TODO_PAGE_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.page_limit),
            read_retries: lookup("TODO_READ_RETRIES")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.read_retries),
            user_id: lookup("TODO_USER_ID")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.user_id),
        }
    }
}
