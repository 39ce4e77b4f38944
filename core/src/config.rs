//! Client configuration loaded from environment variables.

use std::env;

use crate::types::FieldSet;

pub const BASE_URL_VAR: &str = "BLOG_API_BASE_URL";
pub const FIELD_SET_VAR: &str = "BLOG_FIELD_SET";

/// Settings the pages need to talk to the posts API.
///
/// A missing `base_url` is a valid configuration: the client then refuses
/// to build requests and every page shows a configuration error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub field_set: FieldSet,
}

impl ApiConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup(BASE_URL_VAR)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let field_set = match lookup(FIELD_SET_VAR) {
            None => FieldSet::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                tracing::warn!(%err, "ignoring {FIELD_SET_VAR}, using the extended field set");
                FieldSet::default()
            }),
        };

        Self {
            base_url,
            field_set,
        }
    }
}
