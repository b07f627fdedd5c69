//! Origin allow-list for state-changing requests.

use std::collections::BTreeSet;

use garden_core::{AppError, AppResult};
use url::Url;

/// Set of web origins (`scheme://host[:port]`) allowed to cast votes.
///
/// An empty set disables enforcement entirely, which keeps local and
/// unconfigured deployments usable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedOrigins {
    origins: BTreeSet<String>,
}

impl AllowedOrigins {
    /// Creates an empty allow-list that permits every request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the origin of a full URL such as `https://example.com/blog`.
    pub fn insert_url(&mut self, value: &str) -> AppResult<()> {
        let origin = origin_of(value.trim()).ok_or_else(|| {
            AppError::Validation(format!("'{value}' is not a valid origin url"))
        })?;
        self.origins.insert(origin);
        Ok(())
    }

    /// Adds `https://<host>` for a bare deployment host name.
    pub fn insert_https_host(&mut self, host: &str) -> AppResult<()> {
        self.insert_url(&format!("https://{}", host.trim()))
    }

    /// Returns whether any origin is configured.
    #[must_use]
    pub fn is_enforced(&self) -> bool {
        !self.origins.is_empty()
    }

    /// Returns the configured origins in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.origins.iter().map(String::as_str)
    }

    /// Checks the `Origin` (or `Referer`) value of a request.
    ///
    /// Missing or unparseable values are rejected whenever enforcement is on.
    #[must_use]
    pub fn permits(&self, header_value: Option<&str>) -> bool {
        if !self.is_enforced() {
            return true;
        }

        header_value
            .and_then(origin_of)
            .is_some_and(|origin| self.origins.contains(&origin))
    }
}

fn origin_of(value: &str) -> Option<String> {
    let url = Url::parse(value).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}
