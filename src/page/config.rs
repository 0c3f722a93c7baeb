/*!
 * Page Configuration
 *
 * Request limits applied by `PageManager` before any native call.
 */

use crate::core::limits::{MAX_PAGES_ENV, RESTRICTED_MAX_PAGES};
use crate::core::types::PageCount;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Page manager configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Largest page count a single request may ask for (default: unbounded)
    pub max_pages_per_request: Option<PageCount>,
}

impl PageConfig {
    /// Create default configuration with no request cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration capped at `RESTRICTED_MAX_PAGES` per request
    pub fn restricted() -> Self {
        Self {
            max_pages_per_request: Some(RESTRICTED_MAX_PAGES),
        }
    }

    /// Set the per-request page cap
    pub fn with_max_pages(mut self, max_pages: PageCount) -> Self {
        self.max_pages_per_request = Some(max_pages);
        self
    }

    /// Build configuration from the environment
    ///
    /// Environment variables:
    /// - ALLOCKIT_MAX_PAGES: per-request page cap (default: unbounded)
    pub fn from_env() -> Self {
        let max_pages_per_request = match std::env::var(MAX_PAGES_ENV) {
            Ok(raw) => match raw.trim().parse::<PageCount>() {
                Ok(max) => Some(max),
                Err(e) => {
                    warn!(value = %raw, error = %e, "Ignoring invalid {}", MAX_PAGES_ENV);
                    None
                }
            },
            Err(_) => None,
        };

        Self {
            max_pages_per_request,
        }
    }

    /// Whether a request for `count` pages is within the cap
    #[inline]
    pub fn allows(&self, count: PageCount) -> bool {
        self.max_pages_per_request.map_or(true, |max| count <= max)
    }
}
