//! Search limit configuration.

use crate::params::ExtraQueryParams;
use serde::Deserialize;
use warden_query::{Error, Result};

/// Limits applied to caller-supplied paging parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size applied when the caller does not ask for one.
    pub default_size: u64,
    /// Upper bound on caller-requested page size.
    pub max_size: u64,
    /// Upper bound on the paging offset.
    pub max_from: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_size: 10,
            max_size: 1000,
            max_from: 10_000,
        }
    }
}

impl SearchConfig {
    pub(crate) fn validate_limits(&self, params: &ExtraQueryParams) -> Result<()> {
        if let Some(size) = params.size {
            if size > self.max_size {
                return Err(Error::Validation(format!(
                    "size {} exceeds maximum {}",
                    size, self.max_size
                )));
            }
        }
        if let Some(from) = params.from {
            if from > self.max_from {
                return Err(Error::Validation(format!(
                    "from {} exceeds maximum {}",
                    from, self.max_from
                )));
            }
        }
        Ok(())
    }
}
