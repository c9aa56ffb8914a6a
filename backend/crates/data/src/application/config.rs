//! Application Configuration
//!
//! Configuration for the Data application layer.

/// Data application configuration
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Page size when a list call does not name one
    pub default_page_size: u32,
    /// Upper bound of in-flight per-item calls of a batch operation
    pub batch_concurrency: usize,
    /// Returned by `api_url()`
    pub api_url: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            batch_concurrency: 10,
            api_url: String::new(),
        }
    }
}

impl DataConfig {
    /// Create config for development (the emulator prefers fewer parallel writes)
    pub fn development() -> Self {
        Self {
            batch_concurrency: 4,
            ..Default::default()
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_batch_concurrency(mut self, n: usize) -> Self {
        self.batch_concurrency = n.max(1);
        self
    }
}
