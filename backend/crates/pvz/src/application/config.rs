//! Application Configuration
//!
//! Configuration for the PVZ application layer.

/// Listing defaults and limits
#[derive(Debug, Clone)]
pub struct PvzConfig {
    pub default_page: u32,
    pub default_limit: u32,
    /// Largest accepted `limit`
    pub max_limit: u32,
}

impl Default for PvzConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_limit: 10,
            max_limit: 30,
        }
    }
}
