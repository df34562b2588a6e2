//! Configuration for list-state controllers and list views.
//!
//! A [`ListConfig`] carries the sizing knobs every list view shares: how many
//! items make up a page, how many page buttons the page window shows and
//! whether the window collapses far-away pages into gaps.
//!
//! Configs can be built in code with the `with_*` builder methods or
//! deserialized from any serde format. Missing fields fall back to the
//! defaults.
//!
//! # Examples
//!
//! ```rust
//! use bubbletea_paged_list::config::ListConfig;
//!
//! let config = ListConfig::new().with_base_size(20).with_window_size(5);
//! assert_eq!(config.base_size, 20);
//! assert_eq!(config.window_size, 5);
//!
//! // Values below 1 are clamped to 1
//! let clamped = ListConfig::new().with_base_size(0);
//! assert_eq!(clamped.base_size, 1);
//! ```

use serde::Deserialize;
use thiserror::Error;

/// Number of items fetched per page when nothing else is configured.
pub const DEFAULT_BASE_SIZE: usize = 10;

/// Number of page buttons shown in the page window by default.
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Errors reported by [`ListConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A page must hold at least one item.
    #[error("base_size must be greater than zero")]
    ZeroBaseSize,
    /// The page window must show at least one page.
    #[error("window_size must be greater than zero")]
    ZeroWindowSize,
}

/// Sizing configuration for a paged list.
///
/// # Examples
///
/// ```rust
/// use bubbletea_paged_list::config::ListConfig;
///
/// let config: ListConfig = serde_json::from_str(r#"{ "base_size": 25 }"#).unwrap();
/// assert_eq!(config.base_size, 25);
/// assert_eq!(config.window_size, 3); // default
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Items per page. Also the size of the one-shot "show more" increment.
    pub base_size: usize,
    /// Number of contiguous page numbers shown in the page window.
    pub window_size: usize,
    /// Render the page window with first/last pages and gap markers.
    pub gapped_window: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            base_size: DEFAULT_BASE_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            gapped_window: false,
        }
    }
}

impl ListConfig {
    /// Creates a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size (builder pattern). Values below 1 are clamped to 1.
    pub fn with_base_size(mut self, base_size: usize) -> Self {
        self.base_size = base_size.max(1);
        self
    }

    /// Sets the page window size (builder pattern). Values below 1 are clamped to 1.
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size.max(1);
        self
    }

    /// Enables or disables the gapped page window (builder pattern).
    pub fn with_gapped_window(mut self, gapped: bool) -> Self {
        self.gapped_window = gapped;
        self
    }

    /// Checks a config obtained from deserialization.
    ///
    /// Builder methods already clamp their inputs; deserialized configs are
    /// taken as written and may carry zeros.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroBaseSize`] or [`ConfigError::ZeroWindowSize`]
    /// when the respective field is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_size == 0 {
            return Err(ConfigError::ZeroBaseSize);
        }
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        Ok(())
    }
}
