use std::error::Error as StdError;

/// Crate-wide result type for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed errors shared across the plugin contract.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No factory is registered under the requested name.
    #[error("unknown output plugin: {name}")]
    UnknownPlugin { name: String },

    /// The plugin rejected its configuration.
    #[error("invalid configuration for {plugin}: {source}")]
    InvalidConfig {
        plugin: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// The plugin failed while running.
    #[error("output plugin {plugin} failed: {source}")]
    Plugin {
        plugin: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl Error {
    #[must_use]
    pub fn unknown_plugin(name: impl std::fmt::Display) -> Self {
        Self::UnknownPlugin {
            name: name.to_string(),
        }
    }

    #[must_use]
    pub fn invalid_config(
        plugin: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::InvalidConfig {
            plugin: plugin.into(),
            source: Box::new(source),
        }
    }

    #[must_use]
    pub fn plugin(
        plugin: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Plugin {
            plugin: plugin.into(),
            source: Box::new(source),
        }
    }
}
