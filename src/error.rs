//! Error types.

use std::io;

use thiserror::Error;

/// An error that occurred while building the [`CultureCatalog`].
///
/// [`CultureCatalog`]: crate::culture::CultureCatalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No culture was supplied.
    #[error("the culture catalog must contain at least one culture")]
    Empty,

    /// A culture tag could not be parsed.
    #[error("invalid culture tag `{tag}`")]
    InvalidTag {
        /// The offending tag.
        tag: String,
    },

    /// The default culture is not one of the supported cultures.
    #[error("default culture `{0}` is not a supported culture")]
    DefaultNotSupported(String),
}

/// An error that occurred while loading localized resources.
#[derive(Debug, Error)]
pub enum ResourcesError {
    /// A culture tag could not be parsed.
    #[error("invalid culture tag `{0}`")]
    InvalidCulture(String),

    /// The FTL source could not be parsed.
    #[error("failed to parse resources for `{culture}`: {message}")]
    Parse {
        /// Culture the resource belongs to.
        culture: String,
        /// Parser diagnostics.
        message: String,
    },

    /// A message id was defined twice for the same culture.
    #[error("duplicate resource key in `{culture}`: {message}")]
    Duplicate {
        /// Culture the resource belongs to.
        culture: String,
        /// Bundle diagnostics.
        message: String,
    },

    /// Reading a resource file failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An error that occurred while reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `APP_ENVIRONMENT` names an unknown environment.
    #[error("unknown environment `{0}`, expected `Development` or `Production`")]
    UnknownEnvironment(String),
}

/// Top level error returned while starting the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Culture catalog error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Resource loading error.
    #[error(transparent)]
    Resources(#[from] ResourcesError),

    /// Template loading error.
    #[error("failed to load views: {0}")]
    Views(#[from] tera::Error),

    /// Server I/O error.
    #[error(transparent)]
    Io(#[from] io::Error),
}
