//! Configuration for shelf clients.
//!
//! Settings are layered: environment variables override a `.env` file,
//! which overrides `shelf.toml`. See [`ConfigLoader`] for the lookup order
//! of the configuration file itself.
#![allow(missing_docs)]

pub mod error;
pub mod loader;
pub mod logging;
pub mod models;
pub mod sources;
pub mod validation;

pub use error::ConfigLoadError;
pub use loader::{ConfigLoad, ConfigLoader, ConfigLoaderOptions};
pub use logging::init_tracing;
pub use models::{ClientConfig, ConfigMetadata, Credentials};
pub use validation::{ConfigWarning, ConfigWarnings};
