//! Async client for the Audiobookshelf HTTP API.
//!
//! [`ApiClient`] exposes one method per endpoint. Each method builds a path
//! from the route table, sends it through a [`Transport`] and decodes the
//! body with the shared mapper; non-success statuses fail before decoding.
//!
//! ```no_run
//! use std::time::Duration;
//! use shelf_client::ApiClient;
//!
//! # async fn run() -> shelf_client::Result<()> {
//! let client = ApiClient::connect("localhost:13378", Duration::from_secs(10))?;
//! let session = client.authorize("root", "password").await?;
//! for library in client.libraries(&session).await? {
//!     println!("{}", library.name().unwrap_or("<unnamed>"));
//! }
//! # Ok(())
//! # }
//! ```
#![allow(missing_docs)]

pub mod client;
pub mod error;
pub mod query;
pub mod session;
pub mod transport;

pub use client::ApiClient;
pub use error::{ClientError, Result};
pub use query::LibraryItemsQuery;
pub use session::Session;
pub use transport::{
    DEFAULT_TIMEOUT, HttpRequest, HttpResponse, HttpTransport, Transport, normalize_base_url,
};
