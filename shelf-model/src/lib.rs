//! Audiobookshelf data models.
//!
//! Every type here is declared with [`shelf_core::api_object!`], so decoding
//! and encoding go through the shared mapping engine. Accessors return
//! `None` for fields the server did not send or sent as `null`.
#![allow(missing_docs)]

pub mod author;
pub mod enums;
pub mod library;
pub mod prelude;
pub mod requests;
pub mod responses;
pub mod session;
pub mod stats;
pub mod user;

pub use author::Author;
pub use enums::{CoverAspectRatio, LibraryInclude, MediaType, UserType};
pub use library::{Library, LibraryFolder, LibrarySettings};
pub use requests::{NewLibrary, NewLibraryFolder, NewLibrarySettings};
pub use responses::{AuthorList, LibraryDetails, LibraryList, LoginResponse};
pub use session::{LibraryItemsPage, Page, PlaybackSession, SessionsPage};
pub use stats::YearStats;
pub use user::{AudioBookmark, MediaProgressItem, Permissions, User};
