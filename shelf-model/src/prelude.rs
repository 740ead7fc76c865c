//! Glob-importable set of the model types and the mapper entry points.

pub use crate::author::Author;
pub use crate::enums::{CoverAspectRatio, LibraryInclude, MediaType, UserType};
pub use crate::library::{Library, LibraryFolder, LibrarySettings};
pub use crate::requests::{NewLibrary, NewLibraryFolder, NewLibrarySettings};
pub use crate::responses::{AuthorList, LibraryDetails, LibraryList, LoginResponse};
pub use crate::session::{LibraryItemsPage, Page, PlaybackSession, SessionsPage};
pub use crate::stats::YearStats;
pub use crate::user::{AudioBookmark, MediaProgressItem, Permissions, User};
pub use shelf_core::{ApiObject, MapperError, WireEnum, decode, encode};
