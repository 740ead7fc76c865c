//! Request bodies sent by the client.
//!
//! Builders only set what the caller supplied; fields left unset are not
//! encoded at all, so the server applies its own defaults.

use shelf_core::{ApiObject, Shape, Value, api_object};

use crate::enums::{CoverAspectRatio, MediaType};

api_object! {
    pub struct NewLibraryFolder {
        "full_path" => Shape::string(),
    }
}

api_object! {
    pub struct NewLibrarySettings {
        "cover_aspect_ratio" => Shape::enumeration::<CoverAspectRatio>(),
        "disable_watcher" => Shape::bool(),
        "skip_matching_media_with_asin" => Shape::bool(),
        "skip_matching_media_with_isbn" => Shape::bool(),
        "auto_scan_cron_expression" => Shape::string(),
    }
}

api_object! {
    /// Body of `POST /api/libraries`.
    pub struct NewLibrary {
        "name" => Shape::string(),
        "folders" => Shape::list(Shape::nested::<NewLibraryFolder>()),
        "icon" => Shape::optional(Shape::string()),
        "media_type" => Shape::optional(Shape::enumeration::<MediaType>()),
        "provider" => Shape::optional(Shape::string()),
        "settings" => Shape::nested::<NewLibrarySettings>(),
    }
}

/// Assign a field declared on the type; the name is always a literal from
/// the declarations above.
fn assign<T: ApiObject>(mut object: T, field: &str, value: impl Into<Value>) -> T {
    object
        .record_mut()
        .set(field, value)
        .expect("builder fields are declared on the type");
    object
}

impl NewLibraryFolder {
    pub fn new(full_path: impl Into<String>) -> Self {
        assign(Self::empty(), "full_path", full_path.into())
    }

    pub fn full_path(&self) -> Option<&str> {
        self.record().str("full_path")
    }
}

impl Default for NewLibrarySettings {
    fn default() -> Self {
        Self::empty()
    }
}

impl NewLibrarySettings {
    pub fn cover_aspect_ratio(self, ratio: CoverAspectRatio) -> Self {
        assign(self, "cover_aspect_ratio", ratio)
    }

    pub fn disable_watcher(self, disable: bool) -> Self {
        assign(self, "disable_watcher", disable)
    }

    pub fn skip_matching_media_with_asin(self, skip: bool) -> Self {
        assign(self, "skip_matching_media_with_asin", skip)
    }

    pub fn skip_matching_media_with_isbn(self, skip: bool) -> Self {
        assign(self, "skip_matching_media_with_isbn", skip)
    }

    pub fn auto_scan_cron_expression(self, expression: impl Into<String>) -> Self {
        assign(self, "auto_scan_cron_expression", expression.into())
    }
}

impl NewLibrary {
    /// A library over `folders`. Settings are always sent, even when empty.
    pub fn new<I, S>(name: impl Into<String>, folders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let folders: Vec<NewLibraryFolder> =
            folders.into_iter().map(NewLibraryFolder::new).collect();
        let library = assign(Self::empty(), "name", name.into());
        let library = assign(library, "folders", folders);
        assign(library, "settings", NewLibrarySettings::default())
    }

    pub fn icon(self, icon: impl Into<String>) -> Self {
        assign(self, "icon", icon.into())
    }

    pub fn media_type(self, media_type: MediaType) -> Self {
        assign(self, "media_type", media_type)
    }

    pub fn provider(self, provider: impl Into<String>) -> Self {
        assign(self, "provider", provider.into())
    }

    pub fn settings(self, settings: NewLibrarySettings) -> Self {
        assign(self, "settings", settings)
    }

    pub fn name(&self) -> Option<&str> {
        self.record().str("name")
    }

    pub fn folders(&self) -> Vec<NewLibraryFolder> {
        self.record().objects("folders")
    }
}
