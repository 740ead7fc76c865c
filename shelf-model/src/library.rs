use chrono::{DateTime, Utc};
use shelf_core::{ApiObject, Shape, api_object};

use crate::enums::{CoverAspectRatio, MediaType};

api_object! {
    /// A directory scanned into a library.
    pub struct LibraryFolder {
        "id" => Shape::string(),
        "full_path" => Shape::string(),
        "library_id" => Shape::string(),
        "added_at" => Shape::optional(Shape::date_time()),
    }
}

impl LibraryFolder {
    pub fn id(&self) -> Option<&str> {
        self.record().str("id")
    }

    pub fn full_path(&self) -> Option<&str> {
        self.record().str("full_path")
    }

    pub fn library_id(&self) -> Option<&str> {
        self.record().str("library_id")
    }

    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("added_at")
    }
}

api_object! {
    pub struct LibrarySettings {
        "cover_aspect_ratio" => Shape::enumeration::<CoverAspectRatio>(),
        "disable_watcher" => Shape::bool(),
        "skip_matching_media_with_asin" => Shape::bool(),
        "skip_matching_media_with_isbn" => Shape::bool(),
        "auto_scan_cron_expression" => Shape::optional(Shape::string()),
        "audiobooks_only" => Shape::bool(),
        "hide_single_book_series" => Shape::bool(),
        "metadata_precedence" => Shape::list(Shape::string()),
    }
}

impl LibrarySettings {
    pub fn cover_aspect_ratio(&self) -> Option<CoverAspectRatio> {
        self.record().variant("cover_aspect_ratio")
    }

    pub fn disable_watcher(&self) -> bool {
        self.record().bool("disable_watcher").unwrap_or(false)
    }

    pub fn auto_scan_cron_expression(&self) -> Option<&str> {
        self.record().str("auto_scan_cron_expression")
    }

    /// Metadata sources in the order the scanner prefers them.
    pub fn metadata_precedence(&self) -> Vec<&str> {
        self.record().strings("metadata_precedence")
    }
}

api_object! {
    /// A server library with its folders and scanner settings.
    pub struct Library {
        "id" => Shape::string(),
        "name" => Shape::string(),
        "folders" => Shape::list(Shape::nested::<LibraryFolder>()),
        "display_order" => Shape::int(),
        "icon" => Shape::string(),
        "media_type" => Shape::enumeration::<MediaType>(),
        "provider" => Shape::string(),
        "settings" => Shape::nested::<LibrarySettings>(),
        "created_at" => Shape::date_time(),
        "last_update" => Shape::date_time(),
        "last_scan" => Shape::optional(Shape::date_time()),
        "last_scan_version" => Shape::optional(Shape::string()),
        "old_library_id" => Shape::optional(Shape::string()),
    }
}

impl Library {
    pub fn id(&self) -> Option<&str> {
        self.record().str("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.record().str("name")
    }

    pub fn folders(&self) -> Vec<LibraryFolder> {
        self.record().objects("folders")
    }

    pub fn display_order(&self) -> Option<i64> {
        self.record().i64("display_order")
    }

    pub fn icon(&self) -> Option<&str> {
        self.record().str("icon")
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.record().variant("media_type")
    }

    pub fn provider(&self) -> Option<&str> {
        self.record().str("provider")
    }

    pub fn settings(&self) -> Option<LibrarySettings> {
        self.record().object("settings")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("created_at")
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("last_update")
    }

    pub fn last_scan(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("last_scan")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelf_core::{MapperError, decode};

    fn payload() -> serde_json::Value {
        json!({
            "id": "lib_c1u6t4p45c35rf0nzd",
            "oldLibraryId": null,
            "name": "Audiobooks",
            "folders": [{
                "id": "fol_bev1zuxhb0j0s1wehr",
                "fullPath": "/audiobooks",
                "libraryId": "lib_c1u6t4p45c35rf0nzd",
                "addedAt": 1650462940610_i64
            }],
            "displayOrder": 1,
            "icon": "database",
            "mediaType": "book",
            "provider": "audible",
            "settings": {
                "coverAspectRatio": 1,
                "disableWatcher": false,
                "skipMatchingMediaWithAsin": false,
                "skipMatchingMediaWithIsbn": false,
                "autoScanCronExpression": null,
                "audiobooksOnly": false,
                "hideSingleBookSeries": false,
                "metadataPrecedence": ["folderStructure", "audioMetatags", "opfFile", "absMetadata"]
            },
            "createdAt": 1650462940610_i64,
            "lastUpdate": 1650462940610_i64,
            "lastScan": 0,
            "lastScanVersion": "2.2.0"
        })
    }

    #[test]
    fn decodes_a_server_library() {
        let library = decode::<Library>(&payload()).unwrap();

        assert_eq!(library.name(), Some("Audiobooks"));
        assert_eq!(library.media_type(), Some(MediaType::Book));
        assert_eq!(library.last_scan(), None);
        assert_eq!(
            library.created_at().map(|at| at.timestamp_millis()),
            Some(1650462940610)
        );

        let folders = library.folders();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].full_path(), Some("/audiobooks"));

        let settings = library.settings().unwrap();
        assert_eq!(settings.cover_aspect_ratio(), Some(CoverAspectRatio::Square));
        assert_eq!(settings.metadata_precedence()[0], "folderStructure");
        assert!(library.record().rejected().is_empty());
    }

    #[test]
    fn errors_point_at_the_offending_folder() {
        let mut raw = payload();
        raw["folders"][0]["fullPath"] = json!(42);

        let err = decode::<Library>(&raw).unwrap_err();
        assert!(matches!(err, MapperError::MalformedShape { .. }));
        assert_eq!(err.path(), Some("folders[0].fullPath"));
    }

    #[test]
    fn unknown_media_type_is_rejected() {
        let mut raw = payload();
        raw["mediaType"] = json!("video");

        let err = decode::<Library>(&raw).unwrap_err();
        assert!(matches!(
            err,
            MapperError::UnknownVariant { enum_name: "MediaType", .. }
        ));
    }
}
