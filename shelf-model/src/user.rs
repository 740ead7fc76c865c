use chrono::{DateTime, Utc};
use shelf_core::{ApiObject, Shape, api_object};

use crate::enums::UserType;

api_object! {
    /// Listening progress of one library item (or podcast episode).
    pub struct MediaProgressItem {
        "id" => Shape::string(),
        "library_item_id" => Shape::string(),
        "episode_id" => Shape::optional(Shape::string()),
        "duration" => Shape::float(),
        "progress" => Shape::float(),
        "current_time" => Shape::float(),
        "is_finished" => Shape::bool(),
        "hide_from_continue_listening" => Shape::bool(),
        "last_update" => Shape::date_time(),
        "started_at" => Shape::date_time(),
        "finished_at" => Shape::optional(Shape::date_time()),
    }
}

impl MediaProgressItem {
    pub fn id(&self) -> Option<&str> {
        self.record().str("id")
    }

    pub fn library_item_id(&self) -> Option<&str> {
        self.record().str("library_item_id")
    }

    pub fn episode_id(&self) -> Option<&str> {
        self.record().str("episode_id")
    }

    /// Fraction listened, `0.0..=1.0`.
    pub fn progress(&self) -> Option<f64> {
        self.record().f64("progress")
    }

    /// Playback position in seconds.
    pub fn current_time(&self) -> Option<f64> {
        self.record().f64("current_time")
    }

    pub fn duration(&self) -> Option<f64> {
        self.record().f64("duration")
    }

    pub fn is_finished(&self) -> bool {
        self.record().bool("is_finished").unwrap_or(false)
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("last_update")
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("started_at")
    }

    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("finished_at")
    }
}

api_object! {
    /// What a user may do on the server.
    pub struct Permissions {
        "access_all_libraries" => Shape::bool(),
        "access_all_tags" => Shape::bool(),
        "access_explicit_content" => Shape::bool(),
        "delete" => Shape::bool(),
        "download" => Shape::bool(),
        "update" => Shape::bool(),
        "upload" => Shape::bool(),
    }
}

impl Permissions {
    fn flag(&self, name: &str) -> bool {
        self.record().bool(name).unwrap_or(false)
    }

    pub fn can_access_all_libraries(&self) -> bool {
        self.flag("access_all_libraries")
    }

    pub fn can_delete(&self) -> bool {
        self.flag("delete")
    }

    pub fn can_download(&self) -> bool {
        self.flag("download")
    }

    pub fn can_update(&self) -> bool {
        self.flag("update")
    }

    pub fn can_upload(&self) -> bool {
        self.flag("upload")
    }
}

api_object! {
    pub struct AudioBookmark {
        "library_item_id" => Shape::string(),
        "title" => Shape::string(),
        "time" => Shape::int(),
        "created_at" => Shape::date_time(),
    }
}

impl AudioBookmark {
    pub fn library_item_id(&self) -> Option<&str> {
        self.record().str("library_item_id")
    }

    pub fn title(&self) -> Option<&str> {
        self.record().str("title")
    }

    /// Position in seconds.
    pub fn time(&self) -> Option<i64> {
        self.record().i64("time")
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("created_at")
    }
}

api_object! {
    /// A server account as returned by login and the user endpoints.
    pub struct User {
        "id" => Shape::string(),
        "username" => Shape::string(),
        "type" => Shape::enumeration::<UserType>(),
        "token" => Shape::string(),
        "created_at" => Shape::date_time(),
        "media_progress" => Shape::list(Shape::nested::<MediaProgressItem>()),
        "email" => Shape::optional(Shape::string()),
        "is_active" => Shape::bool(),
        "is_locked" => Shape::bool(),
        "last_seen" => Shape::optional(Shape::date_time()),
        "old_user_id" => Shape::optional(Shape::string()),
        "permissions" => Shape::nested::<Permissions>(),
        "bookmarks" => Shape::list(Shape::nested::<AudioBookmark>()),
        "libraries_accessible" => Shape::list(Shape::string()),
        "item_tags_selected" => Shape::list(Shape::string()),
        "series_hide_from_continue_listening" => Shape::list(Shape::string()),
    }
}

impl User {
    pub fn id(&self) -> Option<&str> {
        self.record().str("id")
    }

    pub fn username(&self) -> Option<&str> {
        self.record().str("username")
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.record().variant("type")
    }

    /// Bearer token issued at login; empty tokens count as missing.
    pub fn token(&self) -> Option<&str> {
        self.record().str("token").filter(|token| !token.is_empty())
    }

    pub fn email(&self) -> Option<&str> {
        self.record().str("email")
    }

    pub fn is_active(&self) -> bool {
        self.record().bool("is_active").unwrap_or(false)
    }

    pub fn is_locked(&self) -> bool {
        self.record().bool("is_locked").unwrap_or(false)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("created_at")
    }

    pub fn last_seen(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("last_seen")
    }

    pub fn permissions(&self) -> Option<Permissions> {
        self.record().object("permissions")
    }

    pub fn media_progress(&self) -> Vec<MediaProgressItem> {
        self.record().objects("media_progress")
    }

    pub fn bookmarks(&self) -> Vec<AudioBookmark> {
        self.record().objects("bookmarks")
    }

    pub fn libraries_accessible(&self) -> Vec<&str> {
        self.record().strings("libraries_accessible")
    }

    pub fn is_admin(&self) -> bool {
        matches!(self.user_type(), Some(UserType::Root | UserType::Admin))
    }
}
