use chrono::{DateTime, Utc};
use shelf_core::{ApiObject, Shape, api_object};

use crate::enums::MediaType;

api_object! {
    /// Paging fields shared by every paginated listing.
    pub struct Page {
        "total" => Shape::int(),
        "page" => Shape::int(),
    }
}

impl Page {
    pub fn total(&self) -> Option<i64> {
        self.record().i64("total")
    }

    pub fn page(&self) -> Option<i64> {
        self.record().i64("page")
    }
}

api_object! {
    /// One listening session.
    pub struct PlaybackSession {
        "id" => Shape::string(),
        "user_id" => Shape::string(),
        "library_id" => Shape::string(),
        "library_item_id" => Shape::string(),
        "episode_id" => Shape::optional(Shape::string()),
        "media_type" => Shape::enumeration::<MediaType>(),
        "display_title" => Shape::string(),
        "display_author" => Shape::string(),
        "duration" => Shape::float(),
        "play_method" => Shape::int(),
        "date" => Shape::optional(Shape::string()),
        "day_of_week" => Shape::optional(Shape::string()),
        "time_listening" => Shape::float(),
        "start_time" => Shape::float(),
        "current_time" => Shape::float(),
        "started_at" => Shape::date_time(),
        "updated_at" => Shape::date_time(),
        "media_metadata" => Shape::any(),
    }
}

impl PlaybackSession {
    pub fn id(&self) -> Option<&str> {
        self.record().str("id")
    }

    pub fn library_item_id(&self) -> Option<&str> {
        self.record().str("library_item_id")
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.record().variant("media_type")
    }

    pub fn display_title(&self) -> Option<&str> {
        self.record().str("display_title")
    }

    pub fn display_author(&self) -> Option<&str> {
        self.record().str("display_author")
    }

    /// Seconds listened during this session.
    pub fn time_listening(&self) -> Option<f64> {
        self.record().f64("time_listening")
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("started_at")
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("updated_at")
    }

    pub fn media_metadata(&self) -> Option<&serde_json::Value> {
        self.record().raw("media_metadata")
    }
}

api_object! {
    /// A page of a user's listening sessions.
    pub struct SessionsPage: Page {
        "num_pages" => Shape::int(),
        "items_per_page" => Shape::int(),
        "sessions" => Shape::list(Shape::nested::<PlaybackSession>()),
    }
}

impl SessionsPage {
    pub fn total(&self) -> Option<i64> {
        self.record().i64("total")
    }

    pub fn page(&self) -> Option<i64> {
        self.record().i64("page")
    }

    pub fn num_pages(&self) -> Option<i64> {
        self.record().i64("num_pages")
    }

    pub fn items_per_page(&self) -> Option<i64> {
        self.record().i64("items_per_page")
    }

    pub fn sessions(&self) -> Vec<PlaybackSession> {
        self.record().objects("sessions")
    }
}

api_object! {
    /// A page of library items. The items themselves stay raw JSON; their
    /// shape depends on `minified` and the media type.
    pub struct LibraryItemsPage: Page {
        "results" => Shape::list(Shape::any()),
        "limit" => Shape::int(),
        "sort_by" => Shape::optional(Shape::string()),
        "sort_desc" => Shape::bool(),
        "filter_by" => Shape::optional(Shape::string()),
        "media_type" => Shape::enumeration::<MediaType>(),
        "minified" => Shape::bool(),
        "collapse_series" as "collapseseries" => Shape::bool(),
        "include" => Shape::string(),
    }
}

impl LibraryItemsPage {
    pub fn total(&self) -> Option<i64> {
        self.record().i64("total")
    }

    pub fn page(&self) -> Option<i64> {
        self.record().i64("page")
    }

    pub fn limit(&self) -> Option<i64> {
        self.record().i64("limit")
    }

    pub fn results(&self) -> Vec<&serde_json::Value> {
        self.record()
            .list("results")
            .map(|items| items.iter().filter_map(|item| item.as_raw()).collect())
            .unwrap_or_default()
    }

    pub fn media_type(&self) -> Option<MediaType> {
        self.record().variant("media_type")
    }

    pub fn collapse_series(&self) -> bool {
        self.record().bool("collapse_series").unwrap_or(false)
    }
}
