use shelf_core::{ApiObject, Shape, api_object};

api_object! {
    /// Listening statistics of the current user for one calendar year.
    ///
    /// The ranking lists and the "most listened" entries embed minified
    /// library items whose shape varies between server versions, so they
    /// stay raw JSON.
    pub struct YearStats {
        "total_listening_sessions" => Shape::int(),
        "total_listening_time" => Shape::float(),
        "total_book_listening_time" => Shape::float(),
        "total_podcast_listening_time" => Shape::float(),
        "top_authors" => Shape::list(Shape::any()),
        "top_genres" => Shape::list(Shape::any()),
        "top_narrators" => Shape::list(Shape::any()),
        "most_listened_narrator" => Shape::optional(Shape::any()),
        "most_listened_month" => Shape::optional(Shape::any()),
        "num_books_finished" => Shape::int(),
        "num_books_listened" => Shape::int(),
        "longest_audiobook_finished" => Shape::optional(Shape::any()),
        "books_with_covers" => Shape::list(Shape::string()),
        "finished_books_with_covers" => Shape::list(Shape::string()),
    }
}

impl YearStats {
    pub fn total_listening_sessions(&self) -> Option<i64> {
        self.record().i64("total_listening_sessions")
    }

    /// Seconds listened across all media.
    pub fn total_listening_time(&self) -> Option<f64> {
        self.record().f64("total_listening_time")
    }

    pub fn total_book_listening_time(&self) -> Option<f64> {
        self.record().f64("total_book_listening_time")
    }

    pub fn total_podcast_listening_time(&self) -> Option<f64> {
        self.record().f64("total_podcast_listening_time")
    }

    pub fn num_books_finished(&self) -> Option<i64> {
        self.record().i64("num_books_finished")
    }

    pub fn num_books_listened(&self) -> Option<i64> {
        self.record().i64("num_books_listened")
    }

    pub fn top_authors(&self) -> Vec<&serde_json::Value> {
        self.raw_list("top_authors")
    }

    pub fn top_genres(&self) -> Vec<&serde_json::Value> {
        self.raw_list("top_genres")
    }

    pub fn top_narrators(&self) -> Vec<&serde_json::Value> {
        self.raw_list("top_narrators")
    }

    pub fn most_listened_month(&self) -> Option<&serde_json::Value> {
        self.record().raw("most_listened_month")
    }

    fn raw_list(&self, name: &str) -> Vec<&serde_json::Value> {
        self.record()
            .list(name)
            .map(|items| items.iter().filter_map(|item| item.as_raw()).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelf_core::decode;

    #[test]
    fn rankings_stay_raw() {
        let stats = decode::<YearStats>(&json!({
            "totalListeningSessions": 12,
            "totalListeningTime": 43200.5,
            "totalBookListeningTime": 40000,
            "totalPodcastListeningTime": 3200.5,
            "topAuthors": [{"name": "Ursula K. Le Guin", "time": 20000}],
            "topGenres": [],
            "topNarrators": [],
            "mostListenedNarrator": null,
            "mostListenedMonth": {"month": 2, "time": 10000},
            "numBooksFinished": 3,
            "numBooksListened": 5,
            "longestAudiobookFinished": null,
            "booksWithCovers": ["li_1"],
            "finishedBooksWithCovers": []
        }))
        .unwrap();

        assert_eq!(stats.total_listening_sessions(), Some(12));
        assert_eq!(stats.total_book_listening_time(), Some(40000.0));
        assert_eq!(stats.top_authors()[0]["name"], json!("Ursula K. Le Guin"));
        assert!(stats.top_genres().is_empty());
        assert_eq!(stats.most_listened_month(), Some(&json!({"month": 2, "time": 10000})));
        assert_eq!(stats.record().get("most_listened_narrator"), Some(&shelf_core::Value::Null));
    }
}
