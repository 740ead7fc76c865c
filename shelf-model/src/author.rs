use chrono::{DateTime, Utc};
use shelf_core::{ApiObject, Shape, api_object};

api_object! {
    /// An author known to a library.
    pub struct Author {
        "id" => Shape::string(),
        "asin" => Shape::optional(Shape::string()),
        "name" => Shape::string(),
        "description" => Shape::optional(Shape::string()),
        "image_path" => Shape::optional(Shape::string()),
        "added_at" => Shape::date_time(),
        "updated_at" => Shape::date_time(),
        "num_books" => Shape::optional(Shape::int()),
        "library_id" => Shape::string(),
    }
}

impl Author {
    pub fn id(&self) -> Option<&str> {
        self.record().str("id")
    }

    pub fn name(&self) -> Option<&str> {
        self.record().str("name")
    }

    pub fn asin(&self) -> Option<&str> {
        self.record().str("asin")
    }

    pub fn description(&self) -> Option<&str> {
        self.record().str("description")
    }

    pub fn image_path(&self) -> Option<&str> {
        self.record().str("image_path")
    }

    /// Only present when the author list was requested with book counts.
    pub fn num_books(&self) -> Option<i64> {
        self.record().i64("num_books")
    }

    pub fn library_id(&self) -> Option<&str> {
        self.record().str("library_id")
    }

    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("added_at")
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.record().date_time("updated_at")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shelf_core::{decode, encode};

    #[test]
    fn optional_metadata_may_be_missing() {
        let author = decode::<Author>(&json!({
            "id": "aut_z3leimgybl7uf3y4ab",
            "asin": null,
            "name": "Terry Goodkind",
            "description": null,
            "imagePath": null,
            "addedAt": 1650621073750_i64,
            "updatedAt": 1650621073750_i64,
            "libraryId": "lib_c1u6t4p45c35rf0nzd"
        }))
        .unwrap();

        assert_eq!(author.name(), Some("Terry Goodkind"));
        assert_eq!(author.asin(), None);
        assert_eq!(author.num_books(), None);
        assert!(!author.record().is_set("num_books"));

        let compact = encode(&author, false).unwrap();
        assert!(!compact.contains_key("asin"));
        assert_eq!(compact["addedAt"], json!("2022-04-22T09:51:13.750Z"));
    }
}
