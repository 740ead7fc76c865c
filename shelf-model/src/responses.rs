//! Envelopes wrapping the payloads of individual endpoints.

use shelf_core::{ApiObject, Shape, api_object};

use crate::{Author, Library, User};

api_object! {
    /// Body returned by `POST /login`.
    pub struct LoginResponse {
        "user" => Shape::nested::<User>(),
        "user_default_library_id" => Shape::optional(Shape::string()),
        "server_settings" => Shape::optional(Shape::any()),
        "source" => Shape::optional(Shape::string()),
    }
}

impl LoginResponse {
    pub fn user(&self) -> Option<User> {
        self.record().object("user")
    }

    pub fn user_default_library_id(&self) -> Option<&str> {
        self.record().str("user_default_library_id")
    }

    /// Server settings are passed through untouched.
    pub fn server_settings(&self) -> Option<&serde_json::Value> {
        self.record().raw("server_settings")
    }
}

api_object! {
    pub struct LibraryList {
        "libraries" => Shape::list(Shape::nested::<Library>()),
    }
}

impl LibraryList {
    pub fn libraries(&self) -> Vec<Library> {
        self.record().objects("libraries")
    }
}

api_object! {
    pub struct AuthorList {
        "authors" => Shape::list(Shape::nested::<Author>()),
    }
}

impl AuthorList {
    pub fn authors(&self) -> Vec<Author> {
        self.record().objects("authors")
    }
}

api_object! {
    /// A single library, optionally with the sections named by `include`.
    pub struct LibraryDetails {
        "library" => Shape::nested::<Library>(),
        "filterdata" => Shape::optional(Shape::any()),
        "issues" => Shape::optional(Shape::int()),
        "num_user_playlists" => Shape::optional(Shape::int()),
    }
}

impl LibraryDetails {
    pub fn library(&self) -> Option<Library> {
        self.record().object("library")
    }

    pub fn filter_data(&self) -> Option<&serde_json::Value> {
        self.record().raw("filterdata")
    }

    pub fn issues(&self) -> Option<i64> {
        self.record().i64("issues")
    }

    pub fn num_user_playlists(&self) -> Option<i64> {
        self.record().i64("num_user_playlists")
    }
}
