macro_rules! api_path {
    ($path:literal) => {
        concat!("api", $path)
    };
}

/// Endpoint path templates, relative to the server's base URL.
///
/// Placeholders in braces are substituted with [`fill`].
pub mod v1 {
    pub mod auth {
        pub const LOGIN: &str = "login";
    }

    pub mod libraries {
        pub const COLLECTION: &str = api_path!("/libraries");
        pub const ITEM: &str = api_path!("/libraries/{id}");
        pub const AUTHORS: &str = api_path!("/libraries/{id}/authors");
        pub const ITEMS: &str = api_path!("/libraries/{id}/items");
    }

    pub mod authors {
        pub const ITEM: &str = api_path!("/authors/{id}");
    }

    pub mod sessions {
        pub const COLLECTION: &str = api_path!("/sessions");
    }

    pub mod me {
        pub const YEAR_STATS: &str = api_path!("/me/stats/year/{year}");
    }
}

/// Substitute `{name}` placeholders, percent-encoding each value.
///
/// Placeholders without a matching parameter are left untouched.
///
/// ```
/// use shelf_core::routes::{fill, v1};
///
/// assert_eq!(
///     fill(v1::libraries::AUTHORS, &[("id", "lib_9")]),
///     "api/libraries/lib_9/authors"
/// );
/// ```
pub fn fill(template: &str, params: &[(&str, &str)]) -> String {
    params
        .iter()
        .fold(template.to_owned(), |path, (name, value)| {
            path.replace(&format!("{{{name}}}"), &urlencoding::encode(value))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_are_prefixed() {
        assert_eq!(v1::libraries::COLLECTION, "api/libraries");
        assert_eq!(v1::me::YEAR_STATS, "api/me/stats/year/{year}");
    }

    #[test]
    fn fill_encodes_path_parameters() {
        assert_eq!(
            fill(v1::authors::ITEM, &[("id", "aut/1 2")]),
            "api/authors/aut%2F1%202"
        );
        assert_eq!(fill(v1::libraries::ITEM, &[]), "api/libraries/{id}");
    }
}
