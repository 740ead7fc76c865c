use shelf_core::QueryParams;

/// Paging, sorting and filtering of `GET /api/libraries/{id}/items`.
///
/// Unset options are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryItemsQuery {
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<String>,
    pub desc: Option<bool>,
    pub filter: Option<String>,
    pub minified: Option<bool>,
    pub collapse_series: Option<bool>,
    pub include: Option<String>,
}

impl LibraryItemsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sort by a dotted item path such as `media.metadata.title`.
    pub fn sort(mut self, sort: impl Into<String>, desc: bool) -> Self {
        self.sort = Some(sort.into());
        self.desc = Some(desc);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn minified(mut self, minified: bool) -> Self {
        self.minified = Some(minified);
        self
    }

    pub fn collapse_series(mut self, collapse: bool) -> Self {
        self.collapse_series = Some(collapse);
        self
    }

    pub fn include(mut self, include: impl Into<String>) -> Self {
        self.include = Some(include.into());
        self
    }

    /// Flags are sent as `1`/`0`; the server compares them against `"1"`.
    pub fn to_params(&self) -> QueryParams {
        let flag = |value: Option<bool>| value.map(i64::from);
        QueryParams::new()
            .param("limit", self.limit)
            .param("page", self.page)
            .param("sort", self.sort.clone())
            .param("desc", flag(self.desc))
            .param("filter", self.filter.clone())
            .param("minified", flag(self.minified))
            .param("collapseseries", flag(self.collapse_series))
            .param("include", self.include.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_core::build_url;

    #[test]
    fn unset_options_are_omitted() {
        let url = build_url("api/libraries/lib_1/items", &LibraryItemsQuery::new().to_params())
            .unwrap();
        assert_eq!(url, "api/libraries/lib_1/items");
    }

    #[test]
    fn flags_render_as_digits() {
        let query = LibraryItemsQuery::new()
            .limit(10)
            .page(2)
            .sort("media.metadata.title", true)
            .minified(true)
            .collapse_series(false);

        assert_eq!(
            build_url("items", &query.to_params()).unwrap(),
            "items?limit=10&page=2&sort=media.metadata.title&desc=1&minified=1&collapseseries=0"
        );
    }

    #[test]
    fn filters_are_percent_encoded() {
        let query = LibraryItemsQuery::new().filter("genres.U2NpLUZp");
        assert_eq!(
            build_url("items", &query.to_params()).unwrap(),
            "items?filter=genres.U2NpLUZp"
        );

        let query = LibraryItemsQuery::new().filter("tags.a b");
        assert_eq!(
            build_url("items", &query.to_params()).unwrap(),
            "items?filter=tags.a%20b"
        );
    }
}
