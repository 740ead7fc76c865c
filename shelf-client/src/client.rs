use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde_json::{Value as JsonValue, json};
use shelf_core::routes::{fill, v1};
use shelf_core::{ApiObject, QueryParams, WireEnum, build_url, decode, encode};
use shelf_model::{
    Author, AuthorList, Library, LibraryDetails, LibraryInclude, LibraryItemsPage,
    LibraryList, LoginResponse, NewLibrary, SessionsPage, YearStats,
};
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::query::LibraryItemsQuery;
use crate::session::Session;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};

/// Audiobookshelf API client.
///
/// Stateless apart from its transport: authentication travels in the
/// [`Session`] passed to each call, so one client can serve several users.
pub struct ApiClient<T = HttpTransport> {
    transport: Arc<T>,
}

impl<T> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("transport", &std::any::type_name::<T>())
            .finish()
    }
}

impl ApiClient<HttpTransport> {
    /// Client for the server at `base_url`.
    ///
    /// `localhost:13378` and `http://localhost:13378/` name the same server.
    pub fn connect(base_url: &str, timeout: Duration) -> Result<Self> {
        let transport = HttpTransport::new(base_url, timeout)?;
        info!(base_url = %transport.base_url(), "created API client");
        Ok(Self::with_transport(transport))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Log in and return the session holding the user's token.
    pub async fn authorize(&self, username: &str, password: &str) -> Result<Session> {
        let request = HttpRequest::new(Method::POST, v1::auth::LOGIN)
            .json(json!({"username": username, "password": password}));
        let login: LoginResponse = self.fetch(request).await?;
        let session = Session::from_login(login)?;
        info!(user = session.user_id().unwrap_or_default(), "logged in");
        Ok(session)
    }

    pub async fn create_library(
        &self,
        session: &Session,
        library: &NewLibrary,
    ) -> Result<Library> {
        let body = JsonValue::Object(encode(library, false)?);
        let request = self
            .authorized(session, Method::POST, v1::libraries::COLLECTION.to_owned())?
            .json(body);
        self.fetch(request).await
    }

    pub async fn libraries(&self, session: &Session) -> Result<Vec<Library>> {
        let request =
            self.authorized(session, Method::GET, v1::libraries::COLLECTION.to_owned())?;
        let list: LibraryList = self.fetch(request).await?;
        if !list.record().is_set("libraries") {
            return Err(ClientError::MissingField("libraries"));
        }
        Ok(list.libraries())
    }

    /// One library, with the extra sections named in `include`.
    ///
    /// Without `include` the server answers with the bare library, which is
    /// wrapped so both forms come back as [`LibraryDetails`].
    pub async fn library(
        &self,
        session: &Session,
        library_id: &str,
        include: &[LibraryInclude],
    ) -> Result<LibraryDetails> {
        let path = fill(v1::libraries::ITEM, &[("id", library_id)]);
        if include.is_empty() {
            let request = self.authorized(session, Method::GET, path)?;
            let library: Library = self.fetch(request).await?;
            let mut details = LibraryDetails::empty();
            details.record_mut().set("library", library)?;
            return Ok(details);
        }

        let include = include
            .iter()
            .filter_map(|section| section.wire_value())
            .map(|wire| wire.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let path = build_url(&path, &QueryParams::new().param("include", include))?;
        let request = self.authorized(session, Method::GET, path)?;
        self.fetch(request).await
    }

    /// Delete a library and return it as it was before deletion.
    pub async fn delete_library(&self, session: &Session, library_id: &str) -> Result<Library> {
        let path = fill(v1::libraries::ITEM, &[("id", library_id)]);
        let request = self.authorized(session, Method::DELETE, path)?;
        self.fetch(request).await
    }

    pub async fn library_authors(
        &self,
        session: &Session,
        library_id: &str,
    ) -> Result<Vec<Author>> {
        let path = fill(v1::libraries::AUTHORS, &[("id", library_id)]);
        let request = self.authorized(session, Method::GET, path)?;
        let list: AuthorList = self.fetch(request).await?;
        if !list.record().is_set("authors") {
            return Err(ClientError::MissingField("authors"));
        }
        Ok(list.authors())
    }

    pub async fn delete_author(&self, session: &Session, author_id: &str) -> Result<()> {
        let path = fill(v1::authors::ITEM, &[("id", author_id)]);
        let request = self.authorized(session, Method::DELETE, path)?;
        self.execute(request).await.map(drop)
    }

    /// A page of `user_id`'s listening sessions.
    pub async fn sessions_page(
        &self,
        session: &Session,
        user_id: &str,
        items_per_page: Option<u32>,
        page: Option<u32>,
    ) -> Result<SessionsPage> {
        let params = QueryParams::new()
            .param("user", user_id)
            .param("itemsPerPage", items_per_page)
            .param("page", page);
        let path = build_url(v1::sessions::COLLECTION, &params)?;
        let request = self.authorized(session, Method::GET, path)?;
        self.fetch(request).await
    }

    /// Listening statistics of the session's user for `year`.
    pub async fn user_year_stats(&self, session: &Session, year: i32) -> Result<YearStats> {
        let path = fill(v1::me::YEAR_STATS, &[("year", &year.to_string())]);
        let request = self.authorized(session, Method::GET, path)?;
        self.fetch(request).await
    }

    pub async fn library_items(
        &self,
        session: &Session,
        library_id: &str,
        query: &LibraryItemsQuery,
    ) -> Result<LibraryItemsPage> {
        let path = fill(v1::libraries::ITEMS, &[("id", library_id)]);
        let path = build_url(&path, &query.to_params())?;
        let request = self.authorized(session, Method::GET, path)?;
        self.fetch(request).await
    }

    fn authorized(&self, session: &Session, method: Method, path: String) -> Result<HttpRequest> {
        if session.token().is_empty() {
            return Err(ClientError::MissingAuthorization);
        }
        Ok(HttpRequest::new(method, path).bearer(session.token()))
    }

    /// Send `request` and fail on any non-success status before the body is
    /// looked at.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!(%method, %path, status = response.status, "unexpected status");
            return Err(ClientError::UnexpectedStatus(response.status));
        }
        debug!(%method, %path, status = response.status, bytes = response.body.len(), "response received");
        Ok(response)
    }

    async fn fetch<R: ApiObject>(&self, request: HttpRequest) -> Result<R> {
        let response = self.execute(request).await?;
        let payload: JsonValue = serde_json::from_slice(&response.body)?;
        Ok(decode(&payload)?)
    }
}
