use anyhow::{Context, Result, bail};
use chrono::Datelike;
use shelf_client::{ApiClient, LibraryItemsQuery, Session};
use shelf_config::ClientConfig;
use shelf_model::{CoverAspectRatio, LibraryInclude, NewLibrary, NewLibrarySettings};
use tracing::debug;

use crate::output::Printer;
use crate::{Cli, Command};

pub async fn run(cli: Cli, config: ClientConfig) -> Result<()> {
    let client = ApiClient::connect(&config.base_url, config.timeout)
        .with_context(|| format!("invalid server address '{}'", config.base_url))?;
    let session = open_session(&client, &config).await?;
    let printer = Printer::new(cli.json);

    match cli.command {
        Command::Login => printer.login(&session),
        Command::Libraries => {
            let libraries = client
                .libraries(&session)
                .await
                .context("failed to list libraries")?;
            printer.libraries(&libraries)
        }
        Command::Library { id, filterdata } => {
            let include: &[LibraryInclude] = if filterdata {
                &[LibraryInclude::FilterData]
            } else {
                &[]
            };
            let details = client
                .library(&session, &id, include)
                .await
                .with_context(|| format!("failed to fetch library {id}"))?;
            printer.library_details(&details)
        }
        Command::CreateLibrary {
            name,
            folders,
            media_type,
            provider,
            square_covers,
        } => {
            let mut body = NewLibrary::new(name, folders).settings(
                NewLibrarySettings::default()
                    .cover_aspect_ratio(CoverAspectRatio::from_square(square_covers)),
            );
            if let Some(media_type) = media_type {
                body = body.media_type(media_type.into());
            }
            if let Some(provider) = provider {
                body = body.provider(provider);
            }
            let library = client
                .create_library(&session, &body)
                .await
                .context("failed to create library")?;
            printer.libraries(std::slice::from_ref(&library))
        }
        Command::DeleteLibrary { id } => {
            let library = client
                .delete_library(&session, &id)
                .await
                .with_context(|| format!("failed to delete library {id}"))?;
            printer.deleted("library", library.name().unwrap_or(&id))
        }
        Command::Authors { library_id } => {
            let authors = client
                .library_authors(&session, &library_id)
                .await
                .with_context(|| format!("failed to list authors of {library_id}"))?;
            printer.authors(&authors)
        }
        Command::DeleteAuthor { id } => {
            client
                .delete_author(&session, &id)
                .await
                .with_context(|| format!("failed to delete author {id}"))?;
            printer.deleted("author", &id)
        }
        Command::Items {
            library_id,
            limit,
            page,
            sort,
            desc,
            filter,
            collapse_series,
        } => {
            let mut query = LibraryItemsQuery::new()
                .limit(limit)
                .page(page)
                .minified(true)
                .collapse_series(collapse_series);
            if let Some(sort) = sort {
                query = query.sort(sort, desc);
            }
            if let Some(filter) = filter {
                query = query.filter(filter);
            }
            let items = client
                .library_items(&session, &library_id, &query)
                .await
                .with_context(|| format!("failed to list items of {library_id}"))?;
            printer.items(&items)
        }
        Command::Sessions {
            user,
            per_page,
            page,
        } => {
            let user = match user.as_deref().or(session.user_id()) {
                Some(user) => user.to_owned(),
                None => bail!("--user is required when authenticating with a token"),
            };
            let sessions = client
                .sessions_page(&session, &user, per_page, page)
                .await
                .context("failed to list sessions")?;
            printer.sessions(&sessions)
        }
        Command::Stats { year } => {
            let year = year.unwrap_or_else(|| chrono::Utc::now().year());
            let stats = client
                .user_year_stats(&session, year)
                .await
                .with_context(|| format!("failed to fetch statistics for {year}"))?;
            printer.year_stats(year, &stats)
        }
    }
}

/// A configured API token wins over logging in with credentials.
async fn open_session(client: &ApiClient, config: &ClientConfig) -> Result<Session> {
    if let Some(token) = &config.token {
        debug!("using configured API token");
        return Session::from_token(token.as_str()).context("configured token is empty");
    }

    let Some(credentials) = &config.credentials else {
        bail!("no credentials configured; set SHELF_USERNAME and SHELF_PASSWORD or SHELF_TOKEN");
    };
    client
        .authorize(&credentials.username, &credentials.password)
        .await
        .with_context(|| format!("login as '{}' failed", credentials.username))
}
