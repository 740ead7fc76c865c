use anyhow::Result;
use serde_json::Value as JsonValue;
use shelf_client::Session;
use shelf_core::{ApiObject, encode};
use tracing::debug;
use shelf_model::{Author, Library, LibraryDetails, LibraryItemsPage, SessionsPage, YearStats};

/// Renders command results as plain text or wire JSON.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    json: bool,
}

impl Printer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn login(&self, session: &Session) -> Result<()> {
        let Some(user) = session.user() else {
            println!("authenticated with an API token");
            return Ok(());
        };
        report_unmapped(user);
        if self.json {
            return emit(user);
        }
        println!(
            "logged in as {} ({})",
            user.username().unwrap_or("?"),
            user.user_type().map(|kind| format!("{kind:?}")).unwrap_or_default()
        );
        if let Some(library) = session.default_library_id() {
            println!("default library: {library}");
        }
        Ok(())
    }

    pub fn libraries(&self, libraries: &[Library]) -> Result<()> {
        libraries.iter().for_each(report_unmapped);
        if self.json {
            return emit_all(libraries);
        }
        for library in libraries {
            let folders: Vec<String> = library
                .folders()
                .iter()
                .filter_map(|folder| folder.full_path().map(str::to_owned))
                .collect();
            println!(
                "{:<28} {:<24} {:<9} {}",
                library.id().unwrap_or("-"),
                library.name().unwrap_or("-"),
                library
                    .media_type()
                    .map(|kind| kind.to_string())
                    .unwrap_or_default(),
                folders.join(", ")
            );
        }
        Ok(())
    }

    pub fn library_details(&self, details: &LibraryDetails) -> Result<()> {
        report_unmapped(details);
        if self.json {
            return emit(details);
        }
        if let Some(library) = details.library() {
            self.libraries(std::slice::from_ref(&library))?;
            if let Some(scanned) = library.last_scan() {
                println!("last scan: {}", scanned.to_rfc3339());
            }
        }
        if let Some(issues) = details.issues() {
            println!("items with issues: {issues}");
        }
        if let Some(filter_data) = details.filter_data() {
            for section in ["authors", "genres", "tags", "series", "narrators"] {
                if let Some(entries) = filter_data.get(section).and_then(JsonValue::as_array) {
                    println!("{section}: {}", entries.len());
                }
            }
        }
        Ok(())
    }

    pub fn authors(&self, authors: &[Author]) -> Result<()> {
        authors.iter().for_each(report_unmapped);
        if self.json {
            return emit_all(authors);
        }
        for author in authors {
            let books = author
                .num_books()
                .map(|count| format!("{count} books"))
                .unwrap_or_default();
            println!(
                "{:<28} {:<32} {}",
                author.id().unwrap_or("-"),
                author.name().unwrap_or("-"),
                books
            );
        }
        Ok(())
    }

    pub fn items(&self, page: &LibraryItemsPage) -> Result<()> {
        report_unmapped(page);
        if self.json {
            return emit(page);
        }
        for item in page.results() {
            let title = item
                .pointer("/media/metadata/title")
                .and_then(JsonValue::as_str)
                .unwrap_or("-");
            let id = item.get("id").and_then(JsonValue::as_str).unwrap_or("-");
            println!("{id:<28} {title}");
        }
        println!(
            "page {} ({} items total)",
            page.page().unwrap_or(0),
            page.total().unwrap_or(0)
        );
        Ok(())
    }

    pub fn sessions(&self, page: &SessionsPage) -> Result<()> {
        report_unmapped(page);
        if self.json {
            return emit(page);
        }
        for session in page.sessions() {
            println!(
                "{:<20} {:>8.0}s  {} by {}",
                session
                    .started_at()
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default(),
                session.time_listening().unwrap_or(0.0),
                session.display_title().unwrap_or("-"),
                session.display_author().unwrap_or("-")
            );
        }
        println!(
            "page {} of {} ({} sessions)",
            page.page().unwrap_or(0) + 1,
            page.num_pages().unwrap_or(0),
            page.total().unwrap_or(0)
        );
        Ok(())
    }

    pub fn year_stats(&self, year: i32, stats: &YearStats) -> Result<()> {
        report_unmapped(stats);
        if self.json {
            return emit(stats);
        }
        let hours = stats.total_listening_time().unwrap_or(0.0) / 3600.0;
        println!("{year}: {hours:.1} hours over {} sessions", stats.total_listening_sessions().unwrap_or(0));
        println!(
            "books finished: {}, listened to: {}",
            stats.num_books_finished().unwrap_or(0),
            stats.num_books_listened().unwrap_or(0)
        );
        for author in stats.top_authors().into_iter().take(5) {
            if let Some(name) = author.get("name").and_then(JsonValue::as_str) {
                println!("  top author: {name}");
            }
        }
        Ok(())
    }

    pub fn deleted(&self, kind: &str, name: &str) -> Result<()> {
        if !self.json {
            println!("deleted {kind} {name}");
        }
        Ok(())
    }
}

/// Keys the server sent that this client does not model.
fn report_unmapped<T: ApiObject>(object: &T) {
    let fields = object.record().unmapped_fields();
    if !fields.is_empty() {
        debug!(
            object = object.record().type_name(),
            ?fields,
            "response carried fields without a declaration"
        );
    }
}

fn emit<T: ApiObject>(object: &T) -> Result<()> {
    let wire = JsonValue::Object(encode(object, false)?);
    println!("{}", serde_json::to_string_pretty(&wire)?);
    Ok(())
}

fn emit_all<T: ApiObject>(objects: &[T]) -> Result<()> {
    let wire = objects
        .iter()
        .map(|object| encode(object, false).map(JsonValue::Object))
        .collect::<Result<Vec<_>, _>>()?;
    println!("{}", serde_json::to_string_pretty(&wire)?);
    Ok(())
}
