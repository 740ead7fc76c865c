//! `shelfctl`: talk to an Audiobookshelf server from the command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use shelf_config::{ConfigLoader, init_tracing};
use shelf_model::MediaType;

mod commands;
mod output;

#[derive(Parser, Debug)]
#[command(name = "shelfctl", version, about = "Audiobookshelf command line client")]
struct Cli {
    /// Configuration file (defaults to shelf.toml or config/shelf.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Environment file to read SHELF_* variables from
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Server address, overriding the configuration
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Print wire JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in with the configured credentials and show the account
    Login,
    /// List libraries
    Libraries,
    /// Show one library
    Library {
        id: String,
        /// Also fetch filter data (authors, genres, tags ...)
        #[arg(long)]
        filterdata: bool,
    },
    /// Create a library over one or more folders
    CreateLibrary {
        #[arg(long)]
        name: String,
        /// Folder on the server; repeat for several
        #[arg(long = "folder", required = true)]
        folders: Vec<String>,
        #[arg(long, value_enum)]
        media_type: Option<MediaTypeArg>,
        #[arg(long)]
        provider: Option<String>,
        /// Render covers square instead of 1.6:1
        #[arg(long)]
        square_covers: bool,
    },
    /// Delete a library
    DeleteLibrary { id: String },
    /// List the authors of a library
    Authors { library_id: String },
    /// Delete an author
    DeleteAuthor { id: String },
    /// List items of a library, one page at a time
    Items {
        library_id: String,
        #[arg(long, default_value_t = 25)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Sort key, e.g. media.metadata.title
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, requires = "sort")]
        desc: bool,
        #[arg(long)]
        filter: Option<String>,
        #[arg(long)]
        collapse_series: bool,
    },
    /// List listening sessions
    Sessions {
        /// User id (defaults to the logged in user)
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        per_page: Option<u32>,
        #[arg(long)]
        page: Option<u32>,
    },
    /// Listening statistics for a year
    Stats {
        /// Defaults to the current year
        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MediaTypeArg {
    Book,
    Podcast,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Book => MediaType::Book,
            MediaTypeArg::Podcast => MediaType::Podcast,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_config_path(path);
    }
    if let Some(path) = &cli.env_file {
        loader = loader.with_env_file(path);
    }
    if let Some(base_url) = &cli.base_url {
        loader = loader.with_base_url(base_url);
    }
    let loaded = loader.load().context("failed to load configuration")?;

    if let Err(err) = init_tracing(&loaded.config.log_filter) {
        eprintln!("tracing already initialised: {err}");
    }
    loaded.warnings.log();

    commands::run(cli, loaded.config).await
}
