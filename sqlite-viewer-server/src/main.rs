use axum_sqlite_viewer::{SqliteProvider, ViewerLayer};
use clap::{CommandFactory, Parser};
use std::process::ExitCode;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

mod cli;

use cli::Cli;

#[derive(Debug, Error)]
enum StartupError {
    #[error("db file {0} does not exist")]
    MissingDatabase(String),

    #[error("cannot open db: {0}")]
    Open(#[from] axum_sqlite_viewer::DatabaseError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.license {
        eprintln!("{}", axum_sqlite_viewer::license());
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("sqlite-viewer, v{}", env!("CARGO_PKG_VERSION"));

    if cli.uses_missing_default() {
        // No database given: show usage like any other invalid invocation
        let _ = Cli::command().print_help();
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{}", error);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    if !cli.database.is_file() {
        return Err(StartupError::MissingDatabase(
            cli.database.display().to_string(),
        ));
    }

    let provider = SqliteProvider::open(&cli.database)
        .await?
        .with_page_size(cli.page_size)
        .with_query_timeout(cli.query_timeout());

    let viewer = ViewerLayer::new(&cli.root, provider).with_database_file(&cli.database);
    let root = viewer.root().to_string();
    let app = viewer.into_router().layer(TraceLayer::new_for_http());

    let address = cli.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    info!(
        database = %cli.database.display(),
        "serving view at http://{}{}",
        address,
        root
    );

    axum::serve(listener, app)
        .await
        .map_err(StartupError::Serve)
}
