use std::{
    error::Error,
    fs::OpenOptions,
    net::SocketAddr,
    path::PathBuf,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

use pantry_api::{AppState, NotFoundPolicy, build_router, graceful_shutdown, seed_database};

/// The REST API server for the pantry categories and vendors.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. An in-memory database is
    /// used if this is not set.
    #[arg(long)]
    db_path: Option<String>,

    /// File path to a directory with an SSL certificate `cert.pem` and key
    /// `key.pem`. The server uses plain HTTP if this is not set.
    #[arg(long)]
    cert_path: Option<String>,

    /// The port to serve the API from.
    #[arg(short, long, default_value_t = 8080)]
    port: u16,

    /// Respond with 404 Not Found, instead of an empty 200 OK or a 500, when a
    /// GET or PATCH request refers to a document that does not exist.
    #[arg(long)]
    strict_not_found: bool,

    /// Do not load the seed data into empty collections.
    #[arg(long)]
    no_seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    setup_logging()?;

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let conn = match &args.db_path {
        Some(db_path) => Connection::open(db_path)?,
        None => {
            tracing::warn!("No database path given, documents will not outlive the server.");
            Connection::open_in_memory()?
        }
    };

    let not_found_policy = if args.strict_not_found {
        NotFoundPolicy::Strict
    } else {
        NotFoundPolicy::Compatible
    };

    let state = AppState::with_sqlite(conn, not_found_policy)?;

    if !args.no_seed {
        seed_database(state.category_store.as_ref(), state.vendor_store.as_ref()).await?;
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    match args.cert_path {
        Some(cert_path) => {
            let tls_config = RustlsConfig::from_pem_file(
                PathBuf::from(&cert_path).join("cert.pem"),
                PathBuf::from(&cert_path).join("key.pem"),
            )
            .await?;

            tracing::info!("HTTPS server listening on {}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(router.into_make_service())
                .await?;
        }
        None => {
            tracing::info!("HTTP server listening on {}", addr);
            axum_server::bind(addr)
                .handle(handle)
                .serve(router.into_make_service())
                .await?;
        }
    }

    Ok(())
}

fn setup_logging() -> Result<(), Box<dyn Error>> {
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")?;

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file))
        .with_filter(filter::LevelFilter::DEBUG);

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();

    Ok(())
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the error type
        // already logs the failures worth knowing about.
        .on_failure(());

    router.layer(tracing_layer)
}
