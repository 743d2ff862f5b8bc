use astra::Server;
use listing_finder::app::AppState;
use listing_finder::config::Config;
use listing_finder::db::init_db;
use listing_finder::responses::error_to_response;
use listing_finder::router::handle;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let state = AppState::new(config);

    if let Err(e) = init_db(&state.db) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    let summary = state.reload(None);
    tracing::info!(source = ?summary.source, count = summary.count, "initial working set");

    let addr = state.config.bind_addr;
    tracing::info!(%addr, "starting server");

    let server = Server::bind(&addr).max_workers(state.config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down");
}
