use skillswap::{app, db, state::AppState};

const DEFAULT_LOG_FILTER: &str = "skillswap=debug,axum=info,tower_http=info";

/// `RUST_LOG` picks the filter; `LOG_FORMAT=json` switches to one JSON object
/// per line.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.with_target(false).json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let app_state = AppState::init().await?;
    db::ensure_schema(&app_state.db).await?;
    tracing::info!(database_url = %app_state.config.database_url, "schema ready");

    let host = app_state.config.host.clone();
    let port = app_state.config.port;
    let app = app::build_app(app_state);
    app::serve(app, &host, port).await
}
