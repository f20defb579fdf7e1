mod app;
mod auth;
mod config;
mod error;
mod records;
mod sheets;
mod state;
mod view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "spocportal=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    // Fatal if the service-account file is missing or unreadable; without it
    // the sheet-backed stores are unreachable.
    let app_state = state::AppState::init().await?;

    let app = app::build_app(app_state);
    app::serve(app).await
}
