use blogsmith::{app, state::AppState, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("blogsmith=debug,axum=info,tower_http=info");

    // Any failure here (config, database, migrations, upload dir) aborts startup.
    let app_state = AppState::init().await.map_err(|e| {
        tracing::error!(error = %e, "startup failed, server not started");
        e
    })?;

    let config = app_state.config.clone();
    let app = app::build_app(app_state);
    app::serve(app, &config).await
}
