mod config;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // A missing .env is normal outside local development.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("ignoring unreadable .env: {e}");
        }
    }
    tracing_subscriber::fmt::init();

    let config = config::ServerConfig::from_env();
    let state = state::AppState::new();
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(port = config.port, "easel store listening");
    axum::serve(listener, app).await
}
