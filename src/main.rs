#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL / DB_* settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let app = escola_api::app();

    let port = escola_api::config::config().port;
    let bind_addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("escola-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
