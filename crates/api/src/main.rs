#[tokio::main]
async fn main() {
    matreq_observability::init();

    let config = matreq_api::config::ApiConfig::from_env();
    let app = matreq_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
