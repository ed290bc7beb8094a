use std::net::SocketAddr;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tokio::task::spawn(async { mock_service::throughput_log_task().await });

    let addr: SocketAddr = "0.0.0.0:8000".parse().unwrap();
    tracing::info!("ping server listening on http://{addr}");
    mock_service::run(addr).await;
}
