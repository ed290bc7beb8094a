use std::net::SocketAddr;
use std::sync::OnceLock;
use tokio::net::TcpListener;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

#[allow(unused)]
pub fn init() {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
            std::process::exit(1);
        }));

        FmtSubscriber::builder()
            .with_env_filter("volley=debug,mock_service=debug,axum::rejection=trace")
            .init();
    });
}

/// Binds the ping server on an ephemeral port and serves it in the
/// background. The listener is bound before this returns, so requests
/// can be issued immediately.
#[allow(unused)]
pub async fn spawn_target() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind target listener");
    let addr = listener.local_addr().expect("target listener addr");
    tokio::spawn(mock_service::serve(listener));
    addr
}

#[allow(unused)]
pub fn ping_url(addr: SocketAddr) -> String {
    format!("http://{addr}/ping")
}
