use std::net::SocketAddr;
use std::sync::Arc;

use todo_api::{
    application::todo_service::TodoServiceImpl,
    config::{Config, StoreConfig},
    domain::store::TodoStore,
    http::routing::{self, todos},
    infrastructure::{memory_store::MemoryTodoStore, sqlite_store::SqliteTodoStore},
    telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    telemetry::init();

    match &config.store {
        StoreConfig::Memory => {
            tracing::info!("using in-memory store");
            serve(MemoryTodoStore::new(), config.bind_addr).await
        }
        StoreConfig::Sqlite(url) => {
            tracing::info!(database_url = %url, "using sqlite store");
            serve(SqliteTodoStore::connect(url).await?, config.bind_addr).await
        }
    }
}

async fn serve<S: TodoStore>(store: S, addr: SocketAddr) -> anyhow::Result<()> {
    store.init().await?;
    let service = TodoServiceImpl::new(Arc::new(store));
    let router = routing::app(todos::router(todos::AppState { service }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
