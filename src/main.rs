use todo_api::{
    application::todo_service::TodoServiceImpl,
    config::Config,
    domain::repository::TodoRepository,
    http::routing::{self, todos},
    infrastructure::{memory_repo::InMemoryTodoRepository, sqlite_repo::SqliteTodoRepository},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match config.database_url.as_deref() {
        Some(database_url) => {
            tracing::info!(%database_url, "using sqlite repository");
            serve(SqliteTodoRepository::connect(database_url).await?, &config).await
        }
        None => {
            tracing::info!("using in-memory repository");
            serve(InMemoryTodoRepository::new(), &config).await
        }
    }
}

async fn serve<R: TodoRepository>(repo: R, config: &Config) -> anyhow::Result<()> {
    repo.init().await?;
    let service = TodoServiceImpl::new(repo);
    let router = routing::app(todos::router(todos::AppState { service }));

    let addr = config.bind_addr;
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
