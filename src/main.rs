use rafael_backend::create_app;
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .unwrap_or(8000);

    // The app serves /analyze and /export even with no store configured.
    let app = create_app().await;
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    let addr = listener.local_addr()?;

    info!("RAFAEL backend starting on {}", addr);
    info!("Analysis endpoint: POST http://{}/analyze", addr);
    info!("Export endpoint: POST http://{}/export", addr);
    info!("Store status: GET http://{}/test", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
