use drug_research_service::{Config, create_app};
use tokio::net::TcpListener;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Credentials are required up front; a missing key is a startup failure
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let port = config.port;
    let app = create_app(&config);
    let listener = TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    let addr = listener.local_addr()?;

    info!("Drug Research Service starting on {}", addr);
    info!("Health check endpoint: http://{}/health", addr);
    info!("Research endpoint: POST http://{}/research", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
