use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use unifly_backend::config::Config;
use unifly_backend::db::{create_pool, DocumentStore};
use unifly_backend::embeddings::{Embeddings, QdrantIndex, SearchSync, TextChunker};
use unifly_backend::models::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unifly_backend=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded: {:?}", config.server);

    // Connect to the document store
    let pool = create_pool(&config.database).await?;
    let store = DocumentStore::new(pool.clone());

    // Join tables live in their own schema so they can share names with
    // the vector collections they track.
    let joiner = DocumentStore::with_schema(pool.clone(), "joiner");

    // Vector index and synchronization helper
    let embedder = Embeddings::new(&config.embedding)?;
    let index = QdrantIndex::connect(&config.qdrant, embedder, config.embedding.size)?;
    let chunker = TextChunker::new(config.embedding.chunk_size, config.embedding.chunk_overlap);
    let search = Arc::new(SearchSync::new(Box::new(index), Box::new(joiner), chunker));

    // Create shared state and router
    let state = AppState {
        pool,
        config: config.clone(),
        store,
        search,
    };
    let app = unifly_backend::create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
