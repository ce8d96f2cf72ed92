use std::error::Error;

use cohere_service::telemetry::{WORKSPACE_TARGETS, layer_for};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; variables may come from the process environment.
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,wiki_search=info,pipeline=info"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(layer_for(&WORKSPACE_TARGETS))
        .try_init()?;

    match dotenv {
        Ok(path) => info!(target: "wiki_rag_backend", path = %path.display(), "loaded .env"),
        Err(e) => warn!(target: "wiki_rag_backend", error = %e, "no .env loaded"),
    }

    api::start().await?;

    Ok(())
}
