use std::sync::Arc;

use equipe_api::app::build_app;
use equipe_api::config::Config;
use equipe_store::{CollaboratorStore, InMemoryStore, PostgresStore, UserStore};

#[tokio::main]
async fn main() {
    equipe_observability::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "refusing to start");
            std::process::exit(1);
        }
    };

    let (collaborators, users): (Arc<dyn CollaboratorStore>, Arc<dyn UserStore>) =
        match &config.database_url {
            Some(url) => {
                let store = match PostgresStore::connect(url).await {
                    Ok(store) => Arc::new(store),
                    Err(e) => {
                        tracing::error!(error = %e, "database connection failed");
                        std::process::exit(1);
                    }
                };
                (store.clone(), store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set; using the in-memory store");
                let store = Arc::new(InMemoryStore::new());
                (store.clone(), store)
            }
        };

    let app = build_app(&config.jwt_secret, collaborators, users);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {e}", config.bind_addr));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
