use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use sso_service::cli;
use sso_service::config::Config;
use sso_service::domain::identity::models::App;
use sso_service::domain::identity::models::AppId;
use sso_service::domain::identity::ports::AuthServicePort;
use sso_service::domain::identity::service::Authenticator;
use sso_service::inbound::http::router::create_router;
use sso_service::outbound::repositories::InMemoryStorage;
use sso_service::outbound::repositories::PostgresStorage;
use sso_service::telemetry;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let matches = cli::new().get_matches();
    let config = Config::load(cli::config_path(&matches))?;

    telemetry::init(config.env);

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        env = ?config.env,
        "Service starting"
    );

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_seconds = config.server.request_timeout_seconds,
        token_ttl_minutes = config.auth.token_ttl_minutes,
        "Configuration loaded"
    );

    let token_ttl = config.auth.token_ttl()?;

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(database.max_connections)
                .connect(&database.url)
                .await?;
            tracing::info!(
                max_connections = database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let storage = Arc::new(PostgresStorage::new(pg_pool));
            Arc::new(Authenticator::new(
                Arc::clone(&storage),
                Arc::clone(&storage),
                storage,
                token_ttl,
            ))
        }
        None => {
            let apps = config.apps.iter().map(|app| App {
                id: AppId(app.id),
                name: app.name.clone(),
                secret: app.secret.clone(),
            });
            let storage = Arc::new(InMemoryStorage::with_apps(apps));
            tracing::warn!(
                apps = config.apps.len(),
                "No database configured, using in-memory storage"
            );

            Arc::new(Authenticator::new(
                Arc::clone(&storage),
                Arc::clone(&storage),
                storage,
                token_ttl,
            ))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, config.server.request_timeout());

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Service stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Stopping service"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Stopping service"),
    }
}
