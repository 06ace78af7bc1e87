use std::net::{Ipv4Addr, SocketAddr};

use founderhub_server::config::AppConfig;
use founderhub_server::database::client::{Database, DbConfig};
use founderhub_server::init;
use founderhub_server::middleware::error::{AppError, AppResult};
use founderhub_server::middleware::mw_ctx;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> AppResult<()> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let _sentry_guard = config.sentry_project_link.as_ref().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let db = Database::connect(DbConfig {
        url: &config.db_url,
        database: &config.db_database,
        namespace: &config.db_namespace,
        password: config.db_password.as_deref(),
        username: config.db_username.as_deref(),
    })
    .await?;

    init::run_migrations(&db).await?;

    let ctx_state = mw_ctx::create_ctx_state(db, &config);
    init::create_default_data_for_dev(&ctx_state).await?;

    let routes_all = init::main_router(&ctx_state);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    tracing::info!("->> LISTENING on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Generic {
            description: format!("could not bind {addr}: {e}"),
        })?;

    axum::serve(listener, routes_all.into_make_service())
        .await
        .map_err(|e| AppError::Generic {
            description: format!("server stopped: {e}"),
        })?;

    Ok(())
}
