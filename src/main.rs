//! GatherUp API server.

use std::sync::Arc;

use gatherup::adapters::http::{api_router, AppState};
use gatherup::adapters::postgres::{
    PostgresAttendanceRepository, PostgresEventReader, PostgresNotificationRepository,
    PostgresTicketRepository, PostgresUserDirectory, MIGRATOR,
};
use gatherup::adapters::renderer::{HttpRendererConfig, HttpTicketRenderer};
use gatherup::application::handlers::ticket::TicketIssuer;
use gatherup::application::NotificationEmitter;
use gatherup::config::{AppConfig, LogFormat};
use gatherup::domain::ticket::{SignedCredentialGenerator, TicketCredentialGenerator};
use gatherup::ports::TicketRenderer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    tracing::info!(
        environment = ?config.server.environment,
        leave_policy = ?config.ticketing.leave_policy,
        "Starting GatherUp"
    );

    let pool = config.database.pool_options().connect(&config.database.url).await?;
    if config.database.run_migrations {
        MIGRATOR.run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let side_effect_timeout = config.ticketing.side_effect_timeout();

    let tickets = Arc::new(PostgresTicketRepository::new(pool.clone()));
    let users = Arc::new(PostgresUserDirectory::new(pool.clone()));
    let notifications = Arc::new(PostgresNotificationRepository::new(pool.clone()));
    let credentials: Arc<dyn TicketCredentialGenerator> = Arc::new(
        SignedCredentialGenerator::new(config.ticketing.signing_key.clone()),
    );

    let renderer: Option<Arc<dyn TicketRenderer>> = match config.renderer.base_url.as_deref() {
        Some(base_url) if config.renderer.is_enabled() => {
            let mut renderer_config =
                HttpRendererConfig::new(base_url, &config.ticketing.artifact_base_path)
                    .with_timeout(config.renderer.timeout());
            if let Some(api_key) = config.renderer.api_key.clone() {
                renderer_config = renderer_config.with_api_key(api_key);
            }
            Some(Arc::new(HttpTicketRenderer::new(renderer_config)))
        }
        _ => {
            tracing::warn!("No ticket renderer configured; artifacts stay pending");
            None
        }
    };

    let state = AppState {
        events: Arc::new(PostgresEventReader::new(pool.clone())),
        users: users.clone(),
        attendance: Arc::new(PostgresAttendanceRepository::new(pool.clone())),
        tickets: tickets.clone(),
        notifications: notifications.clone(),
        credentials: credentials.clone(),
        issuer: Arc::new(TicketIssuer::new(
            tickets,
            users,
            credentials,
            renderer,
            side_effect_timeout,
        )),
        notifier: Arc::new(NotificationEmitter::new(notifications, side_effect_timeout)),
        leave_policy: config.ticketing.leave_policy,
    };

    let app = api_router(state, config.server.request_timeout());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "GatherUp listening");
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.server.environment.log_format() {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}
