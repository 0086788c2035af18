use std::sync::Arc;

use chrono::Duration;
use poem::{listener::TcpListener, Server};
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;
use tracing::info;
use tracing_subscriber::EnvFilter;

use classifieds::{
    api,
    cleanup::CleanupJob,
    config::Config,
    migration::Migrator,
    notification::{LogMailer, Mailer, NotificationQueue, Notifier, SmtpMailer},
    security::TokenProvider,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options).await?;
    Migrator::up(&db, None).await?;
    info!("database schema up to date");

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => Arc::new(SmtpMailer::new(smtp, &config.mail_from)?),
        None => Arc::new(LogMailer),
    };
    let (queue, rx) = NotificationQueue::channel(config.notification_queue_capacity);
    let notifier = Notifier::new(db.clone(), mailer).spawn(rx);

    let tokens = TokenProvider::new(
        config.jwt_secret.as_bytes(),
        Duration::minutes(config.token_ttl_minutes),
    );
    let state = Arc::new(AppState::new(db, tokens, queue));

    let cleanup = CleanupJob::new(state.announcements.clone(), &config.cleanup_cron)?.spawn();

    info!(addr = %config.bind_addr, "starting server");
    Server::new(TcpListener::bind(config.bind_addr.clone()))
        .run_with_graceful_shutdown(api::app(state), shutdown_signal(), None)
        .await?;

    cleanup.abort();
    notifier.abort();
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}
