mod config;
mod scheduler;

use std::sync::Arc;

use config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use planmore_core::notifications::{
    MailerClient, NotificationService, NotificationServiceTrait, TelegramClient,
};
use planmore_storage_sqlite::goals::GoalRepository;
use planmore_storage_sqlite::settings::SettingsRepository;
use planmore_storage_sqlite::transactions::TransactionRepository;
use planmore_storage_sqlite::users::UserRepository;
use planmore_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

fn init_tracing() {
    let log_format = std::env::var("PM_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

fn build_notification_service(config: &Config) -> anyhow::Result<Arc<NotificationService>> {
    let db_path = init(&config.data_dir)?;
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone()));
    let settings_repository = Arc::new(SettingsRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer));

    let email_sender = Arc::new(MailerClient::new(
        config.mail_api_url.clone(),
        config.mail_api_key.as_deref(),
    )?);
    let chat_sender = Arc::new(TelegramClient::new(config.telegram_bot_token.clone()));

    Ok(Arc::new(NotificationService::new(
        user_repository,
        settings_repository,
        goal_repository,
        transaction_repository,
        email_sender,
        chat_sender,
        config.inactivity_threshold_days,
    )))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing();

    let service = build_notification_service(&config)?;

    let command = std::env::args().nth(1).unwrap_or_else(|| "run".to_string());
    match command.as_str() {
        // One-shot modes for cron-style deployments.
        "goal-check" => {
            let count = service.check_goal_notifications().await?;
            tracing::info!("Goal sweep completed: {} alerts dispatched", count);
        }
        "inactivity-check" => {
            let count = service.check_inactive_users().await?;
            tracing::info!("Inactivity sweep completed: {} reminders dispatched", count);
        }
        "run" => {
            scheduler::start_notification_scheduler(service, config.sweep_interval_secs);
            tokio::signal::ctrl_c().await?;
            tracing::info!("Shutting down");
        }
        other => {
            anyhow::bail!(
                "Unknown command '{}'; expected goal-check, inactivity-check or run",
                other
            );
        }
    }

    Ok(())
}
