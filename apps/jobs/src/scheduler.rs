//! Background scheduler for the periodic notification sweeps.
//!
//! Runs the goal-progress and inactivity sweeps on a fixed interval.

use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{info, warn};

use planmore_core::notifications::{NotificationService, NotificationServiceTrait};

/// Initial delay before the first sweep (lets migrations and pools settle).
const INITIAL_DELAY_SECS: u64 = 10;

/// Starts the background notification sweep scheduler.
pub fn start_notification_scheduler(service: Arc<NotificationService>, interval_secs: u64) {
    tokio::spawn(async move {
        info!("Notification scheduler started ({}s interval)", interval_secs);

        tokio::time::sleep(Duration::from_secs(INITIAL_DELAY_SECS)).await;

        // First tick fires immediately, subsequent ticks are interval_secs apart.
        let mut sweep_interval = interval(Duration::from_secs(interval_secs));

        loop {
            sweep_interval.tick().await;
            run_sweeps(&service).await;
        }
    });
}

/// Runs one round of both sweeps.
pub async fn run_sweeps(service: &Arc<NotificationService>) {
    match service.check_goal_notifications().await {
        Ok(count) => info!("Goal sweep completed: {} alerts dispatched", count),
        Err(e) => warn!("Goal sweep failed: {}", e),
    }

    match service.check_inactive_users().await {
        Ok(count) => info!("Inactivity sweep completed: {} reminders dispatched", count),
        Err(e) => warn!("Inactivity sweep failed: {}", e),
    }
}
