//! FitTrack - Local-First Fitness Tracker
//!
//! Main entry point: opens the local store, runs the first-run bootstrap,
//! and prints a short summary of the stored state.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fittrack::storage::config;
use fittrack::LocalStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FitTrack v{}", env!("CARGO_PKG_VERSION"));

    let app_config = config::load_config()?;
    let store = LocalStore::open(&app_config)?;

    if app_config.seed.auto_initialize {
        store.initialize_if_empty()?;
    }

    match store.user() {
        Some(user) => {
            let stats = store.user_stats(user.id);
            tracing::info!(
                "{} <{}>: {} workouts on record, {} in the last 30 days, {} kcal burned",
                user.name,
                user.email,
                stats.total_workouts,
                stats.recent_workouts,
                stats.total_calories
            );
            tracing::info!(
                "This week: {} workouts across {} days ({:.0}% of a full week)",
                stats.weekly_activity.workouts,
                stats.weekly_activity.days_worked_out,
                stats.weekly_activity.progress
            );
        }
        None => {
            tracing::info!("No user profile yet (bootstrap disabled in config)");
        }
    }

    Ok(())
}
