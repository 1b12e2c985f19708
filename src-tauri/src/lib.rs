//! AmigoCake Admin - Tauri v2 Backend
//!
//! Registers the IPC command handlers the frontend calls via
//! `@tauri-apps/api/core::invoke()`. Command names are snake_case,
//! prefixed by screen (`auth_*`, `orders_*`, and so on).

use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod commands;
mod error;
mod format;
mod logging;
mod models;
mod orders;
mod session;

/// Returns version, build timestamp, git SHA, and platform info.
#[tauri::command]
fn app_about() -> Value {
    json!({
        "version": env!("CARGO_PKG_VERSION"),
        "buildTimestamp": env!("BUILD_TIMESTAMP"),
        "gitSha": env!("BUILD_GIT_SHA"),
        "platform": std::env::consts::OS,
        "arch": std::env::consts::ARCH,
    })
}

pub fn run() {
    // Initialize structured logging (console + rolling file)
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,amigo_admin_lib=debug"));

    // Prune old log files before setting up the appender
    logging::prune_old_logs();

    let log_dir = logging::get_log_dir();
    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(&log_dir, "admin");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);
    let console_layer = fmt::layer().with_target(true);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    // Keep the guard alive for the lifetime of the app — dropping it flushes logs.
    // We leak it intentionally since the app runs until process exit.
    std::mem::forget(_guard);

    info!("Starting AmigoCake Admin v{}", env!("CARGO_PKG_VERSION"));

    tauri::Builder::default()
        .setup(|app| {
            use tauri::Manager;

            let api = api::ApiClient::new().map_err(|e| e.to_string())?;
            info!(base_url = api.base_url(), "api client ready");
            app.manage(api);

            app.manage(session::SessionState::new(Box::new(session::KeyringStore)));
            app.manage(orders::OrderBoard::default());
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            app_about,
            commands::auth::auth_login,
            commands::auth::auth_check,
            commands::auth::auth_get_session,
            commands::auth::auth_logout,
            commands::dashboard::dashboard_get_stats,
            commands::orders::orders_load,
            commands::orders::orders_search,
            commands::orders::orders_sort,
            commands::orders::orders_set_scope,
            commands::orders::orders_screen_closed,
            commands::orders::order_get,
            commands::orders::order_create,
            commands::orders::order_update_status,
            commands::orders::order_delete,
            commands::products::product_list,
            commands::products::product_get,
            commands::products::product_list_by_category,
            commands::products::product_save,
            commands::products::product_delete,
            commands::recap::recap_load,
            commands::gallery::gallery_list,
        ])
        .run(tauri::generate_context!())
        .expect("error while running AmigoCake Admin");
}
