//! Dashboard screen: aggregate stats with formatted labels.
//!
//! A failed fetch never errors out of this command. The screen renders zeroed
//! placeholders alongside the error message so the operator still gets a
//! usable shell while the backend is unreachable.

use serde::Serialize;
use tracing::warn;

use crate::api::ApiClient;
use crate::format;
use crate::models::DashboardStats;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub revenue_today_label: String,
    pub revenue_month_label: String,
    pub deadline_label: Option<String>,
    pub deadline_schedule: Option<String>,
    pub error: Option<String>,
}

fn build_view(stats: DashboardStats, error: Option<String>) -> DashboardView {
    let deadline_label = stats.nearest_deadline.as_ref().map(format::deadline_summary);
    let deadline_schedule = stats.nearest_deadline.as_ref().map(format::deadline_schedule);
    DashboardView {
        revenue_today_label: format::format_rupiah(stats.revenue_today),
        revenue_month_label: format::format_rupiah(stats.revenue_month),
        deadline_label,
        deadline_schedule,
        stats,
        error,
    }
}

#[tauri::command]
pub async fn dashboard_get_stats(
    api: tauri::State<'_, ApiClient>,
) -> Result<DashboardView, String> {
    match api.dashboard_stats().await {
        Ok(stats) => Ok(build_view(stats, None)),
        Err(e) => {
            warn!(error = %e, "dashboard fetch failed, serving placeholders");
            Ok(build_view(DashboardStats::default(), Some(e.to_string())))
        }
    }
}
