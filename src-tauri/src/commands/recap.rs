//! Monthly recap screen: totals and a per-day revenue series.
//!
//! Like the dashboard, a failed fetch yields zeroed placeholders with the
//! error attached instead of an error result.

use serde::Serialize;
use tracing::warn;

use crate::api::ApiClient;
use crate::format;
use crate::models::RecapData;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecapPoint {
    pub day: u32,
    pub total: i64,
    pub label: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecapView {
    pub recap: RecapData,
    pub month: u32,
    pub year: i32,
    pub total_revenue_label: String,
    pub series: Vec<RecapPoint>,
    pub error: Option<String>,
}

fn build_view(recap: RecapData, month: u32, year: i32, error: Option<String>) -> RecapView {
    // The backend serializes daily totals as strings, sometimes with a
    // decimal part. Anything unparseable counts as zero.
    let series = recap
        .chart
        .iter()
        .map(|point| {
            let total = point.total.parse::<f64>().unwrap_or(0.0) as i64;
            RecapPoint {
                day: point.day,
                total,
                label: format::format_rupiah_short(total),
            }
        })
        .collect();
    RecapView {
        total_revenue_label: format::format_rupiah(recap.total_revenue),
        series,
        recap,
        month,
        year,
        error,
    }
}

#[tauri::command]
pub async fn recap_load(
    month: u32,
    year: i32,
    api: tauri::State<'_, ApiClient>,
) -> Result<RecapView, String> {
    if !(1..=12).contains(&month) {
        return Err(format!("Invalid month: {month}"));
    }
    match api.recap(month, year).await {
        Ok(recap) => Ok(build_view(recap, month, year, None)),
        Err(e) => {
            warn!(month, year, error = %e, "recap fetch failed, serving placeholders");
            Ok(build_view(RecapData::default(), month, year, Some(e.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChartPoint;

    #[test]
    fn chart_strings_parse_with_fallback_to_zero() {
        let recap = RecapData {
            total_orders: 3,
            total_revenue: 1_450_000,
            chart: vec![
                ChartPoint { day: 1, total: "150000".into() },
                ChartPoint { day: 2, total: "200000.50".into() },
                ChartPoint { day: 3, total: "n/a".into() },
            ],
        };
        let view = build_view(recap, 1, 2024, None);
        assert_eq!(view.total_revenue_label, "Rp 1.450.000");
        assert_eq!(view.series[0].total, 150_000);
        assert_eq!(view.series[0].label, "Rp150K");
        assert_eq!(view.series[1].total, 200_000);
        assert_eq!(view.series[2].total, 0);
    }

    #[test]
    fn placeholder_view_keeps_the_requested_period() {
        let view = build_view(RecapData::default(), 7, 2024, Some("offline".into()));
        assert_eq!(view.month, 7);
        assert_eq!(view.year, 2024);
        assert_eq!(view.total_revenue_label, "Rp 0");
        assert!(view.series.is_empty());
        assert_eq!(view.error.as_deref(), Some("offline"));
    }
}
