//! Display formatting: rupiah amounts, Indonesian dates, status colors, and
//! image URL resolution. All helpers are pure and tested directly.

use chrono::{NaiveDate, NaiveDateTime};

use crate::api::IMAGE_BASE_URL;
use crate::models::{Order, OrderStatus};

/// Short Indonesian month names, indexed by month - 1.
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

fn group_thousands(value: i64) -> String {
    let digits = value.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// `1250000` becomes `Rp 1.250.000`. Amounts are whole rupiah.
pub fn format_rupiah(value: i64) -> String {
    format!("Rp {}", group_thousands(value))
}

/// Compact form for chart labels: `Rp2JT`, `Rp150K`, `Rp500`.
pub fn format_rupiah_short(value: i64) -> String {
    if value >= 1_000_000 {
        format!("Rp{}JT", value / 1_000_000)
    } else if value >= 1_000 {
        format!("Rp{}K", value / 1_000)
    } else {
        format!("Rp{value}")
    }
}

/// Parses free-form price input by keeping digits only. Empty input is zero.
pub fn parse_price_input(raw: &str) -> i64 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

fn short_date(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `2024-01-05` becomes `05 Jan 2024`. Unparseable input passes through
/// unchanged so a bad row never hides its raw value.
pub fn format_pickup_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => short_date(date),
        Err(_) => raw.to_string(),
    }
}

/// `2024-01-05 14:30:00` becomes `05 Jan 2024 14:30`; falls back to the
/// date-only format for timestamps without a time part.
pub fn format_created_at(raw: &str) -> String {
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        Ok(ts) => format!("{} {}", short_date(ts.date()), ts.format("%H:%M")),
        Err(_) => format_pickup_date(raw),
    }
}

/// Hex accent color for a status badge.
pub fn status_color(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Process => "#FF9800",
        OrderStatus::Done => "#4CAF50",
        OrderStatus::Cancelled => "#F44336",
    }
}

/// Resolves a stored image reference to a full URL. Absolute URLs pass
/// through; bare filenames are joined onto the uploads base; empty means no
/// image.
pub fn image_url(path: Option<&str>) -> Option<String> {
    let path = path?.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http") {
        return Some(path.to_string());
    }
    Some(format!("{IMAGE_BASE_URL}{path}"))
}

/// One-line summary for the nearest-deadline card:
/// `Black Forest (20cm) - Budi` or `Custom Order - Budi`.
pub fn deadline_summary(order: &Order) -> String {
    let item = order.nama_product.as_deref().unwrap_or("Custom Order");
    match order.diameter.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(diameter) => format!("{item} ({diameter}cm) - {}", order.nama_pemesan),
        None => format!("{item} - {}", order.nama_pemesan),
    }
}

/// Pickup schedule line: `05 Jan 2024 | 14:00` when a time is set,
/// date only otherwise.
pub fn deadline_schedule(order: &Order) -> String {
    let date = format_pickup_date(&order.tanggal);
    match order.waktu.as_deref().filter(|w| !w.trim().is_empty()) {
        Some(waktu) => format!("{date} | {waktu}"),
        None => date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            id: 1,
            id_users: None,
            kategori: None,
            id_product: None,
            nama_pemesan: "Budi".into(),
            telp: "0812".into(),
            alamat: "Jl. A".into(),
            tanggal: "2024-01-05".into(),
            diameter: None,
            varian: None,
            tulisan: None,
            harga: 150_000,
            waktu: None,
            status: OrderStatus::Process,
            created_at: None,
            nama_product: None,
            payment_method: None,
            bukti_bayar: None,
        }
    }

    #[test]
    fn rupiah_groups_with_dots() {
        assert_eq!(format_rupiah(0), "Rp 0");
        assert_eq!(format_rupiah(950), "Rp 950");
        assert_eq!(format_rupiah(1_250_000), "Rp 1.250.000");
        assert_eq!(format_rupiah(12_000_500), "Rp 12.000.500");
    }

    #[test]
    fn short_rupiah_uses_indonesian_suffixes() {
        assert_eq!(format_rupiah_short(2_500_000), "Rp2JT");
        assert_eq!(format_rupiah_short(150_000), "Rp150K");
        assert_eq!(format_rupiah_short(500), "Rp500");
        assert_eq!(format_rupiah_short(1_000), "Rp1K");
        assert_eq!(format_rupiah_short(1_000_000), "Rp1JT");
    }

    #[test]
    fn price_input_keeps_digits_only() {
        assert_eq!(parse_price_input("Rp 1.250.000"), 1_250_000);
        assert_eq!(parse_price_input("150000"), 150_000);
        assert_eq!(parse_price_input(""), 0);
        assert_eq!(parse_price_input("abc"), 0);
    }

    #[test]
    fn pickup_dates_use_short_indonesian_months() {
        assert_eq!(format_pickup_date("2024-01-05"), "05 Jan 2024");
        assert_eq!(format_pickup_date("2024-05-20"), "20 Mei 2024");
        assert_eq!(format_pickup_date("2024-08-09"), "09 Agu 2024");
        assert_eq!(format_pickup_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn created_at_includes_the_time() {
        assert_eq!(format_created_at("2024-01-05 14:30:00"), "05 Jan 2024 14:30");
        assert_eq!(format_created_at("2024-01-05"), "05 Jan 2024");
    }

    #[test]
    fn status_colors_match_the_badge_palette() {
        assert_eq!(status_color(OrderStatus::Process), "#FF9800");
        assert_eq!(status_color(OrderStatus::Done), "#4CAF50");
        assert_eq!(status_color(OrderStatus::Cancelled), "#F44336");
    }

    #[test]
    fn image_urls_join_relative_paths_only() {
        assert_eq!(image_url(None), None);
        assert_eq!(image_url(Some("")), None);
        assert_eq!(image_url(Some("  ")), None);
        assert_eq!(
            image_url(Some("https://cdn.example.com/a.jpg")),
            Some("https://cdn.example.com/a.jpg".to_string())
        );
        assert_eq!(
            image_url(Some("bukti_7.jpg")),
            Some(format!("{IMAGE_BASE_URL}bukti_7.jpg"))
        );
    }

    #[test]
    fn deadline_lines_adapt_to_optional_fields() {
        let mut order = sample_order();
        assert_eq!(deadline_summary(&order), "Custom Order - Budi");
        assert_eq!(deadline_schedule(&order), "05 Jan 2024");

        order.nama_product = Some("Black Forest".into());
        order.diameter = Some("20".into());
        order.waktu = Some("14:00".into());
        assert_eq!(deadline_summary(&order), "Black Forest (20cm) - Budi");
        assert_eq!(deadline_schedule(&order), "05 Jan 2024 | 14:00");
    }
}
