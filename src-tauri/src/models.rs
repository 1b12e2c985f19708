//! Wire types for the AmigoCake REST API.
//!
//! Field names mirror the PHP backend's JSON exactly: the users and products
//! tables expose UPPER_SNAKE columns while orders use lower_snake, so structs
//! carry explicit serde renames instead of a blanket `rename_all`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Uniform `{success, message, data}` wrapper around every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "ID_USERS")]
    pub id: i64,
    #[serde(rename = "NAMA")]
    pub name: String,
    #[serde(rename = "USERNAME")]
    pub username: String,
    #[serde(rename = "LEVEL")]
    pub level: String,
}

/// Order lifecycle status. The wire format uses these exact strings; anything
/// else is rejected at decode time rather than silently falling through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Process,
    Done,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Process,
        OrderStatus::Done,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Process => "Process",
            OrderStatus::Done => "Done",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Process" => Ok(OrderStatus::Process),
            "Done" => Ok(OrderStatus::Done),
            "Cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(format!("Unknown order status: {other}")),
        }
    }
}

/// A cake order as returned by `orders.php`.
///
/// `nama_pemesan` (customer name), `telp`, `alamat`, and `tanggal`
/// (pickup date, `YYYY-MM-DD`) are always present; everything else depends on
/// whether the order came from the catalog or was entered manually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub id_users: Option<i64>,
    #[serde(default)]
    pub kategori: Option<String>,
    #[serde(default)]
    pub id_product: Option<i64>,
    pub nama_pemesan: String,
    pub telp: String,
    pub alamat: String,
    pub tanggal: String,
    #[serde(default)]
    pub diameter: Option<String>,
    #[serde(default)]
    pub varian: Option<String>,
    #[serde(default)]
    pub tulisan: Option<String>,
    #[serde(default)]
    pub harga: i64,
    #[serde(default)]
    pub waktu: Option<String>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, rename = "NAMA_PRODUCT")]
    pub nama_product: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub bukti_bayar: Option<String>,
}

/// Create payload for `POST orders.php` (manual order entry).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub id_users: Option<i64>,
    #[serde(default)]
    pub kategori: Option<String>,
    #[serde(default)]
    pub id_product: Option<i64>,
    pub nama_pemesan: String,
    pub telp: String,
    pub alamat: String,
    pub tanggal: String,
    #[serde(default)]
    pub diameter: Option<String>,
    #[serde(default)]
    pub varian: Option<String>,
    #[serde(default)]
    pub tulisan: Option<String>,
    pub harga: i64,
    #[serde(default)]
    pub waktu: Option<String>,
}

/// Update payload for `PUT orders.php`. The server expects the required order
/// fields echoed back alongside the new status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub id: i64,
    pub status: OrderStatus,
    pub nama_pemesan: String,
    pub telp: String,
    pub alamat: String,
    pub tanggal: String,
    pub harga: i64,
}

/// `POST orders.php` responds with the created row id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedOrder {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "ID_PRODUCT")]
    pub id: i64,
    #[serde(rename = "NAMA_PRODUCT")]
    pub name: String,
    #[serde(rename = "KATEGORI_PRODUCT")]
    pub category: String,
    #[serde(rename = "DIAMETER_SIZE", default)]
    pub diameter: String,
    #[serde(rename = "DESKRIPSI_PRODUCT", default)]
    pub description: String,
    #[serde(rename = "HARGA", default)]
    pub price: i64,
    #[serde(rename = "PATH_GAMBAR", default)]
    pub image_path: String,
}

/// Create/update payload for `products.php`. Unlike the read model, the write
/// side accepts plain lowercase field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub nama: String,
    pub kategori: String,
    #[serde(default)]
    pub diameter: String,
    #[serde(default)]
    pub deskripsi: String,
    pub harga: i64,
}

/// Aggregate dashboard snapshot from `statistics.php`. Recomputed server-side
/// on every fetch; never mutated locally. Revenue values are whole rupiah.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_orders: i64,
    #[serde(default)]
    pub active_orders: i64,
    #[serde(default)]
    pub revenue_today: i64,
    #[serde(default)]
    pub revenue_month: i64,
    #[serde(default)]
    pub nearest_deadline: Option<Order>,
    #[serde(default)]
    pub recent_orders: Option<Vec<Order>>,
}

/// Monthly recap from `recap.php`. Bespoke response shape: the envelope
/// layout matches the other endpoints but the daily totals arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecapData {
    #[serde(rename = "totalOrder", default)]
    pub total_orders: i64,
    #[serde(rename = "totalPendapatan", default)]
    pub total_revenue: i64,
    #[serde(default)]
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub day: u32,
    pub total: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: i64,
    #[serde(rename = "nama_kegiatan")]
    pub title: String,
    pub image_path: String,
    #[serde(default)]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_exact_strings() {
        for status in OrderStatus::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: OrderStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn order_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<OrderStatus>("\"process\"").is_err());
        assert!(serde_json::from_str::<OrderStatus>("\"Pending\"").is_err());
    }

    #[test]
    fn order_decodes_with_minimal_fields() {
        let json = r#"{
            "id": 7,
            "nama_pemesan": "Budi",
            "telp": "0812",
            "alamat": "Jl. Mawar 1",
            "tanggal": "2024-03-10"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 7);
        assert_eq!(order.status, OrderStatus::Process);
        assert_eq!(order.harga, 0);
        assert!(order.created_at.is_none());
        assert!(order.nama_product.is_none());
    }

    #[test]
    fn user_decodes_upper_snake_columns() {
        let json = r#"{"ID_USERS": 3, "NAMA": "Siti", "USERNAME": "siti", "LEVEL": "ADMIN"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.level, "ADMIN");
    }

    #[test]
    fn recap_decodes_string_totals() {
        let json = r#"{
            "totalOrder": 12,
            "totalPendapatan": 3500000,
            "chart": [{"day": 1, "total": "150000"}, {"day": 5, "total": "200000.50"}]
        }"#;
        let recap: RecapData = serde_json::from_str(json).unwrap();
        assert_eq!(recap.total_orders, 12);
        assert_eq!(recap.chart.len(), 2);
        assert_eq!(recap.chart[0].total, "150000");
    }

    #[test]
    fn product_draft_omits_id_when_creating() {
        let draft = ProductDraft {
            id: None,
            nama: "Black Forest".into(),
            kategori: "Tart".into(),
            diameter: "20".into(),
            deskripsi: String::new(),
            harga: 250_000,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["nama"], "Black Forest");
    }
}
