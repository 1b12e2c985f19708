//! Order list, detail, and manual entry screens.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::ApiClient;
use crate::format;
use crate::models::{CreatedOrder, Order, OrderDraft, OrderUpdate};
use crate::orders::{BoardView, OrderBoard, SortOrder, StatusScope};
use crate::session::SessionState;

/// One rendered list row: the raw order plus the presentation the webview
/// shows directly (formatted price and dates, status badge color).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    #[serde(flatten)]
    pub order: Order,
    pub price_label: String,
    pub pickup_date_label: String,
    pub created_at_label: Option<String>,
    pub status_color: &'static str,
}

fn to_row(order: Order) -> OrderRow {
    OrderRow {
        price_label: format::format_rupiah(order.harga),
        pickup_date_label: format::format_pickup_date(&order.tanggal),
        created_at_label: order.created_at.as_deref().map(format::format_created_at),
        status_color: format::status_color(order.status),
        order,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailView {
    #[serde(flatten)]
    pub row: OrderRow,
    pub payment_proof_url: Option<String>,
}

fn to_detail(order: Order) -> OrderDetailView {
    let payment_proof_url = format::image_url(order.bukti_bayar.as_deref());
    OrderDetailView {
        row: to_row(order),
        payment_proof_url,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderListView {
    pub orders: Vec<OrderRow>,
    pub total: usize,
    pub scope: String,
    pub sort: SortOrder,
    pub empty_message: Option<String>,
}

fn to_list_view(view: BoardView) -> OrderListView {
    let empty_message = if view.orders.is_empty() {
        Some(if !view.query.trim().is_empty() {
            format!("No results for '{}'", view.query.trim())
        } else {
            match view.scope {
                StatusScope::All => "No orders yet".to_string(),
                StatusScope::Only(status) => format!("No {status} orders"),
            }
        })
    } else {
        None
    };
    let orders: Vec<OrderRow> = view.orders.into_iter().map(to_row).collect();
    OrderListView {
        total: orders.len(),
        scope: view.scope.label(),
        sort: view.sort,
        orders,
        empty_message,
    }
}

/// Fetches orders for the given scope and installs them on the board. A load
/// superseded by a newer one leaves the board alone and returns the current
/// view instead.
#[tauri::command]
pub async fn orders_load(
    scope: String,
    api: tauri::State<'_, ApiClient>,
    board: tauri::State<'_, OrderBoard>,
) -> Result<OrderListView, String> {
    let scope = StatusScope::parse(&scope)?;
    let token = board.begin_load(scope);

    let fetched = match scope {
        StatusScope::All => api.list_orders().await,
        StatusScope::Only(status) => api.orders_by_status(status).await,
    }
    .map_err(|e| e.to_string())?;

    if !board.install(token, fetched) {
        debug!("discarding stale order load");
    }
    Ok(to_list_view(board.selection()))
}

#[tauri::command]
pub fn orders_search(
    query: String,
    board: tauri::State<'_, OrderBoard>,
) -> OrderListView {
    board.set_query(&query);
    to_list_view(board.selection())
}

#[tauri::command]
pub fn orders_sort(sort: SortOrder, board: tauri::State<'_, OrderBoard>) -> OrderListView {
    board.set_sort(sort);
    to_list_view(board.selection())
}

/// Narrows or widens the status scope against the already-loaded snapshot,
/// without refetching.
#[tauri::command]
pub fn orders_set_scope(
    scope: String,
    board: tauri::State<'_, OrderBoard>,
) -> Result<OrderListView, String> {
    let scope = StatusScope::parse(&scope)?;
    board.set_scope(scope);
    Ok(to_list_view(board.selection()))
}

/// Called when the list screen closes so late fetch results get dropped.
#[tauri::command]
pub fn orders_screen_closed(board: tauri::State<'_, OrderBoard>) {
    board.invalidate();
}

#[tauri::command]
pub async fn order_get(
    id: i64,
    api: tauri::State<'_, ApiClient>,
) -> Result<OrderDetailView, String> {
    if id <= 0 {
        return Err("Invalid order id".to_string());
    }
    let order = api.get_order(id).await.map_err(|e| e.to_string())?;
    Ok(to_detail(order))
}

/// Manual entry form as typed by the operator. The price arrives as free
/// text (`Rp 1.250.000`, `150000`, ...) and is digit-parsed before submit.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub nama_pemesan: String,
    pub telp: String,
    pub alamat: String,
    pub tanggal: String,
    pub harga: String,
    #[serde(default)]
    pub kategori: Option<String>,
    #[serde(default)]
    pub id_product: Option<i64>,
    #[serde(default)]
    pub diameter: Option<String>,
    #[serde(default)]
    pub varian: Option<String>,
    #[serde(default)]
    pub tulisan: Option<String>,
    #[serde(default)]
    pub waktu: Option<String>,
}

fn build_draft(form: OrderForm, session_user: Option<i64>) -> Result<OrderDraft, String> {
    if form.nama_pemesan.trim().is_empty() {
        return Err("Customer name is required".to_string());
    }
    if form.telp.trim().is_empty() {
        return Err("Phone number is required".to_string());
    }
    if form.alamat.trim().is_empty() {
        return Err("Address is required".to_string());
    }
    if form.tanggal.trim().is_empty() {
        return Err("Pickup date is required".to_string());
    }
    let harga = format::parse_price_input(&form.harga);
    if harga <= 0 {
        return Err("Price must be greater than zero".to_string());
    }

    let kategori = form
        .kategori
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .or_else(|| Some("Custom Cake".to_string()));

    Ok(OrderDraft {
        id_users: session_user,
        kategori,
        id_product: form.id_product,
        nama_pemesan: form.nama_pemesan,
        telp: form.telp,
        alamat: form.alamat,
        tanggal: form.tanggal,
        diameter: form.diameter,
        varian: form.varian,
        tulisan: form.tulisan,
        harga,
        waktu: form.waktu,
    })
}

/// Manual order entry. Required fields are checked before any network call;
/// the session's user id is attached to the draft.
#[tauri::command]
pub async fn order_create(
    form: OrderForm,
    api: tauri::State<'_, ApiClient>,
    session: tauri::State<'_, SessionState>,
) -> Result<CreatedOrder, String> {
    let draft = build_draft(form, session.current().map(|s| s.user_id))?;
    let created = api.create_order(&draft).await.map_err(|e| e.to_string())?;
    info!(order_id = created.id, "manual order created");
    Ok(created)
}

#[tauri::command]
pub async fn order_update_status(
    update: OrderUpdate,
    api: tauri::State<'_, ApiClient>,
) -> Result<String, String> {
    if update.id <= 0 {
        return Err("Invalid order id".to_string());
    }
    let message = api.update_order(&update).await.map_err(|e| e.to_string())?;
    info!(order_id = update.id, status = %update.status, "order status updated");
    Ok(message)
}

#[tauri::command]
pub async fn order_delete(id: i64, api: tauri::State<'_, ApiClient>) -> Result<String, String> {
    if id <= 0 {
        return Err("Invalid order id".to_string());
    }
    let message = api.delete_order(id).await.map_err(|e| e.to_string())?;
    info!(order_id = id, "order deleted");
    Ok(message)
}
