//! HTTP client for the AmigoCake backend.
//!
//! Every endpoint returns the `{success, message, data}` envelope; the client
//! unwraps it centrally so callers see typed payloads or an [`ApiError`].

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use crate::error::ApiError;
use crate::models::{
    CreatedOrder, DashboardStats, Envelope, GalleryItem, Order, OrderDraft, OrderStatus,
    OrderUpdate, Product, ProductDraft, RecapData, User,
};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_BASE_URL: &str = "https://amigocake.com/frontend_costumer/api";

/// Base for payment-proof images referenced by relative path.
pub const IMAGE_BASE_URL: &str = "https://amigocake.com/frontend_costumer/uploads/bukti/";

/// Normalizes a user-supplied base URL: adds a scheme when missing (plain
/// http only for localhost) and strips trailing slashes.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        format!("http://{trimmed}")
    } else {
        format!("https://{trimmed}")
    };
    with_scheme.trim_end_matches('/').to_string()
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client against the production backend, or against
    /// `AMIGO_API_BASE_URL` when set.
    pub fn new() -> Result<Self, ApiError> {
        let base = std::env::var("AMIGO_API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&base)
    }

    pub fn with_base_url(base: &str) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(base);
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| ApiError::from_reqwest(&base_url, &e))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        resource: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Envelope<T>, ApiError> {
        let url = format!("{}/{resource}", self.base_url);
        debug!(%method, %url, "api request");

        let mut request = self.http.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(&self.base_url, &e))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(&self.base_url, &e))?;

        if !status.is_success() {
            // PHP handlers put the real reason in the envelope even on 4xx.
            if let Ok(envelope) = serde_json::from_slice::<Envelope<Value>>(&bytes) {
                if !envelope.message.is_empty() {
                    return Err(ApiError::Status {
                        code: status.as_u16(),
                        message: envelope.message,
                    });
                }
            }
            return Err(ApiError::from_status(status));
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Runs a request expecting a data payload back.
    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        resource: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let envelope = self.dispatch(method, resource, query, body).await?;
        unwrap_envelope(envelope)
    }

    /// Runs a request where only the server message matters (update/delete).
    async fn execute(
        &self,
        method: Method,
        resource: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<String, ApiError> {
        let envelope: Envelope<Value> = self.dispatch(method, resource, query, body).await?;
        if !envelope.success {
            return Err(ApiError::App(envelope.message));
        }
        Ok(envelope.message)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiError> {
        self.fetch(
            Method::POST,
            "users.php",
            &[("action", "login".to_string())],
            Some(json!({ "username": username, "password": password })),
        )
        .await
    }

    pub async fn get_user(&self, id: i64) -> Result<User, ApiError> {
        self.fetch(Method::GET, "users.php", &[("id", id.to_string())], None)
            .await
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.fetch(Method::GET, "orders.php", &[], None).await
    }

    pub async fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, ApiError> {
        self.fetch(
            Method::GET,
            "orders.php",
            &[("status", status.as_str().to_string())],
            None,
        )
        .await
    }

    pub async fn orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, ApiError> {
        self.fetch(
            Method::GET,
            "orders.php",
            &[("user_id", user_id.to_string())],
            None,
        )
        .await
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, ApiError> {
        self.fetch(Method::GET, "orders.php", &[("id", id.to_string())], None)
            .await
    }

    pub async fn create_order(&self, draft: &OrderDraft) -> Result<CreatedOrder, ApiError> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.fetch(Method::POST, "orders.php", &[], Some(body)).await
    }

    pub async fn update_order(&self, update: &OrderUpdate) -> Result<String, ApiError> {
        let body = serde_json::to_value(update).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.execute(Method::PUT, "orders.php", &[], Some(body)).await
    }

    pub async fn delete_order(&self, id: i64) -> Result<String, ApiError> {
        self.execute(Method::DELETE, "orders.php", &[("id", id.to_string())], None)
            .await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.fetch(Method::GET, "products.php", &[], None).await
    }

    pub async fn get_product(&self, id: i64) -> Result<Product, ApiError> {
        self.fetch(Method::GET, "products.php", &[("id", id.to_string())], None)
            .await
    }

    pub async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, ApiError> {
        self.fetch(
            Method::GET,
            "products.php",
            &[("kategori", category.to_string())],
            None,
        )
        .await
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<String, ApiError> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.execute(Method::POST, "products.php", &[], Some(body)).await
    }

    pub async fn update_product(&self, draft: &ProductDraft) -> Result<String, ApiError> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.execute(Method::PUT, "products.php", &[], Some(body)).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<String, ApiError> {
        self.execute(Method::DELETE, "products.php", &[("id", id.to_string())], None)
            .await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.fetch(Method::GET, "statistics.php", &[], None).await
    }

    pub async fn recap(&self, month: u32, year: i32) -> Result<RecapData, ApiError> {
        self.fetch(
            Method::GET,
            "recap.php",
            &[("month", month.to_string()), ("year", year.to_string())],
            None,
        )
        .await
    }

    pub async fn list_gallery(&self) -> Result<Vec<GalleryItem>, ApiError> {
        self.fetch(Method::GET, "galery.php", &[], None).await
    }
}

fn unwrap_envelope<T>(envelope: Envelope<T>) -> Result<T, ApiError> {
    if !envelope.success {
        return Err(ApiError::App(envelope.message));
    }
    envelope
        .data
        .ok_or_else(|| ApiError::Decode("missing data payload".to_string()))
}
