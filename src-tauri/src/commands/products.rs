//! Product catalog screens.

use tracing::info;

use crate::api::ApiClient;
use crate::models::{Product, ProductDraft};

#[tauri::command]
pub async fn product_list(api: tauri::State<'_, ApiClient>) -> Result<Vec<Product>, String> {
    api.list_products().await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn product_get(id: i64, api: tauri::State<'_, ApiClient>) -> Result<Product, String> {
    if id <= 0 {
        return Err("Invalid product id".to_string());
    }
    api.get_product(id).await.map_err(|e| e.to_string())
}

#[tauri::command]
pub async fn product_list_by_category(
    category: String,
    api: tauri::State<'_, ApiClient>,
) -> Result<Vec<Product>, String> {
    let category = category.trim();
    if category.is_empty() {
        return api.list_products().await.map_err(|e| e.to_string());
    }
    api.products_by_category(category)
        .await
        .map_err(|e| e.to_string())
}

/// Creates or updates a product depending on whether the draft carries an id.
#[tauri::command]
pub async fn product_save(
    draft: ProductDraft,
    api: tauri::State<'_, ApiClient>,
) -> Result<String, String> {
    if draft.nama.trim().is_empty() {
        return Err("Product name is required".to_string());
    }
    if draft.kategori.trim().is_empty() {
        return Err("Category is required".to_string());
    }
    if draft.harga <= 0 {
        return Err("Price must be greater than zero".to_string());
    }

    let message = match draft.id {
        Some(id) => {
            let message = api.update_product(&draft).await.map_err(|e| e.to_string())?;
            info!(product_id = id, "product updated");
            message
        }
        None => {
            let message = api.create_product(&draft).await.map_err(|e| e.to_string())?;
            info!(name = %draft.nama, "product created");
            message
        }
    };
    Ok(message)
}

#[tauri::command]
pub async fn product_delete(id: i64, api: tauri::State<'_, ApiClient>) -> Result<String, String> {
    if id <= 0 {
        return Err("Invalid product id".to_string());
    }
    let message = api.delete_product(id).await.map_err(|e| e.to_string())?;
    info!(product_id = id, "product deleted");
    Ok(message)
}
