//! Gallery screen: activity photos with resolved image URLs.

use serde::Serialize;

use crate::api::ApiClient;
use crate::format;
use crate::models::GalleryItem;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryView {
    pub id: i64,
    pub title: String,
    pub image_url: Option<String>,
    pub created_at: String,
}

fn to_view(item: GalleryItem) -> GalleryView {
    GalleryView {
        id: item.id,
        title: item.title,
        image_url: format::image_url(Some(&item.image_path)),
        created_at: item.created_at,
    }
}

#[tauri::command]
pub async fn gallery_list(api: tauri::State<'_, ApiClient>) -> Result<Vec<GalleryView>, String> {
    let items = api.list_gallery().await.map_err(|e| e.to_string())?;
    Ok(items.into_iter().map(to_view).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::IMAGE_BASE_URL;

    #[test]
    fn relative_paths_resolve_against_the_uploads_base() {
        let view = to_view(GalleryItem {
            id: 4,
            title: "Ulang Tahun".into(),
            image_path: "kegiatan_4.jpg".into(),
            created_at: "2024-02-01 09:00:00".into(),
        });
        assert_eq!(
            view.image_url.as_deref(),
            Some(format!("{IMAGE_BASE_URL}kegiatan_4.jpg").as_str())
        );
    }

    #[test]
    fn missing_images_stay_none() {
        let view = to_view(GalleryItem {
            id: 5,
            title: "Tanpa Foto".into(),
            image_path: String::new(),
            created_at: String::new(),
        });
        assert!(view.image_url.is_none());
    }
}
