//! Category suggestions endpoint

use api_types::categories::Categories;
use axum::Json;

pub async fn list() -> Json<Categories> {
    Json(Categories {
        categories: engine::default_categories(),
    })
}
