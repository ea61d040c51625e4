use serde::{Deserialize, Serialize};

use crate::forms::{CategoryForm, FormErrors};
use crate::types::{Category, Identity};

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: FormErrors,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub loading: bool,
    pub categories: Vec<Category>,
}

/// Category form as submitted. `itemCount` may arrive as a number or as the
/// raw text typed into the field.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryFormRequest {
    pub name: String,
    pub item_count: serde_json::Value,
    pub image_url: String,
    pub image_preview: Option<String>,
}

impl From<CategoryFormRequest> for CategoryForm {
    fn from(req: CategoryFormRequest) -> Self {
        CategoryForm {
            name: req.name,
            item_count: item_count_text(&req.item_count),
            image_url: req.image_url,
            image_preview: req.image_preview,
        }
    }
}

pub fn item_count_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CategoryPatchRequest {
    pub name: Option<String>,
    pub item_count: Option<serde_json::Value>,
    pub image_url: Option<String>,
    pub image_preview: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<Identity>,
}
