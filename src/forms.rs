//! Field checks run before any store call.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::types::{Category, NewCategory};

/// Raw category form input, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub item_count: String,
    pub image_url: String,
    /// Data URI produced from a locally selected file.
    pub image_preview: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.item_count.is_none() && self.image_url.is_none()
    }

    pub fn messages(&self) -> Vec<&str> {
        [&self.name, &self.item_count, &self.image_url]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for FormErrors {}

impl CategoryForm {
    /// Form pre-filled for editing an existing category.
    pub fn from_category(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            item_count: category.item_count.to_string(),
            image_url: category.image_url.clone(),
            image_preview: Some(category.image_url.clone()),
        }
    }

    pub fn validate(&self) -> Result<NewCategory, FormErrors> {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.name = Some("Category name is required".to_string());
        }

        let count = self.item_count.trim();
        let item_count = if count.is_empty() {
            errors.item_count = Some("Item count is required".to_string());
            None
        } else {
            match parse_item_count(count) {
                Some(n) => Some(n),
                None => {
                    errors.item_count = Some("Item count must be a positive number".to_string());
                    None
                }
            }
        };

        let image_url = self.image_source();
        if image_url.is_none() {
            errors.image_url = Some("Image URL is required".to_string());
        }

        match (item_count, image_url) {
            (Some(item_count), Some(image_url)) if errors.is_empty() => Ok(NewCategory {
                name: self.name.clone(),
                item_count,
                image_url,
            }),
            _ => Err(errors),
        }
    }

    /// Typed URL wins over the uploaded preview.
    fn image_source(&self) -> Option<String> {
        let url = self.image_url.trim();
        if !url.is_empty() {
            return Some(url.to_string());
        }
        self.image_preview
            .as_ref()
            .filter(|preview| !preview.is_empty())
            .cloned()
    }
}

/// Whole, non-negative counts in any numeric spelling: `8`, `8.0`, `1e3`.
fn parse_item_count(text: &str) -> Option<u32> {
    if let Ok(n) = text.parse::<u32>() {
        return Some(n);
    }
    let value: f64 = text.parse().ok()?;
    let whole = value.is_finite() && value.fract() == 0.0;
    (whole && value >= 0.0 && value <= f64::from(u32::MAX)).then_some(value as u32)
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SignupFormError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, Default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), SignupFormError> {
        if self.password != self.confirm_password {
            return Err(SignupFormError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SignupFormError::PasswordTooShort);
        }
        Ok(())
    }
}
