use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned by the category store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(String);

impl CategoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the id when it was generated by the store.
    pub fn as_millis(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CategoryId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub item_count: u32,
    pub image_url: String,
}

impl Category {
    pub fn from_new(id: CategoryId, new: NewCategory) -> Self {
        Self {
            id,
            name: new.name,
            item_count: new.item_count,
            image_url: new.image_url,
        }
    }

    /// Overwrite every field present in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(item_count) = patch.item_count {
            self.item_count = item_count;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
    }
}

/// Fields of a category before the store assigns its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub item_count: u32,
    pub image_url: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.item_count.is_none() && self.image_url.is_none()
    }
}

impl From<NewCategory> for CategoryPatch {
    fn from(value: NewCategory) -> Self {
        Self {
            name: Some(value.name),
            item_count: Some(value.item_count),
            image_url: Some(value.image_url),
        }
    }
}
