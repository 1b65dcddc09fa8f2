//! Category entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::filters::CommonFilter;
use storefront_core::sort::SortField;
use storefront_core::types::{DbId, Timestamp, Version};

/// Columns a category list may be sorted by.
pub const SORT_SAFELIST: &[&str] = &["name", "slug", "created_at", "updated_at"];

/// Order used when the client sends no usable sort key.
pub const DEFAULT_SORT: &[SortField] = &[SortField::asc("name")];

/// A row from the `categories` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub parent_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
    pub version: Version,
}

/// DTO for creating a new category.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub parent_id: Option<DbId>,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
}

/// Partial update. `image_url` and `parent_id` are nullable columns, so the
/// outer `Option` means "leave alone" and `Some(None)` clears the value.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub image_url: Option<Option<String>>,
    pub parent_id: Option<Option<DbId>>,
    pub updated_by_id: DbId,
}

impl UpdateCategory {
    /// An empty patch that only records who touched the row.
    pub fn by(updated_by_id: DbId) -> Self {
        Self {
            name: None,
            slug: None,
            image_url: None,
            parent_id: None,
            updated_by_id,
        }
    }
}

impl Category {
    /// Overwrite the fields present in `patch`, keeping the rest.
    pub fn apply(&mut self, patch: &UpdateCategory) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(slug) = &patch.slug {
            self.slug.clone_from(slug);
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url.clone_from(image_url);
        }
        if let Some(parent_id) = patch.parent_id {
            self.parent_id = parent_id;
        }
        self.updated_by_id = Some(patch.updated_by_id);
    }
}

/// List filter for categories.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilter {
    pub common: CommonFilter,
    pub names: Vec<String>,
    pub slugs: Vec<String>,
    pub parent_ids: Vec<DbId>,
}
