//! Brand entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::filters::CommonFilter;
use storefront_core::sort::SortField;
use storefront_core::types::{DbId, Timestamp, Version};

pub const SORT_SAFELIST: &[&str] = &["name", "slug", "created_at", "updated_at"];

pub const DEFAULT_SORT: &[SortField] = &[SortField::asc("name")];

/// A row from the `brands` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
    pub version: Version,
}

#[derive(Debug, Clone)]
pub struct CreateBrand {
    pub name: String,
    pub slug: String,
    pub logo_url: Option<String>,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
}

/// Partial update; `Some(None)` for `logo_url` clears it.
#[derive(Debug, Clone)]
pub struct UpdateBrand {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub logo_url: Option<Option<String>>,
    pub updated_by_id: DbId,
}

impl Brand {
    pub fn apply(&mut self, patch: &UpdateBrand) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(slug) = &patch.slug {
            self.slug.clone_from(slug);
        }
        if let Some(logo_url) = &patch.logo_url {
            self.logo_url.clone_from(logo_url);
        }
        self.updated_by_id = Some(patch.updated_by_id);
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrandFilter {
    pub common: CommonFilter,
    pub names: Vec<String>,
    pub slugs: Vec<String>,
}
