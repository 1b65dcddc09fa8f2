//! Translation entity model and DTOs.
//!
//! A translation points at `(table_name, field_name, entity_id)` by
//! convention only; there is no foreign key on `entity_id`. The full
//! [`TranslationKey`] is unique.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::filters::CommonFilter;
use storefront_core::sort::SortField;
use storefront_core::types::{DbId, Timestamp, Version};

pub const SORT_SAFELIST: &[&str] = &[
    "table_name",
    "field_name",
    "language_code",
    "translated_value",
    "created_at",
    "updated_at",
];

pub const DEFAULT_SORT: &[SortField] = &[
    SortField::asc("table_name"),
    SortField::asc("field_name"),
    SortField::asc("language_code"),
];

/// A row from the `translations` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Translation {
    pub id: DbId,
    pub table_name: String,
    pub field_name: String,
    pub entity_id: DbId,
    pub language_code: String,
    pub translated_value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
    pub version: Version,
}

/// Natural key of a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationKey {
    pub table_name: String,
    pub field_name: String,
    pub entity_id: DbId,
    pub language_code: String,
}

#[derive(Debug, Clone)]
pub struct CreateTranslation {
    pub key: TranslationKey,
    pub translated_value: String,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
}

/// The natural key is immutable; only the translated text changes.
#[derive(Debug, Clone)]
pub struct UpdateTranslation {
    pub translated_value: Option<String>,
    pub updated_by_id: DbId,
}

impl Translation {
    pub fn apply(&mut self, patch: &UpdateTranslation) {
        if let Some(value) = &patch.translated_value {
            self.translated_value.clone_from(value);
        }
        self.updated_by_id = Some(patch.updated_by_id);
    }

    pub fn key(&self) -> TranslationKey {
        TranslationKey {
            table_name: self.table_name.clone(),
            field_name: self.field_name.clone(),
            entity_id: self.entity_id,
            language_code: self.language_code.clone(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TranslationFilter {
    pub common: CommonFilter,
    pub table_names: Vec<String>,
    pub field_names: Vec<String>,
    pub entity_ids: Vec<DbId>,
    pub language_codes: Vec<String>,
}
