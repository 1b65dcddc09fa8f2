//! Language entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use storefront_core::filters::CommonFilter;
use storefront_core::sort::SortField;
use storefront_core::types::{DbId, Timestamp, Version};

pub const SORT_SAFELIST: &[&str] = &["code", "name", "native_name", "created_at", "updated_at"];

pub const DEFAULT_SORT: &[SortField] = &[SortField::asc("code")];

/// A row from the `languages` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Language {
    pub id: DbId,
    /// Lowercase tag such as `en` or `pt-br`. Translations reference this.
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
    pub version: Version,
}

#[derive(Debug, Clone)]
pub struct CreateLanguage {
    pub code: String,
    pub name: String,
    pub native_name: String,
    pub is_active: bool,
    pub created_by_id: Option<DbId>,
    pub updated_by_id: Option<DbId>,
}

#[derive(Debug, Clone)]
pub struct UpdateLanguage {
    pub code: Option<String>,
    pub name: Option<String>,
    pub native_name: Option<String>,
    pub is_active: Option<bool>,
    pub updated_by_id: DbId,
}

impl Language {
    pub fn apply(&mut self, patch: &UpdateLanguage) {
        if let Some(code) = &patch.code {
            self.code.clone_from(code);
        }
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(native_name) = &patch.native_name {
            self.native_name.clone_from(native_name);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
        self.updated_by_id = Some(patch.updated_by_id);
    }
}

#[derive(Debug, Clone, Default)]
pub struct LanguageFilter {
    pub common: CommonFilter,
    pub codes: Vec<String>,
    pub names: Vec<String>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn deactivating_keeps_names() {
        let now = Utc::now();
        let mut language = Language {
            id: Uuid::new_v4(),
            code: "uz".into(),
            name: "Uzbek".into(),
            native_name: "O'zbekcha".into(),
            is_active: true,
            created_at: now,
            updated_at: now,
            created_by_id: None,
            updated_by_id: None,
            version: 3,
        };

        language.apply(&UpdateLanguage {
            code: None,
            name: None,
            native_name: None,
            is_active: Some(false),
            updated_by_id: Uuid::new_v4(),
        });

        assert!(!language.is_active);
        assert_eq!(language.code, "uz");
        assert_eq!(language.native_name, "O'zbekcha");
    }
}
