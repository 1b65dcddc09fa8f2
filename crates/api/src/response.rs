//! Shared response envelope types for API handlers.
//!
//! - Single items: `{ "<entity>": {...} }` via [`Item`]
//! - Creation: [`Created`], an [`Item`] with `201` and a `Location` header
//! - Lists: `{ "metadata": {...}, "results": [...] }` via [`ListResponse`]

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use storefront_core::pagination::Metadata;

/// A single entity wrapped under its singular name.
///
/// ```ignore
/// Ok(Item::new("category", category))
/// ```
#[derive(Debug)]
pub struct Item<T> {
    key: &'static str,
    value: T,
}

impl<T> Item<T> {
    pub fn new(key: &'static str, value: T) -> Self {
        Self { key, value }
    }
}

impl<T: Serialize> Serialize for Item<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.key, &self.value)?;
        map.end()
    }
}

impl<T: Serialize> IntoResponse for Item<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// `201 Created` with a `Location` header pointing at the new resource.
#[derive(Debug)]
pub struct Created<T> {
    location: String,
    item: Item<T>,
}

impl<T> Created<T> {
    pub fn new(location: String, key: &'static str, value: T) -> Self {
        Self {
            location,
            item: Item::new(key, value),
        }
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (
            StatusCode::CREATED,
            [(header::LOCATION, self.location)],
            Json(self.item),
        )
            .into_response()
    }
}

/// Standard list envelope.
///
/// The total comes from a window count over the returned rows, so a page
/// past the end carries all-zero metadata even when earlier pages have
/// results. Clients should page using `last_page` from a non-empty page.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub metadata: Metadata,
    pub results: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new((results, metadata): (Vec<T>, Metadata)) -> Self {
        Self { metadata, results }
    }
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_is_keyed_by_entity_name() {
        let json = serde_json::to_value(Item::new("brand", serde_json::json!({"name": "Acme"})))
            .unwrap();
        assert_eq!(json, serde_json::json!({"brand": {"name": "Acme"}}));
    }

    #[test]
    fn created_sets_status_and_location() {
        let response = Created::new("/api/v1/brands/1".into(), "brand", 1).into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[header::LOCATION], "/api/v1/brands/1");
    }

    #[test]
    fn list_envelope_shape() {
        let list = ListResponse::new((vec![1, 2], Metadata::default()));
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["results"], serde_json::json!([1, 2]));
        assert_eq!(json["metadata"]["total_records"], 0);
    }
}
