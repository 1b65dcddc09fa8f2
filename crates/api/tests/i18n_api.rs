//! HTTP-level tests for `/languages` and `/translations`, including
//! locale-driven defaults.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, get_with_language, patch_json_auth, post_json_auth, seed_admin,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create(pool: &PgPool, token: &str, uri: &str, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, uri, token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn seed_languages(pool: &PgPool, token: &str) {
    for (code, name, native) in [("en", "English", "English"), ("uz", "Uzbek", "O'zbekcha")] {
        create(
            pool,
            token,
            "/api/v1/languages",
            json!({"code": code, "name": name, "native_name": native}),
        )
        .await;
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn language_crud_and_code_lookup(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    seed_languages(&pool, &admin.token).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/languages/code/UZ").await).await;
    assert_eq!(json["language"]["native_name"], "O'zbekcha");
    assert_eq!(json["language"]["is_active"], true);
    let id = json["language"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/languages/{id}"),
        &admin.token,
        json!({"is_active": false, "expected_version": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/languages?is_active=true").await).await;
    assert_eq!(json["metadata"]["total_records"], 1);
    assert_eq!(json["results"][0]["code"], "en");
}

#[sqlx::test(migrations = "../../migrations")]
async fn language_code_must_be_a_tag(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/languages",
        &admin.token,
        json!({"code": "English!", "name": "English", "native_name": "English"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["error"]["code"].is_string());
}

#[sqlx::test(migrations = "../../migrations")]
async fn translations_default_to_request_locale(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    seed_languages(&pool, &admin.token).await;
    let category = create(
        &pool,
        &admin.token,
        "/api/v1/categories",
        json!({"name": "Phones", "slug": "phones"}),
    )
    .await;
    let entity_id = category["category"]["id"].as_str().unwrap().to_string();

    for (code, value) in [("en", "Phones"), ("uz", "Telefonlar")] {
        create(
            &pool,
            &admin.token,
            "/api/v1/translations",
            json!({
                "table_name": "categories",
                "field_name": "name",
                "entity_id": entity_id,
                "language_code": code,
                "translated_value": value
            }),
        )
        .await;
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_with_language(app, "/api/v1/translations", "uz;q=0.9, en;q=0.5").await).await;
    assert_eq!(json["metadata"]["total_records"], 1);
    assert_eq!(json["results"][0]["translated_value"], "Telefonlar");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/translations?language_codes=en,uz").await).await;
    assert_eq!(json["metadata"]["total_records"], 2);

    let app = common::build_test_app(pool.clone());
    let uri = format!(
        "/api/v1/translations/lookup?table_name=categories&field_name=name&entity_id={entity_id}"
    );
    let json = body_json(get(app, &uri).await).await;
    assert_eq!(json["translation"]["translated_value"], "Phones");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/translations/lookup?table_name=categories").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../../migrations")]
async fn translation_key_is_unique_and_language_must_exist(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    seed_languages(&pool, &admin.token).await;
    let body = json!({
        "table_name": "brands",
        "field_name": "name",
        "entity_id": uuid::Uuid::new_v4(),
        "language_code": "en",
        "translated_value": "Acme"
    });
    create(&pool, &admin.token, "/api/v1/translations", body.clone()).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/translations", &admin.token, body.clone()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .contains("uq_translations_key"));

    let mut unknown = body;
    unknown["language_code"] = json!("fr");
    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/translations", &admin.token, unknown).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../migrations")]
async fn public_reads_ignore_a_bad_token(pool: PgPool) {
    for uri in [
        "/api/v1/translations",
        "/api/v1/categories",
        "/api/v1/languages",
    ] {
        let app = common::build_test_app(pool.clone());
        let response = get_auth(app, uri, "expired-or-forged").await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }

    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/v1/sessions", "expired-or-forged").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
