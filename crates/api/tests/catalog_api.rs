//! HTTP-level tests for `/categories` and `/brands`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get, patch_json_auth, post_json, post_json_auth, seed_admin,
    seed_customer,
};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create_category(pool: &PgPool, token: &str, body: Value) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, "/api/v1/categories", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["category"].clone()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn create_returns_201_with_location(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/categories",
        &admin.token,
        json!({"name": "Electronics", "slug": "electronics"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response.headers()["location"].to_str().unwrap().to_string();
    let json = body_json(response).await;
    let id = json["category"]["id"].as_str().unwrap();

    assert_eq!(location, format!("/api/v1/categories/{id}"));
    assert_eq!(json["category"]["version"], 1);
    assert_eq!(json["category"]["created_by_id"], admin.user.id.to_string());
}

#[sqlx::test(migrations = "../../migrations")]
async fn create_requires_admin(pool: PgPool) {
    let customer = seed_customer(&pool, "+998901112233").await;
    let body = json!({"name": "Electronics", "slug": "electronics"});

    let app = common::build_test_app(pool.clone());
    let response = post_json(app, "/api/v1/categories", body.clone()).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool);
    let response = post_json_auth(app, "/api/v1/categories", &customer.token, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(response).await["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../migrations")]
async fn invalid_fields_return_field_map(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/categories",
        &admin.token,
        json!({"name": "  ", "slug": "Not A Slug", "image_url": "nope"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"]["name"].is_string());
    assert!(json["error"]["slug"].is_string());
    assert!(json["error"]["image_url"].is_string());
}

#[sqlx::test(migrations = "../../migrations")]
async fn duplicate_slug_is_a_constraint_violation(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    create_category(&pool, &admin.token, json!({"name": "Phones", "slug": "phones"})).await;

    let app = common::build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/categories",
        &admin.token,
        json!({"name": "Mobile", "slug": "phones"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONSTRAINT_VIOLATION");
    assert!(json["error"].as_str().unwrap().contains("uq_categories_slug"));
}

#[sqlx::test(migrations = "../../migrations")]
async fn unknown_parent_is_a_constraint_violation(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/categories",
        &admin.token,
        json!({"name": "Orphan", "slug": "orphan", "parent_id": uuid::Uuid::new_v4()}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn get_by_id_and_slug(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let created = create_category(&pool, &admin.token, json!({"name": "Audio", "slug": "audio"})).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/categories/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["category"]["slug"], "audio");

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/categories/slug/audio").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["category"]["id"], id);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories/slug/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_returns_envelope_sorted_and_paged(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    for i in 0..5 {
        create_category(
            &pool,
            &admin.token,
            json!({"name": format!("Cat {i}"), "slug": format!("cat-{i}")}),
        )
        .await;
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories?sort=-name,bogus&page=2&page_size=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["metadata"]["current_page"], 2);
    assert_eq!(json["metadata"]["page_size"], 2);
    assert_eq!(json["metadata"]["first_page"], 1);
    assert_eq!(json["metadata"]["last_page"], 3);
    assert_eq!(json["metadata"]["total_records"], 5);

    let names: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Cat 2", "Cat 1"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_filters_by_search_and_slug(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    create_category(&pool, &admin.token, json!({"name": "Smart Phones", "slug": "phones"})).await;
    create_category(&pool, &admin.token, json!({"name": "Laptops", "slug": "laptops"})).await;

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/categories?search=phones").await).await;
    assert_eq!(json["metadata"]["total_records"], 1);
    assert_eq!(json["results"][0]["slug"], "phones");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/categories?slugs=laptops,unknown").await).await;
    assert_eq!(json["results"][0]["name"], "Laptops");
}

#[sqlx::test(migrations = "../../migrations")]
async fn empty_list_has_zero_metadata(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/categories").await).await;
    assert_eq!(json["results"], json!([]));
    assert_eq!(json["metadata"]["total_records"], 0);
    assert_eq!(json["metadata"]["current_page"], 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn page_past_the_end_has_zero_metadata(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    for slug in ["tv", "audio", "cameras"] {
        create_category(&pool, &admin.token, json!({"name": slug, "slug": slug})).await;
    }

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/categories?page=3&page_size=1").await).await;
    assert_eq!(json["metadata"]["last_page"], 3);
    assert_eq!(json["results"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories?page=5&page_size=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["results"], json!([]));
    assert_eq!(json["metadata"]["total_records"], 0);
    assert_eq!(json["metadata"]["last_page"], 0);
}

#[sqlx::test(migrations = "../../migrations")]
async fn out_of_range_paging_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/categories?page_size=101").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["error"]["page_size"].is_string());

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/categories?created_from=2024-05-02&created_to=2024-05-01").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn patch_bumps_version_and_keeps_absent_fields(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let created = create_category(
        &pool,
        &admin.token,
        json!({"name": "TV", "slug": "tv", "image_url": "https://cdn.example.com/tv.png"}),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/categories/{id}"),
        &admin.token,
        json!({"name": "Television", "expected_version": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["category"]["name"], "Television");
    assert_eq!(json["category"]["slug"], "tv");
    assert_eq!(json["category"]["image_url"], "https://cdn.example.com/tv.png");
    assert_eq!(json["category"]["version"], 2);

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/api/v1/categories/{id}"),
        &admin.token,
        json!({"image_url": null}),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["category"]["image_url"], Value::Null);
    assert_eq!(json["category"]["version"], 3);
}

#[sqlx::test(migrations = "../../migrations")]
async fn stale_expected_version_is_409(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let created = create_category(&pool, &admin.token, json!({"name": "TV", "slug": "tv"})).await;
    let uri = format!("/api/v1/categories/{}", created["id"].as_str().unwrap());

    let app = common::build_test_app(pool.clone());
    let first = patch_json_auth(app, &uri, &admin.token, json!({"name": "A", "expected_version": 1})).await;
    assert_eq!(first.status(), StatusCode::OK);

    let app = common::build_test_app(pool.clone());
    let second = patch_json_auth(app, &uri, &admin.token, json!({"name": "B", "expected_version": 1})).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await["code"], "EDIT_CONFLICT");

    let app = common::build_test_app(pool);
    let json = body_json(get(app, &uri).await).await;
    assert_eq!(json["category"]["name"], "A");
}

#[sqlx::test(migrations = "../../migrations")]
async fn category_cannot_be_its_own_parent(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let created = create_category(&pool, &admin.token, json!({"name": "Loop", "slug": "loop"})).await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = patch_json_auth(
        app,
        &format!("/api/v1/categories/{id}"),
        &admin.token,
        json!({"parent_id": id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body_json(response).await["error"]["parent_id"].is_string());
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_then_missing(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    let created = create_category(&pool, &admin.token, json!({"name": "Gone", "slug": "gone"})).await;
    let uri = format!("/api/v1/categories/{}", created["id"].as_str().unwrap());

    let app = common::build_test_app(pool.clone());
    assert_eq!(delete_auth(app, &uri, &admin.token).await.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool.clone());
    assert_eq!(delete_auth(app, &uri, &admin.token).await.status(), StatusCode::NOT_FOUND);

    let app = common::build_test_app(pool);
    assert_eq!(get(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn delete_by_slug(pool: PgPool) {
    let admin = seed_admin(&pool).await;
    create_category(&pool, &admin.token, json!({"name": "Gone", "slug": "gone"})).await;

    let app = common::build_test_app(pool.clone());
    let response = delete_auth(app, "/api/v1/categories/slug/gone", &admin.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    assert_eq!(
        get(app, "/api/v1/categories/slug/gone").await.status(),
        StatusCode::NOT_FOUND
    );
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn brand_lifecycle(pool: PgPool) {
    let admin = seed_admin(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/brands",
        &admin.token,
        json!({"name": "Acme", "slug": "acme", "logo_url": "https://cdn.example.com/acme.svg"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["brand"]["id"].as_str().unwrap().to_string();

    let app = common::build_test_app(pool.clone());
    let response = patch_json_auth(
        app,
        &format!("/api/v1/brands/{id}"),
        &admin.token,
        json!({"logo_url": "not a url"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let app = common::build_test_app(pool.clone());
    let json = body_json(get(app, "/api/v1/brands/slug/acme").await).await;
    assert_eq!(json["brand"]["id"], id);
    assert_eq!(json["brand"]["version"], 1);

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/brands").await).await;
    assert_eq!(json["metadata"]["total_records"], 1);
}
