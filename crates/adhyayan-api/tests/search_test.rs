//! Search API integration tests.
//!
//! Run with: `cargo test -p adhyayan-api --test search_test`

mod helpers;

use helpers::auth::{register_admin, register_test_user};
use helpers::fixtures::{note_upload, upload, upload_approved};
use helpers::{api_path, setup_test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_search_requires_query() {
    let app = setup_test_app().await;
    let client = app.client();

    let missing = client.get(&api_path("/search")).await;
    assert_eq!(missing.status_code(), 400);
    let data: Value = missing.json();
    assert!(data["error"].as_str().unwrap_or("").contains("required"));

    let blank = client
        .get(&api_path("/search"))
        .add_query_param("q", "   ")
        .await;
    assert_eq!(blank.status_code(), 400);
}

#[tokio::test]
async fn test_search_ranks_title_above_tags() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let admin = register_admin(client).await;

    let mut by_tag = note_upload("Graph algorithms");
    by_tag["tags"] = json!(["dijkstra", "bfs"]);
    let by_tag = upload_approved(client, &uploader, &admin, by_tag).await;

    let by_title =
        upload_approved(client, &uploader, &admin, note_upload("Dijkstra walkthrough")).await;

    upload_approved(client, &uploader, &admin, note_upload("Sorting")).await;
    upload(client, &uploader, note_upload("Dijkstra draft")).await;

    let response = client
        .get(&api_path("/search"))
        .add_query_param("q", "Dijkstra")
        .await;
    assert_eq!(response.status_code(), 200);
    let data: Value = response.json();
    assert_eq!(data["query"], "Dijkstra");
    assert_eq!(data["count"], 2);
    assert_eq!(data["results"][0]["id"], by_title.to_string());
    assert_eq!(data["results"][1]["id"], by_tag.to_string());
    assert!(
        data["results"][0]["score"].as_u64() > data["results"][1]["score"].as_u64(),
        "title hits should outscore tag hits"
    );
}

#[tokio::test]
async fn test_search_type_filter_and_limit() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let admin = register_admin(client).await;

    for title in ["Hashing notes 1", "Hashing notes 2", "Hashing notes 3"] {
        upload_approved(client, &uploader, &admin, note_upload(title)).await;
    }
    let mut pyq = note_upload("Hashing question paper");
    pyq["type"] = json!("pyq");
    upload_approved(client, &uploader, &admin, pyq).await;

    let limited: Value = client
        .get(&api_path("/search"))
        .add_query_param("q", "hashing")
        .add_query_param("limit", "2")
        .await
        .json();
    assert_eq!(limited["count"], 2);

    let pyqs: Value = client
        .get(&api_path("/search"))
        .add_query_param("q", "hashing")
        .add_query_param("type", "pyq")
        .await
        .json();
    assert_eq!(pyqs["count"], 1);
    assert_eq!(pyqs["results"][0]["type"], "pyq");

    let bad_type = client
        .get(&api_path("/search"))
        .add_query_param("q", "hashing")
        .add_query_param("type", "podcast")
        .await;
    assert_eq!(bad_type.status_code(), 400);
}

#[tokio::test]
async fn test_search_includes_catalog_hits() {
    let app = setup_test_app().await;

    let data: Value = app
        .client()
        .get(&api_path("/search"))
        .add_query_param("q", "linked list")
        .await
        .json();
    assert_eq!(data["count"], 0);
    let catalog = data["catalog"].as_array().expect("catalog hits");
    assert!(!catalog.is_empty());
    assert!(catalog
        .iter()
        .all(|hit| hit["url"].as_str().is_some_and(|u| u.starts_with("/browse/"))));
}
