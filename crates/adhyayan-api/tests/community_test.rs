//! Forum threads and the points leaderboard.
//!
//! Run with: `cargo test -p adhyayan-api --test community_test`

mod helpers;

use adhyayan_core::constants::{POINTS_PER_APPROVED_UPLOAD, POINTS_PER_FORUM_REPLY};
use axum_test::TestServer;
use helpers::auth::{register_admin, register_test_user, register_with_branch, TestUser};
use helpers::fixtures::{note_upload, upload_approved};
use helpers::{api_path, setup_test_app};
use serde_json::{json, Value};

async fn create_post(client: &TestServer, author: &TestUser, title: &str, branch: &str) -> String {
    let response = client
        .post(&api_path("/forum/posts"))
        .add_header("Authorization", author.bearer())
        .json(&json!({
            "title": title,
            "body": "Which units matter most for the end-sem?",
            "branch": branch,
        }))
        .await;
    assert_eq!(response.status_code(), 201);
    let data: Value = response.json();
    data["id"].as_str().expect("post id").to_string()
}

#[tokio::test]
async fn test_thread_with_replies() {
    let app = setup_test_app().await;
    let client = app.client();
    let author = register_test_user(client, "Asha", "asha@example.com").await;
    let helper = register_test_user(client, "Ravi", "ravi@example.com").await;

    let id = create_post(client, &author, "DBMS viva tips", "CSE").await;
    let thread_path = api_path(&format!("/forum/posts/{}", id));

    for body in ["Normalization questions come up a lot", "Know your ACID properties"] {
        let reply = client
            .post(&api_path(&format!("/forum/posts/{}/replies", id)))
            .add_header("Authorization", helper.bearer())
            .json(&json!({ "body": body }))
            .await;
        assert_eq!(reply.status_code(), 201);
    }

    let thread: Value = client.get(&thread_path).await.json();
    assert_eq!(thread["title"], "DBMS viva tips");
    assert_eq!(thread["reply_count"], 2);
    let replies = thread["replies"].as_array().expect("replies");
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["body"], "Normalization questions come up a lot");

    let me: Value = client
        .get(&api_path("/users/me"))
        .add_header("Authorization", helper.bearer())
        .await
        .json();
    assert_eq!(me["points"], 2 * POINTS_PER_FORUM_REPLY);

    let orphan = client
        .post(&api_path(&format!("/forum/posts/{}/replies", uuid::Uuid::new_v4())))
        .add_header("Authorization", helper.bearer())
        .json(&json!({ "body": "Hello?" }))
        .await;
    assert_eq!(orphan.status_code(), 404);
}

#[tokio::test]
async fn test_posting_requires_login() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post(&api_path("/forum/posts"))
        .json(&json!({ "title": "Anyone?", "body": "Hello" }))
        .await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_list_posts_by_branch_and_upvote() {
    let app = setup_test_app().await;
    let client = app.client();
    let author = register_test_user(client, "Asha", "asha@example.com").await;

    let cse = create_post(client, &author, "Compiler design doubts", "CSE").await;
    create_post(client, &author, "Signals and systems", "ECE").await;

    let all: Vec<Value> = client.get(&api_path("/forum/posts")).await.json();
    assert_eq!(all.len(), 2);

    let filtered: Vec<Value> = client
        .get(&api_path("/forum/posts"))
        .add_query_param("branch", "cse")
        .await
        .json();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], cse);

    let upvote_path = api_path(&format!("/forum/posts/{}/upvote", cse));
    client
        .post(&upvote_path)
        .add_header("Authorization", author.bearer())
        .await;
    let voted: Value = client
        .post(&upvote_path)
        .add_header("Authorization", author.bearer())
        .await
        .json();
    assert_eq!(voted["upvotes"], 2);

    assert_eq!(client.post(&upvote_path).await.status_code(), 401);
}

#[tokio::test]
async fn test_delete_post_permissions() {
    let app = setup_test_app().await;
    let client = app.client();
    let author = register_test_user(client, "Asha", "asha@example.com").await;
    let stranger = register_test_user(client, "Ravi", "ravi@example.com").await;
    let admin = register_admin(client).await;

    let first = create_post(client, &author, "First", "IT").await;
    let second = create_post(client, &author, "Second", "IT").await;

    let forbidden = client
        .delete(&api_path(&format!("/forum/posts/{}", first)))
        .add_header("Authorization", stranger.bearer())
        .await;
    assert_eq!(forbidden.status_code(), 403);

    let own = client
        .delete(&api_path(&format!("/forum/posts/{}", first)))
        .add_header("Authorization", author.bearer())
        .await;
    assert_eq!(own.status_code(), 204);
    assert_eq!(
        client
            .get(&api_path(&format!("/forum/posts/{}", first)))
            .await
            .status_code(),
        404
    );

    let moderated = client
        .delete(&api_path(&format!("/forum/posts/{}", second)))
        .add_header("Authorization", admin.bearer())
        .await;
    assert_eq!(moderated.status_code(), 204);
}

#[tokio::test]
async fn test_leaderboard_ranks_and_branch_filter() {
    let app = setup_test_app().await;
    let client = app.client();
    let admin = register_admin(client).await;
    let meera = register_with_branch(client, "Meera", "meera@example.com", Some("CSE")).await;
    let arjun = register_with_branch(client, "Arjun", "arjun@example.com", Some("CSE")).await;
    let kabir = register_with_branch(client, "Kabir", "kabir@example.com", Some("IT")).await;

    upload_approved(client, &kabir, &admin, note_upload("Kabir 1")).await;
    upload_approved(client, &kabir, &admin, note_upload("Kabir 2")).await;
    upload_approved(client, &meera, &admin, note_upload("Meera 1")).await;
    upload_approved(client, &arjun, &admin, note_upload("Arjun 1")).await;

    let board: Vec<Value> = client.get(&api_path("/leaderboard")).await.json();
    assert_eq!(board[0]["user_id"], kabir.user_id.to_string());
    assert_eq!(board[0]["rank"], 1);
    assert_eq!(board[0]["points"], 2 * POINTS_PER_APPROVED_UPLOAD);
    // Meera and Arjun tie on points and share second place.
    assert_eq!(board[1]["rank"], 2);
    assert_eq!(board[2]["rank"], 2);
    assert_eq!(board[3]["rank"], 4);

    let cse: Vec<Value> = client
        .get(&api_path("/leaderboard"))
        .add_query_param("branch", "cse")
        .await
        .json();
    assert_eq!(cse.len(), 2);
    assert!(cse.iter().all(|e| e["branch"] == "CSE"));

    let top: Vec<Value> = client
        .get(&api_path("/leaderboard"))
        .add_query_param("limit", "1")
        .await
        .json();
    assert_eq!(top.len(), 1);
}
