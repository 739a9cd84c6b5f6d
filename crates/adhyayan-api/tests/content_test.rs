//! Upload, moderation and engagement workflow.
//!
//! Run with: `cargo test -p adhyayan-api --test content_test`

mod helpers;

use adhyayan_core::constants::POINTS_PER_APPROVED_UPLOAD;
use helpers::auth::{register_admin, register_test_user};
use helpers::fixtures::{note_upload, upload, upload_approved};
use helpers::{api_path, setup_test_app};
use serde_json::{json, Value};

#[tokio::test]
async fn test_upload_is_pending_and_hidden_until_approved() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let other = register_test_user(client, "Ravi", "ravi@example.com").await;
    let admin = register_admin(client).await;

    let id = upload(client, &uploader, note_upload("Linked list notes")).await;
    let content_path = api_path(&format!("/content/{}", id));

    // Pending: only the uploader and admins can see it.
    assert_eq!(client.get(&content_path).await.status_code(), 404);
    let by_other = client
        .get(&content_path)
        .add_header("Authorization", other.bearer())
        .await;
    assert_eq!(by_other.status_code(), 404);
    let by_owner = client
        .get(&content_path)
        .add_header("Authorization", uploader.bearer())
        .await;
    assert_eq!(by_owner.status_code(), 200);
    let data: Value = by_owner.json();
    assert_eq!(data["status"], "pending");

    let listed: Vec<Value> = client.get(&api_path("/content")).await.json();
    assert!(listed.is_empty());

    // The admin queue shows it.
    let queue = client
        .get(&api_path("/admin/content"))
        .add_header("Authorization", admin.bearer())
        .await;
    assert_eq!(queue.status_code(), 200);
    let queue: Vec<Value> = queue.json();
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0]["id"], id.to_string());

    let approved = client
        .post(&api_path(&format!("/admin/content/{}/approve", id)))
        .add_header("Authorization", admin.bearer())
        .await;
    assert_eq!(approved.status_code(), 200);
    let data: Value = approved.json();
    assert_eq!(data["status"], "approved");
    assert_eq!(data["reviewed_by"], admin.user_id.to_string());
    assert_eq!(
        data["canonical_url"],
        "/browse/engineering/cse/2nd-year/data-structures?topic=linked-lists"
    );

    let public = client.get(&content_path).await;
    assert_eq!(public.status_code(), 200);
    let listed: Vec<Value> = client.get(&api_path("/content")).await.json();
    assert_eq!(listed.len(), 1);

    let me: Value = client
        .get(&api_path("/users/me"))
        .add_header("Authorization", uploader.bearer())
        .await
        .json();
    assert_eq!(me["points"], POINTS_PER_APPROVED_UPLOAD);
}

#[tokio::test]
async fn test_review_is_one_shot() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let admin = register_admin(client).await;

    let id = upload_approved(client, &uploader, &admin, note_upload("Stacks")).await;

    let again = client
        .post(&api_path(&format!("/admin/content/{}/approve", id)))
        .add_header("Authorization", admin.bearer())
        .await;
    assert_eq!(again.status_code(), 409);

    let reject = client
        .post(&api_path(&format!("/admin/content/{}/reject", id)))
        .add_header("Authorization", admin.bearer())
        .json(&json!({ "reason": "changed my mind" }))
        .await;
    assert_eq!(reject.status_code(), 409);

    let me: Value = client
        .get(&api_path("/users/me"))
        .add_header("Authorization", uploader.bearer())
        .await
        .json();
    assert_eq!(me["points"], POINTS_PER_APPROVED_UPLOAD);
}

#[tokio::test]
async fn test_reject_keeps_reason_and_awards_nothing() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let admin = register_admin(client).await;

    let id = upload(client, &uploader, note_upload("Blurry scan")).await;
    let rejected = client
        .post(&api_path(&format!("/admin/content/{}/reject", id)))
        .add_header("Authorization", admin.bearer())
        .json(&json!({ "reason": "Unreadable" }))
        .await;
    assert_eq!(rejected.status_code(), 200);
    let data: Value = rejected.json();
    assert_eq!(data["status"], "rejected");
    assert_eq!(data["rejection_reason"], "Unreadable");

    let uploads: Vec<Value> = client
        .get(&api_path("/users/me/uploads"))
        .add_header("Authorization", uploader.bearer())
        .await
        .json();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0]["status"], "rejected");

    let me: Value = client
        .get(&api_path("/users/me"))
        .add_header("Authorization", uploader.bearer())
        .await
        .json();
    assert_eq!(me["points"], 0);
}

#[tokio::test]
async fn test_admin_routes_forbidden_for_students() {
    let app = setup_test_app().await;
    let client = app.client();
    let student = register_test_user(client, "Asha", "asha@example.com").await;
    let id = upload(client, &student, note_upload("My own notes")).await;

    let approve = client
        .post(&api_path(&format!("/admin/content/{}/approve", id)))
        .add_header("Authorization", student.bearer())
        .await;
    assert_eq!(approve.status_code(), 403);

    let stats = client
        .get(&api_path("/admin/stats"))
        .add_header("Authorization", student.bearer())
        .await;
    assert_eq!(stats.status_code(), 403);

    let anonymous = client.get(&api_path("/admin/stats")).await;
    assert_eq!(anonymous.status_code(), 401);
}

#[tokio::test]
async fn test_admin_stats() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let admin = register_admin(client).await;

    upload_approved(client, &uploader, &admin, note_upload("Queues")).await;
    upload(client, &uploader, note_upload("Heaps")).await;

    let stats: Value = client
        .get(&api_path("/admin/stats"))
        .add_header("Authorization", admin.bearer())
        .await
        .json();
    assert_eq!(stats["content"]["approved"], 1);
    assert_eq!(stats["content"]["pending"], 1);
    assert_eq!(stats["total_content"], 2);
    assert_eq!(stats["users"], 2);
}

#[tokio::test]
async fn test_upload_validation() {
    let app = setup_test_app().await;
    let client = app.client();
    let user = register_test_user(client, "Asha", "asha@example.com").await;

    let mut video_without_url = note_upload("Lecture 1");
    video_without_url["type"] = json!("video");
    let response = client
        .post(&api_path("/content"))
        .add_header("Authorization", user.bearer())
        .json(&video_without_url)
        .await;
    assert_eq!(response.status_code(), 400);

    let mut bad_type = note_upload("Lecture 1");
    bad_type["type"] = json!("podcast");
    let response = client
        .post(&api_path("/content"))
        .add_header("Authorization", user.bearer())
        .json(&bad_type)
        .await;
    assert_eq!(response.status_code(), 400);

    for field in ["title", "subject", "year"] {
        let mut blank = note_upload("Lecture 1");
        blank[field] = json!("   ");
        let response = client
            .post(&api_path("/content"))
            .add_header("Authorization", user.bearer())
            .json(&blank)
            .await;
        assert_eq!(response.status_code(), 400, "blank {} accepted", field);
    }

    let anonymous = client
        .post(&api_path("/content"))
        .json(&note_upload("Lecture 1"))
        .await;
    assert_eq!(anonymous.status_code(), 401);
}

#[tokio::test]
async fn test_views_downloads_and_ratings() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let reader = register_test_user(client, "Ravi", "ravi@example.com").await;
    let admin = register_admin(client).await;

    let pending = upload(client, &uploader, note_upload("Hidden")).await;
    let view_pending = client
        .post(&api_path(&format!("/content/{}/view", pending)))
        .await;
    assert_eq!(view_pending.status_code(), 404);

    let id = upload_approved(client, &uploader, &admin, note_upload("Trees")).await;

    client.post(&api_path(&format!("/content/{}/view", id))).await;
    let viewed: Value = client
        .post(&api_path(&format!("/content/{}/view", id)))
        .await
        .json();
    assert_eq!(viewed["views"], 2);

    let download = client
        .post(&api_path(&format!("/content/{}/download", id)))
        .await;
    assert_eq!(download.status_code(), 200);
    let data: Value = download.json();
    assert_eq!(data["url"], "https://files.example.com/notes.pdf");
    assert_eq!(data["downloads"], 1);

    let rate = |rating: i32| {
        client
            .post(&api_path(&format!("/content/{}/rate", id)))
            .add_header("Authorization", reader.bearer())
            .json(&json!({ "rating": rating }))
    };
    rate(5).await;
    let rated: Value = rate(2).await.json();
    assert_eq!(rated["rating_count"], 2);
    assert_eq!(rated["rating"], 3.5);

    assert_eq!(rate(6).await.status_code(), 400);
}

#[tokio::test]
async fn test_delete_permissions() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let other = register_test_user(client, "Ravi", "ravi@example.com").await;
    let admin = register_admin(client).await;

    let id = upload_approved(client, &uploader, &admin, note_upload("Graphs")).await;
    let path = api_path(&format!("/content/{}", id));

    let forbidden = client
        .delete(&path)
        .add_header("Authorization", other.bearer())
        .await;
    assert_eq!(forbidden.status_code(), 403);

    let deleted = client
        .delete(&path)
        .add_header("Authorization", uploader.bearer())
        .await;
    assert_eq!(deleted.status_code(), 204);

    assert_eq!(client.get(&path).await.status_code(), 404);
}

#[tokio::test]
async fn test_list_content_filters_by_type() {
    let app = setup_test_app().await;
    let client = app.client();
    let uploader = register_test_user(client, "Asha", "asha@example.com").await;
    let admin = register_admin(client).await;

    upload_approved(client, &uploader, &admin, note_upload("Notes")).await;
    let mut pyq = note_upload("2023 paper");
    pyq["type"] = json!("pyq");
    upload_approved(client, &uploader, &admin, pyq).await;

    let pyqs: Vec<Value> = client
        .get(&api_path("/content"))
        .add_query_param("type", "pyq")
        .await
        .json();
    assert_eq!(pyqs.len(), 1);
    assert_eq!(pyqs[0]["title"], "2023 paper");

    let bad = client
        .get(&api_path("/content"))
        .add_query_param("type", "podcast")
        .await;
    assert_eq!(bad.status_code(), 400);
}
