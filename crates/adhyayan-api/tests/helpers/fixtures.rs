use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use super::api_path;
use super::auth::TestUser;

/// Upload body for a CSE 2nd-year Data Structures note.
pub fn note_upload(title: &str) -> Value {
    json!({
        "title": title,
        "description": "Handwritten notes with solved examples",
        "type": "note",
        "file_url": "https://files.example.com/notes.pdf",
        "department": "Engineering",
        "branch": "CSE",
        "year": "2nd Year",
        "subject": "DSA",
        "topic": "Linked Lists",
        "tags": ["dsa", "exam prep"],
    })
}

/// Upload content as `user` and return its id.
pub async fn upload(client: &TestServer, user: &TestUser, body: Value) -> Uuid {
    let response = client
        .post(&api_path("/content"))
        .add_header("Authorization", user.bearer())
        .json(&body)
        .await;

    assert_eq!(response.status_code(), 201, "upload should succeed");
    let data: Value = response.json();
    data["id"]
        .as_str()
        .and_then(|id| Uuid::parse_str(id).ok())
        .expect("content id in upload response")
}

/// Upload then approve as `admin`.
pub async fn upload_approved(
    client: &TestServer,
    uploader: &TestUser,
    admin: &TestUser,
    body: Value,
) -> Uuid {
    let id = upload(client, uploader, body).await;
    let response = client
        .post(&api_path(&format!("/admin/content/{}/approve", id)))
        .add_header("Authorization", admin.bearer())
        .await;
    assert_eq!(response.status_code(), 200, "approval should succeed");
    id
}
