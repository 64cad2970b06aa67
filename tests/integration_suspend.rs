mod common;

use axum::http::StatusCode;
use common::{failing_app, memory_app, post_json, register};
use roster_db::EntityStore;
use roster_models::StudentStatus;
use serde_json::json;

#[tokio::test]
async fn test_suspend_student_success() {
    let (app, store) = memory_app();
    register(&app, "teacherken@gmail.com", &["studentmary@gmail.com"]).await;

    let (status, body) =
        post_json(&app, "/api/suspend", json!({ "student": "studentmary@gmail.com" })).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
    let student = store
        .find_student_by_email("studentmary@gmail.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(student.status, StudentStatus::Suspended);
}

#[tokio::test]
async fn test_suspend_student_twice() {
    let (app, _) = memory_app();
    register(&app, "teacherken@gmail.com", &["studentmary@gmail.com"]).await;

    for _ in 0..2 {
        let (status, _) =
            post_json(&app, "/api/suspend", json!({ "student": "studentmary@gmail.com" })).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }
}

#[tokio::test]
async fn test_suspend_unknown_student() {
    let (app, _) = memory_app();

    let (status, body) =
        post_json(&app, "/api/suspend", json!({ "student": "ghost@gmail.com" })).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No student records found" }));
}

#[tokio::test]
async fn test_suspend_invalid_payload() {
    let (app, _) = memory_app();

    let (status, body) = post_json(&app, "/api/suspend", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "student is required");

    let (status, body) = post_json(&app, "/api/suspend", json!({ "student": "mary" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "student must be a valid email");
}

#[tokio::test]
async fn test_suspend_store_unavailable() {
    let app = failing_app();

    let (status, body) =
        post_json(&app, "/api/suspend", json!({ "student": "studentmary@gmail.com" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to suspend student." }));
}
