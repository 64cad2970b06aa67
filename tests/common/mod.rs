#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use roster::router::init_router;
use roster::state::AppState;
use roster_config::CorsConfig;
use roster_db::{EntityStore, MemoryStore, StoreError};
use roster_models::{Student, StudentId, StudentStatus, Teacher, TeacherId, TeacherRoster};
use serde_json::{Value, json};
use tower::ServiceExt;

pub fn setup_test_app(store: Arc<dyn EntityStore>) -> Router {
    init_router(AppState::new(store, CorsConfig::default()))
}

/// A fresh app over an empty in-memory store, plus the store itself.
pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (setup_test_app(store.clone()), store)
}

/// Sends `request` and returns the status with the body parsed as JSON,
/// or `Value::Null` when the body is empty.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    (status, body)
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn register(app: &Router, teacher: &str, students: &[&str]) {
    let (status, body) = post_json(
        app,
        "/api/register",
        json!({ "teacher": teacher, "students": students }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT, "register failed: {}", body);
}

pub async fn suspend(app: &Router, student: &str) {
    let (status, body) = post_json(app, "/api/suspend", json!({ "student": student })).await;
    assert_eq!(status, StatusCode::NO_CONTENT, "suspend failed: {}", body);
}

/// Every call fails as if the database were unreachable.
#[derive(Debug)]
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl EntityStore for FailingStore {
    async fn find_teachers_by_emails(&self, _: &[String]) -> Result<Vec<TeacherRoster>, StoreError> {
        Err(unavailable())
    }

    async fn find_students_by_emails(&self, _: &[String]) -> Result<Vec<Student>, StoreError> {
        Err(unavailable())
    }

    async fn create_teacher(&self, _: &Teacher) -> Result<Teacher, StoreError> {
        Err(unavailable())
    }

    async fn create_student(&self, _: &Student) -> Result<Student, StoreError> {
        Err(unavailable())
    }

    async fn update_student_status(&self, _: StudentId, _: StudentStatus) -> Result<u64, StoreError> {
        Err(unavailable())
    }

    async fn link_teacher_student(&self, _: TeacherId, _: StudentId) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

pub fn failing_app() -> Router {
    setup_test_app(Arc::new(FailingStore))
}
