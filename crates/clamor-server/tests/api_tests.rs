//! End-to-end API tests over the router
//!
//! Drives the full handler → orchestrator → store path with mock
//! classifiers, no network and no real server socket.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use clamor_classifiers::capability::{CategoryClassifier, SentimentAnalyzer};
use clamor_classifiers::ClassifierError;
use clamor_core::{Category, CategoryLabel, Sentiment, SentimentScore};
use clamor_enrich::Orchestrator;
use clamor_server::{create_router, AppState};
use clamor_store::{ComplaintStore, MemoryStore};

struct FixedSentiment(Sentiment);

#[async_trait]
impl SentimentAnalyzer for FixedSentiment {
    async fn analyze(&self, _text: &str) -> Result<SentimentScore, ClassifierError> {
        Ok(SentimentScore::new(self.0))
    }
}

struct FixedCategory(Category);

#[async_trait]
impl CategoryClassifier for FixedCategory {
    async fn classify(&self, _text: &str) -> Result<CategoryLabel, ClassifierError> {
        Ok(CategoryLabel::new(self.0))
    }
}

fn test_app(category: Option<Category>) -> Router {
    let store: Arc<dyn ComplaintStore> = Arc::new(MemoryStore::new());
    let mut orchestrator = Orchestrator::new(
        Arc::new(FixedSentiment(Sentiment::Negative)),
        store.clone(),
    );
    if let Some(cat) = category {
        orchestrator = orchestrator.with_category(Arc::new(FixedCategory(cat)));
    }
    create_router(AppState::new(Arc::new(orchestrator), store, None))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_complaint(text: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/complaints")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "text": text }).to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = test_app(None);
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_returns_enriched_summary() {
    let app = test_app(Some(Category::Billing));
    let response = app.oneshot(post_complaint("charged twice")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["status"], "open");
    assert_eq!(body["sentiment"], "negative");
    assert_eq!(body["category"], "billing");
}

#[tokio::test]
async fn create_without_category_classifier_uses_placeholder() {
    let app = test_app(None);
    let response = app.oneshot(post_complaint("no internet")).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["category"], "other");
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let app = test_app(None);
    let response = app.oneshot(post_complaint("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_returns_newest_first_with_full_detail() {
    let app = test_app(None);
    for text in ["first", "second", "third"] {
        let response = app.clone().oneshot(post_complaint(text)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/complaints")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["text"], "third");
    assert_eq!(items[2]["text"], "first");
    for item in items {
        assert!(item["timestamp"].is_string());
        assert_eq!(item["status"], "open");
    }
}

#[tokio::test]
async fn list_filters_by_status() {
    let app = test_app(None);
    for text in ["stays open", "gets closed"] {
        app.clone().oneshot(post_complaint(text)).await.unwrap();
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/complaints/2/status?new_status=closed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/complaints?status=closed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "gets closed");
    assert_eq!(items[0]["status"], "closed");
}

#[tokio::test]
async fn update_status_round_trips() {
    let app = test_app(None);
    app.clone().oneshot(post_complaint("close me")).await.unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/complaints/1/status?new_status=closed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "closed");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/complaints")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body[0]["status"], "closed");
}

#[tokio::test]
async fn update_status_of_missing_id_is_not_found() {
    let app = test_app(None);
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/complaints/999/status?new_status=closed")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Complaint not found");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_app(None);
    let response = app
        .oneshot(
            Request::builder()
                .uri("/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
