//! HTTP routes and handlers

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use tracing::{error, info};

use clamor_core::{Category, Complaint, Sentiment, Status};
use clamor_store::{ListFilter, StoreError};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/complaints", post(create_complaint).get(list_complaints))
        .route("/complaints/:id/status", patch(update_complaint_status))
        .fallback(fallback)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn metrics(State(state): State<AppState>) -> String {
    match &state.metrics {
        Some(handle) => handle.render(),
        None => String::new(),
    }
}

/// Complaint submission payload
#[derive(Debug, Deserialize)]
struct CreateComplaintRequest {
    text: String,
}

/// Summary returned by create and status-update
#[derive(Debug, Serialize)]
struct ComplaintSummary {
    id: i64,
    status: Status,
    sentiment: Sentiment,
    category: Category,
}

impl From<&Complaint> for ComplaintSummary {
    fn from(c: &Complaint) -> Self {
        Self {
            id: c.id,
            status: c.status,
            sentiment: c.sentiment,
            category: c.category,
        }
    }
}

/// Full record detail returned by list
#[derive(Debug, Serialize)]
struct ComplaintDetail {
    id: i64,
    text: String,
    status: Status,
    sentiment: Sentiment,
    category: Category,
    timestamp: DateTime<Utc>,
}

impl From<Complaint> for ComplaintDetail {
    fn from(c: Complaint) -> Self {
        Self {
            id: c.id,
            text: c.text,
            status: c.status,
            sentiment: c.sentiment,
            category: c.category,
            timestamp: c.timestamp,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListQuery {
    status: Option<Status>,
    since: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    new_status: Status,
}

/// Submit a new complaint for enrichment and persistence
async fn create_complaint(
    State(state): State<AppState>,
    headers: HeaderMap,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Json(req): Json<CreateComplaintRequest>,
) -> Result<Response, AppError> {
    metrics::counter!("clamor_requests_total", "endpoint" => "create").increment(1);

    if req.text.is_empty() {
        return Err(AppError::InvalidRequest(
            "complaint text must not be empty".to_string(),
        ));
    }

    let client_ip = extract_client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr));
    info!(ip = %client_ip, "received complaint");

    let record = state
        .orchestrator
        .create_complaint(&req.text, &client_ip)
        .await?;

    Ok((StatusCode::CREATED, Json(ComplaintSummary::from(&record))).into_response())
}

/// List complaints filtered by status and/or creation time, newest first
async fn list_complaints(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ComplaintDetail>>, AppError> {
    metrics::counter!("clamor_requests_total", "endpoint" => "list").increment(1);

    let filter = ListFilter {
        status: query.status,
        since: query.since,
    };
    let complaints = state.store.list(filter).await?;
    Ok(Json(complaints.into_iter().map(ComplaintDetail::from).collect()))
}

/// Set a complaint's status to open or closed
async fn update_complaint_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<StatusQuery>,
) -> Result<Json<ComplaintSummary>, AppError> {
    metrics::counter!("clamor_requests_total", "endpoint" => "update_status").increment(1);

    let mut complaint = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    complaint.status = query.new_status;
    let updated = state.store.update(complaint).await?;
    info!(id = updated.id, status = %updated.status, "complaint status updated");
    Ok(Json(ComplaintSummary::from(&updated)))
}

async fn fallback() -> AppError {
    AppError::NotFound
}

/// Extract the caller's IP, honoring a proxy header when present
///
/// `X-Forwarded-For` may carry a comma-separated chain; the first
/// entry is the originating client.
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|h| h.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

/// Error handling
#[derive(Debug)]
pub enum AppError {
    InvalidRequest(String),
    NotFound,
    Internal,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => AppError::NotFound,
            StoreError::Backend(msg) => {
                error!("store backend failure: {msg}");
                AppError::Internal
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Complaint not found".to_string()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> Option<SocketAddr> {
        Some("192.0.2.10:51234".parse().unwrap())
    }

    #[test]
    fn forwarded_header_wins_over_peer_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(extract_client_ip(&headers, peer()), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_peer_address() {
        assert_eq!(extract_client_ip(&HeaderMap::new(), peer()), "192.0.2.10");
    }

    #[test]
    fn empty_forwarded_header_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));
        assert_eq!(extract_client_ip(&headers, peer()), "192.0.2.10");
    }
}
