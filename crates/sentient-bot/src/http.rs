//! Auxiliary HTTP surface
//!
//! `/dobby` echoes the submitted question without calling the model.
//! Shares nothing with the bot beyond the process.

use std::net::SocketAddr;

use axum::{
    Json, Router,
    body::Bytes,
    extract::Query,
    routing::get,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct DobbyQuery {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DobbyResponse {
    pub answer: String,
}

pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/dobby", get(dobby).post(dobby))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn serve(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP endpoint listening on http://{}", addr);
    tracing::info!("  GET|POST /dobby  - question echo");
    tracing::info!("  GET      /health - health check");

    axum::serve(listener, router()).await?;
    Ok(())
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Body `question` wins over the query string; anything unreadable is empty
async fn dobby(Query(query): Query<DobbyQuery>, body: Bytes) -> Json<DobbyResponse> {
    let from_body = serde_json::from_slice::<Value>(&body)
        .ok()
        .and_then(|v| v.get("question").and_then(Value::as_str).map(str::to_owned));

    let question = from_body
        .or(query.question)
        .unwrap_or_default();

    tracing::debug!(question = %question, "dobby stub request");
    Json(DobbyResponse {
        answer: echo_answer(&question),
    })
}

pub fn echo_answer(question: &str) -> String {
    format!("Dobby says: You asked '{question}'")
}
