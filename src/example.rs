//! Boilerplate example service.
//!
//! A standalone HTTP service with a greeting and an info endpoint, kept as
//! a starting point for new APIs. It shares nothing with the scrapers.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `GET` | `/` | Welcome message and endpoint list |
//! | `GET` | `/api/hello` | `{message, timestamp, status}` |
//! | `GET` | `/api/info` | Application metadata |
//! | `GET` | `/api/health` | `{status, message}` |
//!
//! Any other path answers `404` with a JSON error body.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Local;
use serde::Serialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
pub struct HelloMessage {
    pub message: String,
    pub timestamp: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct AppInfo {
    pub app_name: String,
    pub version: String,
    pub description: String,
    pub framework: String,
    pub language: String,
}

pub fn hello_message() -> HelloMessage {
    HelloMessage {
        message: "Hello, UNINTER!".to_string(),
        timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        status: "success".to_string(),
    }
}

pub fn app_info() -> AppInfo {
    AppInfo {
        app_name: "Rust API Example".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "Projeto simples com estrutura organizada".to_string(),
        framework: "axum".to_string(),
        language: "Rust".to_string(),
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/hello", get(|| async { Json(hello_message()) }))
        .route("/api/info", get(|| async { Json(app_info()) }))
        .route("/api/health", get(health))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

async fn index() -> Json<Value> {
    Json(json!({
        "message": "Bem-vindo à API de exemplo!",
        "description": "Projeto simples com estrutura organizada",
        "endpoints": {
            "GET /": "Esta página de boas-vindas",
            "GET /api/hello": "Mensagem de saudação",
            "GET /api/info": "Informações da aplicação",
            "GET /api/health": "Verificação de saúde da aplicação"
        },
        "status": "online"
    }))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "Aplicação funcionando corretamente"
    }))
}

async fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Página não encontrada",
            "message": "O endpoint solicitado não existe",
            "status_code": 404
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_hello() {
        let (status, body) = get_json("/api/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello, UNINTER!");
        assert_eq!(body["status"], "success");
        assert!(body["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn test_info() {
        let (status, body) = get_json("/api/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["language"], "Rust");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_and_index() {
        let (_, health) = get_json("/api/health").await;
        assert_eq!(health["status"], "healthy");

        let (status, index) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(index["status"], "online");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let (status, body) = get_json("/api/nada").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status_code"], 404);
    }
}
