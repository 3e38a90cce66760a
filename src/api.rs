//! HTTP API around the collection pipeline.
//!
//! # Routes
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Service description and endpoint list |
//! | `GET` | `/health` | Liveness probe |
//! | `POST` | `/api/coletar/{platform}` | Collect one platform (`google-atelie`, `senai`, `gov-br`, `ciee`) |
//! | `POST` | `/api/coletar/todos` | Collect every platform |
//!
//! Each POST triggers one end-to-end collection run. Single-platform runs
//! answer `{success, message, cursos}` or `500 {success: false, error}`.
//! The aggregate run always answers `200` with one outcome per platform.

use crate::models::{AggregateResponse, CollectFailure, CollectResponse};
use crate::outputs::sheets::SheetSync;
use crate::pipeline::Pipeline;
use crate::scrapers::fetch::DocumentFetcher;
use crate::scrapers::{self, PLATFORMS};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

/// Build the scraper API router.
pub fn router<F, S>(pipeline: Arc<Pipeline<F, S>>) -> Router
where
    F: DocumentFetcher + 'static,
    S: SheetSync + 'static,
{
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/coletar/todos", post(collect_all::<F, S>))
        .route("/api/coletar/:platform", post(collect_platform::<F, S>))
        .layer(TraceLayer::new_for_http())
        .with_state(pipeline)
}

/// Bind `addr` and serve `app` until the process is stopped.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "Listening");
    axum::serve(listener, app).await
}

async fn index() -> Json<Value> {
    let endpoints: Map<String, Value> = PLATFORMS
        .iter()
        .map(|p| (format!("coletar_{}", p.slug), json!(format!("/api/coletar/{}", p.route))))
        .chain(std::iter::once((
            "coletar_todos".to_string(),
            json!("/api/coletar/todos"),
        )))
        .collect();

    Json(json!({
        "message": "API de Coleta de Cursos Gratuitos",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": endpoints,
    }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

fn failure(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(CollectFailure {
            success: false,
            error,
        }),
    )
        .into_response()
}

#[instrument(level = "info", skip(pipeline))]
async fn collect_platform<F, S>(
    State(pipeline): State<Arc<Pipeline<F, S>>>,
    Path(platform): Path<String>,
) -> Response
where
    F: DocumentFetcher + 'static,
    S: SheetSync + 'static,
{
    let Some(platform) = scrapers::find(&platform) else {
        return failure(
            StatusCode::NOT_FOUND,
            format!("Plataforma desconhecida: {platform}"),
        );
    };

    match pipeline.run_platform(platform).await {
        Ok(cursos) => Json(CollectResponse {
            success: true,
            message: format!("Coletados {} cursos do {}", cursos.len(), platform.name),
            cursos,
        })
        .into_response(),
        Err(e) => {
            error!(platform = %platform.name, error = %e, "Collection request failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

#[instrument(level = "info", skip_all)]
async fn collect_all<F, S>(State(pipeline): State<Arc<Pipeline<F, S>>>) -> Json<AggregateResponse>
where
    F: DocumentFetcher + 'static,
    S: SheetSync + 'static,
{
    Json(AggregateResponse::completed(pipeline.run_all().await))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlatformOutcome;
    use crate::outputs::csv::CsvWriter;
    use crate::scrapers::{ciee, google_atelie, gov_br, senai};
    use crate::testing::{RecordingSheets, StaticFetcher};
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    fn app(fetcher: StaticFetcher, data_dir: &std::path::Path) -> Router {
        let pipeline = Pipeline::new(
            fetcher,
            CsvWriter::new(data_dir),
            Some(RecordingSheets::default()),
        );
        router(Arc::new(pipeline))
    }

    async fn call(app: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_lists_every_platform() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = call(app(StaticFetcher::default(), tmp.path()), "GET", "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["coletar_gov_br"], "/api/coletar/gov-br");
        assert_eq!(body["endpoints"]["coletar_todos"], "/api/coletar/todos");
        assert_eq!(body["endpoints"].as_object().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_health() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) = call(app(StaticFetcher::default(), tmp.path()), "GET", "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn test_collect_platform_success() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = StaticFetcher::default().with_page(
            gov_br::PLATFORM.url,
            r#"<div class="card-curso"><h3>Gestão de Projetos</h3><a href="/curso/42">Inscrever</a></div>"#,
        );
        let (status, body) = call(app(fetcher, tmp.path()), "POST", "/api/coletar/gov-br").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Coletados 1 cursos do Gov.br");
        assert_eq!(body["cursos"][0]["nome_curso"], "Gestão de Projetos");
        assert_eq!(body["cursos"][0]["area_conhecimento"], "Administração");
        assert_eq!(
            body["cursos"][0]["link_inscricao"],
            "https://www.escolavirtual.gov.br/curso/42"
        );
        assert_eq!(body["cursos"][0]["plataforma_origem"], "Gov.br");
    }

    #[tokio::test]
    async fn test_collect_platform_failure_is_500() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) =
            call(app(StaticFetcher::default(), tmp.path()), "POST", "/api/coletar/ciee").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_unknown_platform_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, body) =
            call(app(StaticFetcher::default(), tmp.path()), "POST", "/api/coletar/udemy").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_collect_all_reports_each_platform() {
        let tmp = tempfile::tempdir().unwrap();
        let fetcher = StaticFetcher::default()
            .with_page(
                google_atelie::PLATFORM.url,
                r#"<div data-testid="course-card"><h3>Marketing Digital</h3></div>"#,
            )
            .with_page(
                senai::PLATFORM.url,
                r#"<div class="card-curso"><h3>Eletricista</h3></div><div class="card-curso"><h3>Soldador</h3></div>"#,
            )
            .with_page(
                ciee::PLATFORM.url,
                r#"<div class="course-item"><h3>Excel</h3></div>"#,
            );
        let (status, body) = call(app(fetcher, tmp.path()), "POST", "/api/coletar/todos").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        let resultados: std::collections::BTreeMap<String, PlatformOutcome> =
            serde_json::from_value(body["resultados"].clone()).unwrap();
        assert_eq!(resultados["google_atelie"], PlatformOutcome::collected(1));
        assert_eq!(resultados["senai"], PlatformOutcome::collected(2));
        assert_eq!(resultados["ciee"], PlatformOutcome::collected(1));
        assert_eq!(body["resultados"]["gov_br"]["success"], false);
        assert!(body["resultados"]["gov_br"]["error"].is_string());
    }

    #[tokio::test]
    async fn test_collect_requires_post() {
        let tmp = tempfile::tempdir().unwrap();
        let response = app(StaticFetcher::default(), tmp.path())
            .oneshot(
                Request::builder()
                    .uri("/api/coletar/ciee")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
