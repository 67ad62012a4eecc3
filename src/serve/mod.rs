//! JSON-over-HTTP shell around the assessment pipeline.
//!
//! One logical operation (`POST /assess`) plus a health probe. The artifact
//! store loads once and is shared read-only across connections; per-request
//! state is created fresh and dropped with the response.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::json;
use tokio::net::TcpListener;

use crate::app::pipeline::{self, AssessmentOutcome};
use crate::assets::{self, AssetStore};
use crate::cli::ServeArgs;
use crate::domain::ApplicantProfile;
use crate::error::AppError;
use crate::report;

pub const DEFAULT_PORT: u16 = 7860;

/// Start the HTTP shell (blocks until the process is terminated).
pub fn run(args: ServeArgs) -> Result<(), AppError> {
    crate::app::init_logging("info");

    let dir = assets::resolve_asset_dir(args.assets.as_deref());
    let store = Arc::new(AssetStore::load(&dir));
    let port = resolve_port(args.port)?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::new(4, format!("Failed to start async runtime: {e}")))?;
    runtime.block_on(serve(store, port))
}

/// Port resolution: CLI flag, then `PORT`, then the default.
fn resolve_port(flag: Option<u16>) -> Result<u16, AppError> {
    resolve_port_from(flag, std::env::var("PORT").ok())
}

fn resolve_port_from(flag: Option<u16>, env_value: Option<String>) -> Result<u16, AppError> {
    if let Some(port) = flag {
        return Ok(port);
    }
    match env_value {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| AppError::new(2, format!("Invalid PORT value '{raw}'."))),
        None => Ok(DEFAULT_PORT),
    }
}

async fn serve(store: Arc<AssetStore>, port: u16) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::new(4, format!("Failed to bind {addr}: {e}")))?;

    log::info!("assessment API listening on {addr}");
    if store.is_degraded() {
        log::warn!("serving in degraded mode: every /assess returns 503");
    }

    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                log::warn!("accept failed: {e}");
                continue;
            }
        };

        let store = store.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req| handle(store.clone(), req));
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                log::debug!("connection from {peer} ended with error: {e}");
            }
        });
    }
}

async fn handle(
    store: Arc<AssetStore>,
    req: Request<Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let resp = match (method, path.as_str()) {
        (Method::GET, "/health") => health_response(&store),
        (Method::POST, "/assess") => assess_response(&store, req).await,
        _ => json_response(StatusCode::NOT_FOUND, json!({ "error": "Not found." })),
    };

    Ok(resp)
}

fn health_response(store: &AssetStore) -> Response<Full<Bytes>> {
    match store.degraded_reason() {
        None => json_response(StatusCode::OK, json!({ "status": "ok" })),
        Some(reason) => json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "status": "degraded", "reason": reason }),
        ),
    }
}

async fn assess_response(store: &AssetStore, req: Request<Incoming>) -> Response<Full<Bytes>> {
    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Failed to read request body: {e}") }),
            );
        }
    };

    let profile: ApplicantProfile = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            return json_response(
                StatusCode::BAD_REQUEST,
                json!({ "error": format!("Invalid applicant JSON: {e}") }),
            );
        }
    };

    match pipeline::run_assessment(store, &profile) {
        Ok(AssessmentOutcome::Ready(out)) => match serde_json::to_value(&out) {
            Ok(value) => json_response(StatusCode::OK, value),
            Err(e) => json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": format!("Failed to encode response: {e}") }),
            ),
        },
        Ok(AssessmentOutcome::Unavailable) => json_response(
            StatusCode::SERVICE_UNAVAILABLE,
            json!({ "error": report::UNAVAILABLE_MESSAGE }),
        ),
        Err(e) if e.exit_code() == 2 => {
            json_response(StatusCode::BAD_REQUEST, json!({ "error": e.to_string() }))
        }
        Err(e) => json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": e.to_string() }),
        ),
    }
}

fn json_response(status: StatusCode, value: serde_json::Value) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::from(value.to_string())));
    *resp.status_mut() = status;
    resp.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("application/json"),
    );
    resp
}
