use actix_web::{web, HttpResponse};
use serde_json::{Map, Value};

use stazy_shared::errors::{error_codes, ErrorResponse};

use crate::state::AppState;

/// Health check endpoint handler
///
/// Answers 503 with status `degraded` when any registered probe fails.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let mut checks = Map::new();
    let mut healthy = true;
    for probe in &state.health_probes {
        let ok = probe.is_healthy().await;
        if !ok {
            tracing::warn!(dependency = probe.name(), "Health probe failed");
        }
        healthy &= ok;
        checks.insert(
            probe.name().to_string(),
            Value::from(if ok { "up" } else { "down" }),
        );
    }

    let body = serde_json::json!({
        "status": if healthy { "healthy" } else { "degraded" },
        "service": "stazy-api",
        "version": env!("CARGO_PKG_VERSION"),
        "checks": checks,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
