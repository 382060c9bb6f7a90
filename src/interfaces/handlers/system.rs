use std::time::Duration;

use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;

use crate::{constants::START_TIME, AppState};

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub version: String,
    pub uptime: String,
    pub started_at: String,
    pub database: String,
}

/// Always 200; `database` carries Postgres reachability.
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let uptime_secs = Utc::now()
        .signed_duration_since(*START_TIME)
        .num_seconds()
        .max(0) as u64;

    let database = if state.settings_handler.database_available().await {
        "OK"
    } else {
        "Unavailable"
    };

    HttpResponse::Ok().json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: format_duration(Duration::from_secs(uptime_secs)).to_string(),
        started_at: START_TIME.to_rfc3339(),
        database: database.to_string(),
    })
}
