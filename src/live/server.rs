// src/live/server.rs

//! HTTP endpoints of the live log viewer (`actix-web`).
//!
//! - `GET /`                        HTML viewer
//! - `GET /api/records?after=<seq>` columns + records newer than `seq`
//! - `GET /api/health`              liveness probe

use std::net::SocketAddr;

use actix_web::{App, HttpResponse, HttpServer, middleware, web};
use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use super::LiveLog;

const INDEX_HTML: &str = include_str!("index.html");

#[derive(Debug, Deserialize)]
struct RecordsQuery {
    #[serde(default)]
    after: u64,
}

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

async fn records(log: web::Data<LiveLog>, query: web::Query<RecordsQuery>) -> HttpResponse {
    HttpResponse::Ok().json(log.snapshot_after(query.after))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().body("ok")
}

/// Register the viewer routes under the root path prefix.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/api/records", web::get().to(records))
        .route("/api/health", web::get().to(health));
}

/// Serve the viewer until the process is stopped.
///
/// Ctrl-C stops the server gracefully and this returns `Ok(())`.
pub async fn serve(log: LiveLog, bind: SocketAddr) -> Result<()> {
    let data = web::Data::new(log);
    info!(%bind, records = data.len(), "serving live log viewer; press Ctrl-C to stop");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(data.clone())
            .configure(configure_routes)
    })
    .workers(1)
    .bind(bind)
    .with_context(|| format!("binding live viewer to {bind}"))?
    .run()
    .await
    .context("live viewer server failed")?;

    info!("live viewer stopped");
    Ok(())
}
