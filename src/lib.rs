//! Coin Dashboard Worker - crypto coin dashboard on Cloudflare Workers
//!
//! Lists coins, lets the user follow up to five of them and shows current
//! prices per coin on demand.
//!
//! # Architecture
//! - Main entry point routes HTTP requests to `app::Dashboard` commands
//! - KV storage for the followed coins, the open replacement dialog and
//!   cached price responses
//! - A client id cookie, issued with the page, scopes selection and dialog
//!   state to one browser
//! - Server-rendered card markup, patched into a static single-page shell
//!
//! # Features
//! - Search by name or symbol
//! - Five-coin follow list with a replace-one dialog when full
//! - Price detail (USD/EUR/ILS) reused for two minutes per coin

#![allow(clippy::doc_markdown)] // Doc style flexibility
#![allow(clippy::needless_pass_by_value)] // Worker framework patterns

mod app;
mod cache;
mod catalog;
mod client;
mod config;
mod dashboard;
mod error;
mod logging;
mod notify;
mod render;
mod replacement;
mod selection;
mod session;
mod storage;
#[cfg(test)]
mod testing;
mod types;
mod views;

use serde::Serialize;
use worker::{Context, Env, Request, Response, Router, event};

pub use app::Dashboard;
pub use cache::{CACHE_TTL_MS, CacheEntry, CacheLayer, CacheStatus, Clock, SystemClock};
pub use catalog::{Catalog, CatalogSource, Coin, SearchResult, filter_coins};
pub use client::{CoinPrices, HttpFetcher, JsonFetcher};
pub use config::Config;
pub use error::{DashboardError, ReplacementError};
pub use notify::Notification;
pub use replacement::{Mark, OpenOutcome, PendingReplacement, ReplacementWorkflow};
pub use selection::{MAX_SELECTED, SelectionSet, ToggleOutcome};
pub use session::ClientId;
pub use storage::{KeyValueStore, WorkersKv};
pub use types::*;
pub use views::ViewPanel;

/// Result type alias for worker operations
type WResult<T> = std::result::Result<T, worker::Error>;

/// Controller wired to the worker runtime
type WorkerDashboard = Dashboard<WorkersKv, HttpFetcher, SystemClock>;

/// Main Worker entry point
#[event(fetch)]
async fn fetch(req: Request, env: Env, _ctx: Context) -> WResult<Response> {
    console_error_panic_hook::set_once();

    let router = Router::new();

    router
        // Health check
        .get_async("/health", |_req, ctx| async move {
            let config = match Config::from_env(&ctx.env) {
                Ok(c) => c,
                Err(e) => return Response::error(format!("Config error: {e}"), 500),
            };

            Response::from_json(&HealthResponse {
                status: "healthy".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                environment: config.environment,
                timestamp: chrono::Utc::now().to_rfc3339(),
                catalog: config.catalog_url.unwrap_or_else(|| "bundled".to_string()),
            })
        })
        // Dashboard UI
        .get("/", |req, _ctx| dashboard_page(&req))
        .get("/dashboard", |req, _ctx| dashboard_page(&req))
        // Panel switch
        .get_async("/api/view", |req, ctx| async move {
            let panel = match query_param(&req, "panel").unwrap_or_default().parse::<ViewPanel>() {
                Ok(p) => p,
                Err(e) => return Response::error(e, 400),
            };
            let query = query_param(&req, "q").unwrap_or_default();

            respond(open_dashboard(&req, &ctx.env).await.map(|d| d.view(panel, &query)))
        })
        // Catalog grid for a search query
        .get_async("/api/coins", |req, ctx| async move {
            let query = query_param(&req, "q").unwrap_or_default();
            respond(open_dashboard(&req, &ctx.env).await.map(|d| d.search(&query)))
        })
        // Followed coins
        .get_async("/api/selection", |req, ctx| async move {
            respond(open_dashboard(&req, &ctx.env).await.map(|d| d.selection_state()))
        })
        .post_async("/api/selection/toggle", |mut req, ctx| async move {
            let body: ToggleRequest = match req.json().await {
                Ok(b) => b,
                Err(e) => return Response::error(format!("Invalid toggle request: {e}"), 400),
            };
            respond(toggle_selection(&req, &ctx.env, body).await)
        })
        // Session-end beacon
        .post_async("/api/selection/flush", |req, ctx| async move {
            respond(flush_selection(&req, &ctx.env).await)
        })
        // Replacement dialog
        .post_async("/api/replacement/confirm", |mut req, ctx| async move {
            let body: ConfirmRequest = match req.json().await {
                Ok(b) => b,
                Err(e) => return Response::error(format!("Invalid confirm request: {e}"), 400),
            };
            respond(confirm_replacement(&req, &ctx.env, body).await)
        })
        .post_async("/api/replacement/cancel", |req, ctx| async move {
            respond(cancel_replacement(&req, &ctx.env).await)
        })
        // Price detail for one coin
        .get_async("/api/detail", |req, ctx| async move {
            let Some(coin_id) = query_param(&req, "id") else {
                return Response::error("Missing id parameter", 400);
            };
            respond(coin_detail(&req, &ctx.env, &coin_id).await)
        })
        .run(req, env)
        .await
}

/// Serve the shell, issuing a client id cookie to new browsers
fn dashboard_page(req: &Request) -> WResult<Response> {
    let known = req
        .headers()
        .get("Cookie")?
        .as_deref()
        .and_then(ClientId::from_cookie_header);

    let mut response = Response::from_html(dashboard::dashboard_html())?;
    if known.is_none() {
        let client = ClientId::generate();
        response
            .headers_mut()
            .set("Set-Cookie", &client.set_cookie_header())?;
    }
    Ok(response)
}

/// Build a controller for the calling client
async fn open_dashboard(req: &Request, env: &Env) -> Result<WorkerDashboard, DashboardError> {
    let config = Config::from_env(env)?;
    if let Some(level) = config.log_filter() {
        logging::init(level);
    }

    let cookie = req.headers().get("Cookie")?;
    let client = ClientId::require(cookie.as_deref())?;

    let store = WorkersKv::from_env(env)?;
    Ok(Dashboard::open(config, client, store, HttpFetcher::new(), SystemClock).await)
}

async fn toggle_selection(
    req: &Request,
    env: &Env,
    body: ToggleRequest,
) -> Result<ToggleResponse, DashboardError> {
    let mut dashboard = open_dashboard(req, env).await?;
    dashboard.toggle(&body.coin_id, body.enabled).await
}

async fn confirm_replacement(
    req: &Request,
    env: &Env,
    body: ConfirmRequest,
) -> Result<ConfirmResponse, DashboardError> {
    let mut dashboard = open_dashboard(req, env).await?;
    dashboard.confirm_replacement(&body.evict, &body.q).await
}

async fn cancel_replacement(req: &Request, env: &Env) -> Result<SelectionResponse, DashboardError> {
    let mut dashboard = open_dashboard(req, env).await?;
    dashboard.cancel_replacement().await?;
    Ok(dashboard.selection_state())
}

async fn flush_selection(req: &Request, env: &Env) -> Result<SelectionResponse, DashboardError> {
    let dashboard = open_dashboard(req, env).await?;
    dashboard.flush().await?;
    Ok(dashboard.selection_state())
}

async fn coin_detail(
    req: &Request,
    env: &Env,
    coin_id: &str,
) -> Result<DetailResponse, DashboardError> {
    open_dashboard(req, env).await?.coin_detail(coin_id).await
}

/// JSON body on success; error envelope with a notification otherwise
fn respond<T: Serialize>(result: Result<T, DashboardError>) -> WResult<Response> {
    match result {
        Ok(body) => Response::from_json(&body),
        Err(e) => {
            let status = if e.is_user_error() { 400 } else { 500 };
            Ok(Response::from_json(&serde_json::json!({
                "error": true,
                "message": e.to_string(),
                "notification": Notification::from_error(&e),
            }))?
            .with_status(status))
        }
    }
}

/// First value of a query string parameter
fn query_param(req: &Request, name: &str) -> Option<String> {
    req.url()
        .ok()?
        .query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}
