use crate::errors::ApiError;
use crate::metrics::{self, SEARCH_MATCHES, SEARCH_REQUESTS_TOTAL};
use crate::models::*;
use crate::refresher::Refresher;
use actix_web::{web, HttpResponse};
use sanctions_core::{search_with_detail, DatasetStore, SearchDetail};
use std::sync::Arc;
use tracing::{debug, error};

// ===== Health Check =====
pub async fn health_check(store: web::Data<Arc<DatasetStore>>) -> HttpResponse {
    let dataset = store.current();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        records_loaded: dataset.len(),
        publish_date: dataset.publish_date.clone(),
        loaded_at: store.loaded_at(),
    })
}

// ===== Search =====
pub async fn search_concise(
    params: web::Query<SearchParams>,
    store: web::Data<Arc<DatasetStore>>,
) -> Result<HttpResponse, ApiError> {
    run_search(&params, &store, SearchDetail::Concise)
}

pub async fn search_full(
    params: web::Query<SearchParams>,
    store: web::Data<Arc<DatasetStore>>,
) -> Result<HttpResponse, ApiError> {
    run_search(&params, &store, SearchDetail::Full)
}

fn run_search(
    params: &SearchParams,
    store: &DatasetStore,
    detail: SearchDetail,
) -> Result<HttpResponse, ApiError> {
    let label = match detail {
        SearchDetail::Concise => "concise",
        SearchDetail::Full => "full",
    };

    let Some(query) = params.to_query() else {
        SEARCH_REQUESTS_TOTAL.with_label_values(&[label, "rejected"]).inc();
        return Err(ApiError::ValidationError(
            "Missing 'name' query parameter".to_string(),
        ));
    };

    let dataset = store.current();
    let results = search_with_detail(&dataset, &query, detail).map_err(|e| {
        SEARCH_REQUESTS_TOTAL.with_label_values(&[label, "rejected"]).inc();
        ApiError::from(e)
    })?;

    SEARCH_REQUESTS_TOTAL.with_label_values(&[label, "ok"]).inc();
    SEARCH_MATCHES
        .with_label_values(&[label])
        .observe(results.count() as f64);
    debug!("{} search for '{}' returned {} records", label, query.term, results.count());

    Ok(HttpResponse::Ok().json(results))
}

// ===== Refresh =====
pub async fn refresh(refresher: web::Data<Arc<Refresher>>) -> Result<HttpResponse, ApiError> {
    let records = refresher.refresh().await?;

    Ok(HttpResponse::Ok().json(RefreshResponse {
        message: format!("SDN list reloaded: {} records", records),
    }))
}

// ===== Metrics =====
pub async fn metrics_endpoint() -> HttpResponse {
    match metrics::render_metrics() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(body),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/sanctions")
            .route("/search", web::get().to(search_concise))
            .route("/search/full", web::get().to(search_full))
            .route("/refresh", web::post().to(refresh)),
    )
    .route("/health", web::get().to(health_check))
    .route("/metrics", web::get().to(metrics_endpoint));
}
