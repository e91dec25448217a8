use crate::{
    abstract_trait::alert::DynAlertQueryService,
    domain::response::alert::LowStockAlertsResponse,
    middleware::validate::PathParam,
    state::AppState,
};
use axum::{
    Json,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use shared::errors::{ErrorResponse, HttpError};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    get,
    path = "/api/companies/{company_id}/alerts/low-stock",
    tag = "Alert",
    params(("company_id" = i64, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Low-stock alerts across the company's warehouses", body = LowStockAlertsResponse),
        (status = 400, description = "Malformed company id", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_low_stock_alerts(
    Extension(service): Extension<DynAlertQueryService>,
    PathParam(company_id): PathParam<i64>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.find_low_stock_alerts(company_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn alert_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    OpenApiRouter::new()
        .route(
            "/api/companies/{company_id}/alerts/low-stock",
            get(get_low_stock_alerts),
        )
        .layer(Extension(app_state.di_container.alert_query.clone()))
}
