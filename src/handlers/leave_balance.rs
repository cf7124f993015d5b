use actix_web::{
    HttpRequest, HttpResponse, Result,
    web::{self, Data},
};
use serde::Deserialize;

use crate::{
    error::AppError,
    handlers::shared::ApiResponse,
    middleware::RequestIdExt,
    services::leave_balance::LeaveBalanceService,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceQuery {
    #[serde(alias = "employee_id")]
    pub employee_id: Option<String>,
}

/// Get leave balance for the employee named in the query string
pub async fn get_leave_balance(
    req: HttpRequest,
    query: web::Query<LeaveBalanceQuery>,
    service: Data<LeaveBalanceService>,
) -> Result<HttpResponse> {
    let employee_id = query.into_inner().employee_id.unwrap_or_default();

    respond_with_balance(&req, &service, &employee_id).await
}

/// Get leave balance for the employee named in the path
pub async fn get_leave_balance_by_path(
    req: HttpRequest,
    path: web::Path<String>,
    service: Data<LeaveBalanceService>,
) -> Result<HttpResponse> {
    let employee_id = path.into_inner();

    respond_with_balance(&req, &service, &employee_id).await
}

async fn respond_with_balance(
    req: &HttpRequest,
    service: &LeaveBalanceService,
    employee_id: &str,
) -> Result<HttpResponse> {
    log::debug!(
        "Computing leave balance for employee '{}' (correlation_id={})",
        employee_id,
        req.correlation_id().unwrap_or_default()
    );

    let snapshot = service
        .compute_balance(employee_id)
        .await
        .map_err(AppError::from)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(snapshot)))
}
