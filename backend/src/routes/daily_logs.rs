//! Daily log routes
//!
//! All endpoints require authentication and only ever touch the caller's
//! own logs. Dates in paths and queries are `YYYY-MM-DD`.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::DailyLogService;
use crate::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use balance_plus_shared::dates::{parse_date, today_local};
use balance_plus_shared::types::{
    DayEntry, DeleteLogsQuery, DeleteLogsResponse, LogRangeQuery, SaveDailyLogRequest, WeekQuery,
    WeekResponse,
};
use balance_plus_shared::DailyLog;
use chrono::NaiveDate;

pub fn daily_log_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_logs).delete(delete_logs))
        .route("/week", get(last_seven_days))
        .route("/month/:year/:month", get(month_logs))
        .route("/:date", get(get_log).put(save_log))
}

fn date_from_path(path: Result<Path<String>, PathRejection>) -> ApiResult<NaiveDate> {
    let Path(raw) = path?;
    parse_date(&raw).map_err(ApiError::Validation)
}

/// PUT /logs/:date
async fn save_log(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<SaveDailyLogRequest>, JsonRejection>,
) -> ApiResult<Json<DailyLog>> {
    let date = date_from_path(path)?;
    let Json(fields) = payload?;

    let log = DailyLogService::save_log(
        state.repos.daily_logs.as_ref(),
        auth_user.user_id,
        date,
        fields,
    )
    .await?;
    Ok(Json(log))
}

/// GET /logs/:date
async fn get_log(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<DailyLog>> {
    let date = date_from_path(path)?;
    let log =
        DailyLogService::get_log(state.repos.daily_logs.as_ref(), auth_user.user_id, date).await?;
    Ok(Json(log))
}

/// GET /logs?start=..&end=..
async fn list_logs(
    State(state): State<AppState>,
    auth_user: AuthUser,
    query: Result<Query<LogRangeQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<DayEntry>>> {
    let Query(range) = query?;
    let entries = DailyLogService::list_between(
        state.repos.daily_logs.as_ref(),
        auth_user.user_id,
        range.start,
        range.end,
    )
    .await?;
    Ok(Json(entries))
}

/// GET /logs/month/:year/:month
async fn month_logs(
    State(state): State<AppState>,
    auth_user: AuthUser,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> ApiResult<Json<Vec<DayEntry>>> {
    let Path((year, month)) = path?;
    let entries =
        DailyLogService::month(state.repos.daily_logs.as_ref(), auth_user.user_id, year, month)
            .await?;
    Ok(Json(entries))
}

/// GET /logs/week?end=..
async fn last_seven_days(
    State(state): State<AppState>,
    auth_user: AuthUser,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> ApiResult<Json<WeekResponse>> {
    let Query(week) = query?;
    let today = week.end.unwrap_or_else(today_local);

    let response =
        DailyLogService::last_seven_days(state.repos.daily_logs.as_ref(), auth_user.user_id, today)
            .await?;
    Ok(Json(response))
}

/// DELETE /logs?before=..
async fn delete_logs(
    State(state): State<AppState>,
    auth_user: AuthUser,
    query: Result<Query<DeleteLogsQuery>, QueryRejection>,
) -> ApiResult<Json<DeleteLogsResponse>> {
    let Query(params) = query?;
    let deleted = DailyLogService::delete_before(
        state.repos.daily_logs.as_ref(),
        auth_user.user_id,
        params.before,
    )
    .await?;
    Ok(Json(DeleteLogsResponse { deleted }))
}
