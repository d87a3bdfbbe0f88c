//! Session state endpoints

use axum::{
	Json,
	extract::{Path, Query},
};
use serde::Deserialize;
use serde_json::{Map, Value};

use bmf_types::types::ApiResponse;

use crate::extract::Ctx;
use crate::prelude::*;
use crate::workspace::Workspace;

/// GET /api/bmf/context
pub async fn get_context(ctx: Ctx) -> ClResult<Json<ApiResponse<Map<String, Value>>>> {
	Ok(Json(ApiResponse::new(ctx.view_context().await?)))
}

/// GET /api/bmf/workspace
pub async fn get_workspace(ctx: Ctx) -> ClResult<Json<ApiResponse<Workspace>>> {
	Ok(Json(ApiResponse::new(ctx.get_workspace().await?)))
}

/// POST /api/bmf/dashboard/{pk}
pub async fn post_dashboard(
	ctx: Ctx,
	Path(pk): Path<Pk>,
) -> ClResult<Json<ApiResponse<Map<String, Value>>>> {
	ctx.update_dashboard(Some(pk)).await?;
	Ok(Json(ApiResponse::new(ctx.read_session_data())))
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
	count: Option<u64>,
}

/// POST /api/bmf/notification
pub async fn post_notification(
	ctx: Ctx,
	Query(query): Query<NotificationQuery>,
) -> ClResult<Json<ApiResponse<Map<String, Value>>>> {
	ctx.update_notification(query.count).await?;
	Ok(Json(ApiResponse::new(ctx.read_session_data())))
}

// vim: ts=4
