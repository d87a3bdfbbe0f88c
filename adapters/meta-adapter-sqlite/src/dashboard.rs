//! Dashboards and their views

use std::collections::HashMap;

use sqlx::{Row, SqlitePool};

use bmf_types::meta_adapter::{CreateDashboardView, Dashboard, DashboardView};
use bmf_types::prelude::*;

use crate::utils::{collect_res, decode_err, inspect, map_res};

/// Lists the named dashboards of a user
pub(crate) async fn list(db: &SqlitePool, user_id: UserId) -> ClResult<Vec<Dashboard>> {
	let rows = sqlx::query(
		"SELECT dashboard_id, name FROM dashboards
		WHERE user_id = ? AND name IS NOT NULL ORDER BY dashboard_id",
	)
	.bind(i64::from(user_id.0))
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	collect_res(rows.iter().map(|row| {
		Ok(Dashboard {
			pk: row.try_get("dashboard_id")?,
			name: row.try_get::<String, _>("name")?.into_boxed_str(),
		})
	}))
}

pub(crate) async fn create(db: &SqlitePool, user_id: UserId, name: Option<&str>) -> ClResult<Pk> {
	let res = sqlx::query("INSERT INTO dashboards (user_id, name) VALUES (?, ?) RETURNING dashboard_id")
		.bind(i64::from(user_id.0))
		.bind(name)
		.fetch_one(db)
		.await;
	map_res(res, |row| row.try_get(0))
}

pub(crate) async fn list_views(db: &SqlitePool, dashboard: Pk) -> ClResult<Vec<DashboardView>> {
	let rows = sqlx::query(
		"SELECT view_id, dashboard_id, name, category, route, route_kwargs FROM dashboard_views
		WHERE dashboard_id = ? ORDER BY view_id",
	)
	.bind(dashboard)
	.fetch_all(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;

	collect_res(rows.iter().map(|row| {
		let kwargs: String = row.try_get("route_kwargs")?;
		Ok(DashboardView {
			pk: row.try_get("view_id")?,
			dashboard: row.try_get("dashboard_id")?,
			name: row.try_get::<String, _>("name")?.into_boxed_str(),
			category: row.try_get::<String, _>("category")?.into_boxed_str(),
			route: row.try_get::<String, _>("route")?.into_boxed_str(),
			route_kwargs: serde_json::from_str(&kwargs).map_err(decode_err)?,
		})
	}))
}

pub(crate) async fn create_view(db: &SqlitePool, view: &CreateDashboardView<'_>) -> ClResult<Pk> {
	let kwargs: HashMap<&str, &str> = view.route_kwargs.iter().copied().collect();
	let kwargs = serde_json::to_string(&kwargs)?;

	let res = sqlx::query(
		"INSERT INTO dashboard_views (dashboard_id, name, category, route, route_kwargs)
		VALUES (?, ?, ?, ?, ?) RETURNING view_id",
	)
	.bind(view.dashboard)
	.bind(view.name)
	.bind(view.category)
	.bind(view.route)
	.bind(kwargs)
	.fetch_one(db)
	.await;
	map_res(res, |row| row.try_get(0))
}

// vim: ts=4
