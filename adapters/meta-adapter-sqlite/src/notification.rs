//! Notifications. Only the unread counter is read by the web layer.

use sqlx::{Row, SqlitePool};

use bmf_types::prelude::*;

use crate::utils::map_res;

pub(crate) async fn create(db: &SqlitePool, user_id: UserId, unread: bool) -> ClResult<Pk> {
	let res = sqlx::query(
		"INSERT INTO notifications (user_id, unread) VALUES (?, ?) RETURNING notification_id",
	)
	.bind(i64::from(user_id.0))
	.bind(unread)
	.fetch_one(db)
	.await;
	map_res(res, |row| row.try_get(0))
}

pub(crate) async fn count_unread(db: &SqlitePool, user_id: UserId) -> ClResult<u64> {
	let res = sqlx::query("SELECT count(*) FROM notifications WHERE user_id = ? AND unread")
		.bind(i64::from(user_id.0))
		.fetch_one(db)
		.await;
	let count: i64 = map_res(res, |row| row.try_get(0))?;
	Ok(u64::try_from(count).unwrap_or_default())
}

// vim: ts=4
