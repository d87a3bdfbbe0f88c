//! Users and their granted permissions

use sqlx::{Row, SqlitePool};

use bmf_types::meta_adapter::{CreateUser, User};
use bmf_types::prelude::*;

use crate::utils::{collect_res, inspect, map_res};

pub(crate) async fn read(db: &SqlitePool, user_id: UserId) -> ClResult<User> {
	let res = sqlx::query(
		"SELECT username, is_active, is_superuser, employee FROM users WHERE user_id = ?",
	)
	.bind(i64::from(user_id.0))
	.fetch_one(db)
	.await;

	let mut user = map_res(res, |row| {
		Ok(User {
			user_id,
			username: row.try_get::<String, _>("username")?.into_boxed_str(),
			is_active: row.try_get("is_active")?,
			is_superuser: row.try_get("is_superuser")?,
			permissions: Vec::new(),
			employee: row.try_get("employee")?,
		})
	})?;

	let rows = sqlx::query("SELECT perm FROM user_permissions WHERE user_id = ? ORDER BY perm")
		.bind(i64::from(user_id.0))
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	user.permissions =
		collect_res(rows.iter().map(|row| row.try_get::<String, _>("perm").map(String::into_boxed_str)))?;

	Ok(user)
}

pub(crate) async fn create(db: &SqlitePool, user: &CreateUser<'_>) -> ClResult<UserId> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	let res = sqlx::query(
		"INSERT INTO users (username, is_superuser, employee) VALUES (?, ?, ?) RETURNING user_id",
	)
	.bind(user.username)
	.bind(user.is_superuser)
	.bind(user.employee)
	.fetch_one(&mut *tx)
	.await;
	let user_id: i64 = map_res(res, |row| row.try_get(0))?;

	for perm in user.permissions {
		sqlx::query("INSERT OR IGNORE INTO user_permissions (user_id, perm) VALUES (?, ?)")
			.bind(user_id)
			.bind(*perm)
			.execute(&mut *tx)
			.await
			.inspect_err(inspect)
			.map_err(|_| Error::DbError)?;
	}

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(UserId(u32::try_from(user_id).map_err(|_| Error::DbError)?))
}

// vim: ts=4
