//! Objects of the registered BMF models

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, sqlite::SqliteRow};

use bmf_types::meta_adapter::{CreateModuleObject, ModuleObject, ObjectFilter, UpdateModuleObject};
use bmf_types::prelude::*;

use crate::utils::{collect_res, decode_err, inspect, map_opt, map_res};

fn object_from_row(model: &ModelId, row: &SqliteRow) -> Result<ModuleObject, sqlx::Error> {
	let data: String = row.try_get("data")?;
	Ok(ModuleObject {
		pk: row.try_get("obj_id")?,
		model: model.clone(),
		name: row.try_get::<String, _>("name")?.into_boxed_str(),
		state: row.try_get::<Option<String>, _>("state")?.map(String::into_boxed_str),
		data: serde_json::from_str(&data).map_err(decode_err)?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn read(db: &SqlitePool, model: &ModelId, pk: Pk) -> ClResult<Option<ModuleObject>> {
	let res = sqlx::query(
		"SELECT obj_id, name, state, data, created_at FROM module_objects
		WHERE app_label = ? AND model_name = ? AND obj_id = ?",
	)
	.bind(model.app_label.as_ref())
	.bind(model.model_name.as_ref())
	.bind(pk)
	.fetch_optional(db)
	.await;
	map_opt(res, |row| object_from_row(model, &row))
}

pub(crate) async fn list(
	db: &SqlitePool,
	model: &ModelId,
	filter: &ObjectFilter,
) -> ClResult<Vec<ModuleObject>> {
	let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(
		"SELECT obj_id, name, state, data, created_at FROM module_objects WHERE app_label = ",
	);
	query
		.push_bind(model.app_label.as_ref())
		.push(" AND model_name = ")
		.push_bind(model.model_name.as_ref());
	if let Some(state) = &filter.state {
		query.push(" AND state = ").push_bind(state.as_ref());
	}
	query.push(" ORDER BY obj_id");

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	collect_res(rows.iter().map(|row| object_from_row(model, row)))
}

pub(crate) async fn create(
	db: &SqlitePool,
	model: &ModelId,
	object: &CreateModuleObject<'_>,
) -> ClResult<Pk> {
	let res = sqlx::query(
		"INSERT INTO module_objects (app_label, model_name, name, state, data)
		VALUES (?, ?, ?, ?, ?) RETURNING obj_id",
	)
	.bind(model.app_label.as_ref())
	.bind(model.model_name.as_ref())
	.bind(object.name)
	.bind(object.state)
	.bind(serde_json::to_string(object.data)?)
	.fetch_one(db)
	.await;
	map_res(res, |row| row.try_get(0))
}

pub(crate) async fn update(
	db: &SqlitePool,
	model: &ModelId,
	pk: Pk,
	object: &UpdateModuleObject<'_>,
) -> ClResult<()> {
	let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE module_objects SET ");
	let mut has_updates = false;
	{
		let mut fields = query.separated(", ");
		if let Some(name) = object.name {
			fields.push("name = ").push_bind_unseparated(name);
			has_updates = true;
		}
		if let Some(state) = object.state {
			fields.push("state = ").push_bind_unseparated(state);
			has_updates = true;
		}
		if let Some(data) = object.data {
			fields.push("data = ").push_bind_unseparated(serde_json::to_string(data)?);
			has_updates = true;
		}
	}
	if !has_updates {
		return Ok(());
	}
	query
		.push(" WHERE app_label = ")
		.push_bind(model.app_label.as_ref())
		.push(" AND model_name = ")
		.push_bind(model.model_name.as_ref())
		.push(" AND obj_id = ")
		.push_bind(pk);

	let res = query.build().execute(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

pub(crate) async fn delete(db: &SqlitePool, model: &ModelId, pk: Pk) -> ClResult<()> {
	let res = sqlx::query(
		"DELETE FROM module_objects WHERE app_label = ? AND model_name = ? AND obj_id = ?",
	)
	.bind(model.app_label.as_ref())
	.bind(model.model_name.as_ref())
	.bind(pk)
	.execute(db)
	.await
	.inspect_err(inspect)
	.map_err(|_| Error::DbError)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(())
}

// vim: ts=4
