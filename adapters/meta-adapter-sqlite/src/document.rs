//! Documents (file attachments)

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, sqlite::SqliteRow};

use bmf_types::meta_adapter::{ContentLink, CreateDocument, Document, ListDocumentOptions};
use bmf_types::prelude::*;

use crate::utils::{collect_res, inspect, map_opt, map_res};

const DOCUMENT_COLUMNS: &str = "SELECT doc_id, name, file, mimetype, size, is_static, \
	content_app, content_model, content_pk, created_at FROM documents";

fn document_from_row(row: &SqliteRow) -> Result<Document, sqlx::Error> {
	let content_app: Option<String> = row.try_get("content_app")?;
	let content_model: Option<String> = row.try_get("content_model")?;
	let content_pk: Option<Pk> = row.try_get("content_pk")?;
	let content = match (content_app, content_model, content_pk) {
		(Some(app_label), Some(model_name), Some(object_pk)) => {
			Some(ContentLink { model: ModelId::new(app_label, model_name), object_pk })
		}
		_ => None,
	};
	let size: i64 = row.try_get("size")?;

	Ok(Document {
		pk: row.try_get("doc_id")?,
		name: row.try_get::<String, _>("name")?.into_boxed_str(),
		file: row.try_get::<String, _>("file")?.into_boxed_str(),
		mimetype: row.try_get::<String, _>("mimetype")?.into_boxed_str(),
		size: u64::try_from(size).unwrap_or_default(),
		is_static: row.try_get("is_static")?,
		content,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn read(db: &SqlitePool, pk: Pk) -> ClResult<Option<Document>> {
	let res = sqlx::query(&format!("{} WHERE doc_id = ?", DOCUMENT_COLUMNS))
		.bind(pk)
		.fetch_optional(db)
		.await;
	map_opt(res, |row| document_from_row(&row))
}

pub(crate) async fn list(db: &SqlitePool, opts: &ListDocumentOptions) -> ClResult<Vec<Document>> {
	let mut query: QueryBuilder<Sqlite> = QueryBuilder::new(DOCUMENT_COLUMNS);
	query.push(" WHERE is_static = ").push_bind(opts.is_static);
	if let Some(content) = &opts.content {
		query
			.push(" AND content_app = ")
			.push_bind(content.model.app_label.as_ref())
			.push(" AND content_model = ")
			.push_bind(content.model.model_name.as_ref())
			.push(" AND content_pk = ")
			.push_bind(content.object_pk);
	}
	query.push(" ORDER BY doc_id");

	let rows = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	collect_res(rows.iter().map(document_from_row))
}

pub(crate) async fn create(db: &SqlitePool, doc: &CreateDocument<'_>) -> ClResult<Pk> {
	let content = doc.content.as_ref();
	let res = sqlx::query(
		"INSERT INTO documents (name, file, mimetype, size, is_static, content_app, content_model, content_pk)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING doc_id",
	)
	.bind(doc.name)
	.bind(doc.file)
	.bind(doc.mimetype)
	.bind(i64::try_from(doc.size).map_err(|_| Error::ValidationError("file too large".into()))?)
	.bind(doc.is_static)
	.bind(content.map(|c| c.model.app_label.as_ref()))
	.bind(content.map(|c| c.model.model_name.as_ref()))
	.bind(content.map(|c| c.object_pk))
	.fetch_one(db)
	.await;
	map_res(res, |row| row.try_get(0))
}

// vim: ts=4
