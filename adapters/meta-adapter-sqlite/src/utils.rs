//! Shared utilities for SQLite adapter
//!
//! Error mapping helpers used across all domain modules.

use bmf_types::prelude::*;
use sqlx::sqlite::SqliteRow;

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a single-row query result, translating SQL errors to ClResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> ClResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Map an optional row, `None` if the query found nothing
pub(crate) fn map_opt<T, F>(row: Result<Option<SqliteRow>, sqlx::Error>, f: F) -> ClResult<Option<T>>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(Some(row)) => f(row).map(Some).inspect_err(inspect).map_err(|_| Error::DbError),
		Ok(None) => Ok(None),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(
	iter: impl Iterator<Item = Result<T, sqlx::Error>> + Unpin,
) -> ClResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

/// Wraps a JSON column decoding failure
pub(crate) fn decode_err(err: serde_json::Error) -> sqlx::Error {
	sqlx::Error::Decode(Box::new(err))
}

// vim: ts=4
