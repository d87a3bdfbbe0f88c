//! Database schema initialization
//!
//! Creates the tables and indexes of the BMF records if they do not exist.

use sqlx::SqlitePool;

/// Initialize the database schema with all required tables and indexes
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Users
	//*******
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS users (
		user_id integer NOT NULL,
		username text NOT NULL,
		is_active boolean NOT NULL DEFAULT 1,
		is_superuser boolean NOT NULL DEFAULT 0,
		employee integer,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(user_id AUTOINCREMENT),
		UNIQUE(username)
	)",
	)
	.execute(&mut *tx)
	.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS user_permissions (
		user_id integer NOT NULL,
		perm text NOT NULL,
		PRIMARY KEY(user_id, perm)
	)",
	)
	.execute(&mut *tx)
	.await?;

	// Notifications
	//***************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS notifications (
		notification_id integer NOT NULL,
		user_id integer NOT NULL,
		unread boolean NOT NULL DEFAULT 1,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(notification_id AUTOINCREMENT)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_notifications_user ON notifications(user_id, unread)",
	)
	.execute(&mut *tx)
	.await?;

	// Dashboards
	//************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS dashboards (
		dashboard_id integer NOT NULL,
		user_id integer NOT NULL,
		name text,
		PRIMARY KEY(dashboard_id AUTOINCREMENT)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_dashboards_user ON dashboards(user_id)")
		.execute(&mut *tx)
		.await?;

	sqlx::query(
		"CREATE TABLE IF NOT EXISTS dashboard_views (
		view_id integer NOT NULL,
		dashboard_id integer NOT NULL,
		name text NOT NULL,
		category text NOT NULL,
		route text NOT NULL,
		route_kwargs json NOT NULL DEFAULT '{}',
		PRIMARY KEY(view_id AUTOINCREMENT)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_dashboard_views_dashboard ON dashboard_views(dashboard_id)",
	)
	.execute(&mut *tx)
	.await?;

	// Documents
	//***********
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS documents (
		doc_id integer NOT NULL,
		name text NOT NULL,
		file text NOT NULL,
		mimetype text NOT NULL,
		size integer NOT NULL DEFAULT 0,
		is_static boolean NOT NULL DEFAULT 0,
		content_app text,
		content_model text,
		content_pk integer,
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(doc_id AUTOINCREMENT)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_documents_content ON documents(content_app, content_model, content_pk)",
	)
	.execute(&mut *tx)
	.await?;

	// Module objects
	//****************
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS module_objects (
		obj_id integer NOT NULL,
		app_label text NOT NULL,
		model_name text NOT NULL,
		name text NOT NULL,
		state text,
		data json NOT NULL DEFAULT 'null',
		created_at datetime DEFAULT (unixepoch()),
		PRIMARY KEY(obj_id AUTOINCREMENT)
	)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_module_objects_model ON module_objects(app_label, model_name)",
	)
	.execute(&mut *tx)
	.await?;

	tx.commit().await?;

	Ok(())
}

// vim: ts=4
