//! Session-backed BMF state
//!
//! The BMF keeps its presentation state (dashboards, views, notification
//! counter) in a single mapping stored in the session under `djangobmf`.
//! Writes always re-read the current mapping and merge into it.

use parking_lot::Mutex;
use serde_json::{Map, Value, json};

use bmf_types::session_adapter::SessionRecord;

use crate::app::VERSION;
use crate::context::BmfCtx;
use crate::prelude::*;

pub const SESSION_KEY: &str = "djangobmf";

/// Placeholder URL of dashboard views whose route can not be reversed
pub const UNRESOLVED_VIEW_URL: &str = "#";

// Session //
//*********//
#[derive(Debug)]
pub struct Session {
	key: Box<str>,
	is_new: bool,
	user_id: Option<UserId>,
	state: Mutex<SessionState>,
}

#[derive(Debug, Default)]
struct SessionState {
	data: Map<String, Value>,
	modified: bool,
}

impl Session {
	pub fn new(key: impl Into<Box<str>>, user_id: Option<UserId>) -> Self {
		Self {
			key: key.into(),
			is_new: true,
			user_id,
			state: Mutex::new(SessionState::default()),
		}
	}

	pub fn from_record(key: impl Into<Box<str>>, record: SessionRecord) -> Self {
		Self {
			key: key.into(),
			is_new: false,
			user_id: record.user_id,
			state: Mutex::new(SessionState { data: record.data, modified: false }),
		}
	}

	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn is_new(&self) -> bool {
		self.is_new
	}

	pub fn user_id(&self) -> Option<UserId> {
		self.user_id
	}

	pub fn get(&self, key: &str) -> Option<Value> {
		self.state.lock().data.get(key).cloned()
	}

	pub fn set(&self, key: impl Into<String>, value: Value) {
		let mut state = self.state.lock();
		state.data.insert(key.into(), value);
		state.modified = true;
	}

	pub fn is_modified(&self) -> bool {
		self.state.lock().modified
	}

	pub fn to_record(&self, expires_at: Timestamp) -> SessionRecord {
		SessionRecord { user_id: self.user_id, data: self.state.lock().data.clone(), expires_at }
	}
}

// Session data operations //
//*************************//
impl BmfCtx {
	/// Current BMF session mapping, `{version}` if the session has none
	pub fn read_session_data(&self) -> Map<String, Value> {
		match self.session.get(SESSION_KEY) {
			Some(Value::Object(data)) => data,
			_ => {
				let mut data = Map::new();
				data.insert("version".into(), json!(VERSION));
				data
			}
		}
	}

	/// Merges `data` into the stored mapping key by key
	pub fn write_session_data(&self, data: Map<String, Value>) {
		let mut session_data = self.read_session_data();
		session_data.extend(data);
		self.session.set(SESSION_KEY, Value::Object(session_data));
	}

	/// Updates the notification counter. Without `count` the unread
	/// notifications of the user are counted.
	pub async fn update_notification(&self, count: Option<u64>) -> ClResult<()> {
		let user = self.user()?;
		debug!(user = %user.user_id, "Updating notifications");

		let count = match count {
			Some(count) => count,
			None => self.app.meta_adapter.count_unread_notifications(user.user_id).await?,
		};

		let mut data = Map::new();
		data.insert(
			"notification_last_update".into(),
			json!(chrono::Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()),
		);
		data.insert("notification_count".into(), json!(count));
		self.write_session_data(data);
		Ok(())
	}

	/// Rebuilds the dashboard list and selects the dashboard `pk` as current.
	/// Returns false for anonymous requests.
	pub async fn update_dashboard(&self, pk: Option<Pk>) -> ClResult<bool> {
		let Some(user) = self.user.as_deref() else {
			return Ok(false);
		};
		debug!(user = %user.user_id, "Updating dashboards");

		let mut dashboards = Vec::new();
		let mut current = Value::Null;
		for dashboard in self.app.meta_adapter.list_dashboards(user.user_id).await? {
			let entry = json!({ "pk": dashboard.pk, "name": dashboard.name });
			if pk == Some(dashboard.pk) {
				current = entry.clone();
			}
			dashboards.push(entry);
		}

		let update_views = !current.is_null();
		let mut data = Map::new();
		data.insert("dashboard".into(), Value::Array(dashboards));
		data.insert("dashboard_current".into(), current);
		self.write_session_data(data);

		if update_views {
			self.update_views().await?;
		}
		Ok(true)
	}

	/// Rebuilds the view list of the current dashboard. Views whose route
	/// can not be reversed are listed with a `#` URL.
	pub async fn update_views(&self) -> ClResult<()> {
		let session_data = self.read_session_data();
		let Some(current) = session_data
			.get("dashboard_current")
			.and_then(|d| d.get("pk"))
			.and_then(Value::as_i64)
		else {
			return Ok(());
		};
		debug!(dashboard = current, "Updating views");

		let mut views = Vec::new();
		for view in self.app.meta_adapter.list_dashboard_views(current).await? {
			let url = match self.app.urls.reverse(&view.route, &view.route_kwargs) {
				Ok(url) => url,
				Err(err) => {
					debug!(view = view.pk, "Dashboard view without URL: {}", err);
					UNRESOLVED_VIEW_URL.to_string()
				}
			};
			views.push(json!({
				"pk": view.pk,
				"name": view.name,
				"category": view.category,
				"url": url,
			}));
		}

		let mut data = Map::new();
		data.insert("views".into(), Value::Array(views));
		self.write_session_data(data);
		Ok(())
	}
}

// vim: ts=4
