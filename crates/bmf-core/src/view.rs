//! Context of full page views

use serde_json::{Map, Value, json};

use crate::app::VERSION;
use crate::context::BmfCtx;
use crate::prelude::*;

impl BmfCtx {
	/// Builds `{djangobmf: <session data>, workspace: <workspace>}`. Loads the
	/// dashboards first if the session has none yet.
	pub async fn view_context(&self) -> ClResult<Map<String, Value>> {
		if !self.read_session_data().contains_key("dashboard") {
			self.update_dashboard(None).await?;
		}

		let workspace = self.get_workspace().await?;
		let mut session_data = self.read_session_data();

		// the stored version may be stale during development
		if self.app.opts.debug {
			session_data.insert("version".into(), json!(VERSION));
		}

		let mut context = Map::new();
		context.insert("djangobmf".into(), Value::Object(session_data));
		context.insert("workspace".into(), serde_json::to_value(workspace)?);
		Ok(context)
	}
}

// vim: ts=4
