//! Workspace: the categories and modules visible to a user
//!
//! The workspace is cached per user and language for a fixed time. Cached
//! values are advisory, a missing or unreadable entry is recomputed.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::context::BmfCtx;
use crate::prelude::*;

pub const WORKSPACE_CACHE_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceModule {
	pub model: String,
	pub verbose_name_plural: String,
	pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceCategory {
	pub name: String,
	pub slug: String,
	pub modules: Vec<WorkspaceModule>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
	pub categories: Vec<WorkspaceCategory>,
}

pub fn workspace_cache_key(user_id: UserId, language: &str) -> String {
	format!("bmf_workspace_{}_{}", user_id, language)
}

impl BmfCtx {
	pub async fn get_workspace(&self) -> ClResult<Workspace> {
		let user = self.user()?;
		let cache_key = workspace_cache_key(user.user_id, &self.language);

		if let Some(cached) = self.app.cache_adapter.get(&cache_key).await {
			match serde_json::from_value::<Workspace>(cached) {
				Ok(workspace) => return Ok(workspace),
				Err(err) => warn!("Discarding unreadable workspace cache {}: {}", cache_key, err),
			}
		}

		debug!(user = %user.user_id, "Reload workspace cache ({})", cache_key);
		let workspace = self.build_workspace();
		self.app
			.cache_adapter
			.set(&cache_key, serde_json::to_value(&workspace)?, WORKSPACE_CACHE_TIMEOUT)
			.await;
		Ok(workspace)
	}

	fn build_workspace(&self) -> Workspace {
		let app = &self.app;
		let mut categories = Vec::new();

		for category in app.categories.iter() {
			let modules: Vec<_> = app
				.modules
				.in_category(category.slug)
				.filter(|m| self.can_view(&m.model))
				.map(|m| WorkspaceModule {
					model: m.model.to_string(),
					verbose_name_plural: m.verbose_name_plural.to_string(),
					url: app
						.urls
						.reverse::<&str, &str>(&m.namespace_index(), [])
						.unwrap_or_else(|_| crate::session::UNRESOLVED_VIEW_URL.to_string()),
				})
				.collect();

			if !modules.is_empty() {
				categories.push(WorkspaceCategory {
					name: category.name.to_string(),
					slug: category.slug.to_string(),
					modules,
				});
			}
		}

		Workspace { categories }
	}
}

// vim: ts=4
