//! Workspace computation and caching

mod common;

use serde_json::json;

use bmf_core::workspace::{Workspace, WorkspaceCategory, workspace_cache_key};
use bmf_types::meta_adapter::CreateUser;

use common::*;

#[tokio::test]
async fn test_workspace_filtered_by_view_permission() {
	let (app, _tmp) = create_test_app(TestOpts::default()).await;
	let user = create_user(
		&app,
		CreateUser {
			username: "alice",
			permissions: &["djangobmf_customer.view_customer", "djangobmf_accounting.add_invoice"],
			..Default::default()
		},
	)
	.await;
	let ctx = user_ctx(&app, &user);

	let workspace = ctx.get_workspace().await.expect("workspace");
	assert_eq!(workspace.categories.len(), 1);
	let category = &workspace.categories[0];
	assert_eq!(category.slug, "customer");
	assert_eq!(category.modules.len(), 1);
	assert_eq!(category.modules[0].model, "djangobmf_customer.customer");
	assert_eq!(category.modules[0].verbose_name_plural, "Customers");
	assert_eq!(category.modules[0].url, "/api/module/djangobmf_customer/customer");
}

#[tokio::test]
async fn test_workspace_superuser_sees_all_categories() {
	let (app, _tmp) = create_test_app(TestOpts::default()).await;
	let user =
		create_user(&app, CreateUser { username: "root", is_superuser: true, ..Default::default() })
			.await;
	let ctx = user_ctx(&app, &user);

	let workspace = ctx.get_workspace().await.expect("workspace");
	let slugs: Vec<_> = workspace.categories.iter().map(|c| c.slug.as_str()).collect();
	assert_eq!(slugs, vec!["transactions", "customer"]);
}

#[tokio::test]
async fn test_workspace_served_from_cache() {
	let (app, _tmp) = create_test_app(TestOpts::default()).await;
	let user =
		create_user(&app, CreateUser { username: "root", is_superuser: true, ..Default::default() })
			.await;
	let ctx = user_ctx(&app, &user);

	let first = ctx.get_workspace().await.expect("workspace");
	let key = workspace_cache_key(user.user_id, &ctx.language);
	assert!(app.cache_adapter.get(&key).await.is_some());

	// A recomputation would not produce this value
	let sentinel = Workspace {
		categories: vec![WorkspaceCategory {
			name: "Cached".into(),
			slug: "cached".into(),
			modules: Vec::new(),
		}],
	};
	app.cache_adapter
		.set(&key, serde_json::to_value(&sentinel).expect("json"), std::time::Duration::from_secs(60))
		.await;

	let second = ctx.get_workspace().await.expect("workspace");
	assert_eq!(second, sentinel);
	assert_ne!(first, second);
}

#[tokio::test]
async fn test_workspace_unreadable_cache_is_recomputed() {
	let (app, _tmp) = create_test_app(TestOpts::default()).await;
	let user =
		create_user(&app, CreateUser { username: "root", is_superuser: true, ..Default::default() })
			.await;
	let ctx = user_ctx(&app, &user);

	let key = workspace_cache_key(user.user_id, &ctx.language);
	app.cache_adapter.set(&key, json!("garbage"), std::time::Duration::from_secs(60)).await;

	let workspace = ctx.get_workspace().await.expect("workspace");
	assert_eq!(workspace.categories.len(), 2);
	let cached = app.cache_adapter.get(&key).await.expect("cached workspace");
	assert_eq!(serde_json::from_value::<Workspace>(cached).expect("workspace"), workspace);
}

#[tokio::test]
async fn test_workspace_cache_is_per_language() {
	let (app, _tmp) = create_test_app(TestOpts::default()).await;
	let user =
		create_user(&app, CreateUser { username: "root", is_superuser: true, ..Default::default() })
			.await;

	user_ctx(&app, &user).get_workspace().await.expect("workspace");
	user_ctx(&app, &user).with_language("de").get_workspace().await.expect("workspace");

	assert!(app.cache_adapter.get(&workspace_cache_key(user.user_id, "en")).await.is_some());
	assert!(app.cache_adapter.get(&workspace_cache_key(user.user_id, "de")).await.is_some());
}

// vim: ts=4
