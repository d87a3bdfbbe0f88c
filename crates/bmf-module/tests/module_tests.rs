//! Module views through the full router

mod common;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use bmf_types::meta_adapter::CreateModuleObject;

use common::*;

async fn json_body(res: axum::response::Response) -> Value {
	let body = res.into_body().collect().await.expect("body").to_bytes();
	serde_json::from_slice(&body).expect("json")
}

#[tokio::test]
async fn test_list_filtered_by_view_permission() {
	let t = create_test_app().await;
	let data = json!({});
	t.app
		.meta_adapter
		.create_module_object(&lead(), &CreateModuleObject { name: "ACME", state: None, data: &data })
		.await
		.expect("object");
	let viewer = login_user(&t.app, "viewer", false, &["crm.view_lead"]).await;
	let other = login_user(&t.app, "other", false, &[]).await;

	let res = t
		.router
		.clone()
		.oneshot(request("GET", "/api/module/crm/lead", &viewer, false, None))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::OK);
	let json = json_body(res).await;
	assert_eq!(json["data"]["objects"].as_array().map(Vec::len), Some(1));
	assert_eq!(json["data"]["bmfmodule"]["namespace_index"], json!("lead:index"));
	assert_eq!(json["data"]["bmfmodule"]["verbose_name_plural"], json!("Leads"));
	assert_eq!(json["data"]["bmfmodule"]["can_clone"], json!(false));

	let res = t
		.router
		.clone()
		.oneshot(request("GET", "/api/module/crm/lead", &other, false, None))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_detail_workflow_context() {
	let t = create_test_app().await;
	let data = json!({});
	let pk = t
		.app
		.meta_adapter
		.create_module_object(&lead(), &CreateModuleObject { name: "ACME", state: None, data: &data })
		.await
		.expect("object");
	let root = login_user(&t.app, "root", true, &[]).await;

	let uri = format!("/api/module/crm/lead/{}", pk);
	let res = t.router.clone().oneshot(request("GET", &uri, &root, false, None)).await.expect("response");
	assert_eq!(res.status(), StatusCode::OK);
	let json = json_body(res).await;
	assert_eq!(json["data"]["bmfworkflow"]["enabled"], json!(true));
	assert_eq!(json["data"]["bmfworkflow"]["state"]["key"], json!("new"));
	assert_eq!(json["data"]["bmfworkflow"]["transitions"][0]["key"], json!("win"));
	assert_eq!(json["data"]["bmfmodule"]["can_clone"], json!(true));

	// ajax requests get the rendered detail
	let res = t.router.clone().oneshot(request("GET", &uri, &root, true, None)).await.expect("response");
	let json = json_body(res).await;
	assert_eq!(json["status"], json!("ok"));
	assert_eq!(json["object_pk"], json!(pk));
	assert!(json["html"].as_str().is_some_and(|h| h.contains("ACME")));

	let res = t
		.router
		.clone()
		.oneshot(request("GET", "/api/module/crm/lead/999", &root, false, None))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_form() {
	let t = create_test_app().await;
	let editor = login_user(&t.app, "editor", false, &["crm.add_lead", "crm.view_lead"]).await;

	// forms are ajax only
	let res = t
		.router
		.clone()
		.oneshot(request("GET", "/api/module/crm/lead/create", &editor, false, None))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::FORBIDDEN);

	let res = t
		.router
		.clone()
		.oneshot(request("GET", "/api/module/crm/lead/create", &editor, true, None))
		.await
		.expect("response");
	assert_eq!(res.status(), StatusCode::OK);
	assert!(res.headers().get("cache-control").is_some());
	let json = json_body(res).await;
	assert!(json["html"].as_str().is_some_and(|h| h.contains("/api/module/crm/lead/create")));

	let res = t
		.router
		.clone()
		.oneshot(request("POST", "/api/module/crm/lead/create", &editor, true, Some("name=")))
		.await
		.expect("response");
	let json = json_body(res).await;
	assert_eq!(json["status"], json!("error"));

	let res = t
		.router
		.clone()
		.oneshot(request(
			"POST",
			"/api/module/crm/lead/create",
			&editor,
			true,
			Some("name=ACME&data=%7B%22city%22%3A%22Vienna%22%7D"),
		))
		.await
		.expect("response");
	let json = json_body(res).await;
	assert_eq!(json["status"], json!("valid"));
	let pk = json["object_pk"].as_i64().expect("pk");
	assert_eq!(json["redirect"], json!(format!("/api/module/crm/lead/{}", pk)));

	let object = t.app.meta_adapter.read_module_object(&lead(), pk).await.expect("read").expect("object");
	assert_eq!(object.name.as_ref(), "ACME");
	assert_eq!(object.data, json!({ "city": "Vienna" }));
}

#[tokio::test]
async fn test_update_follows_next() {
	let t = create_test_app().await;
	let data = json!({});
	let pk = t
		.app
		.meta_adapter
		.create_module_object(&lead(), &CreateModuleObject { name: "ACME", state: None, data: &data })
		.await
		.expect("object");
	let editor = login_user(&t.app, "editor", false, &["crm.change_lead", "crm.view_lead"]).await;

	let uri = format!("/api/module/crm/lead/{}/update", pk);
	let res = t
		.router
		.clone()
		.oneshot(request("POST", &uri, &editor, true, Some("name=ACME+Corp&next=%2Fbmf%2F")))
		.await
		.expect("response");
	let json = json_body(res).await;
	assert_eq!(json["status"], json!("valid"));
	assert_eq!(json["redirect"], json!("/bmf/"));

	// foreign hosts are ignored
	let res = t
		.router
		.clone()
		.oneshot(request(
			"POST",
			&uri,
			&editor,
			true,
			Some("name=ACME&next=https%3A%2F%2Fevil.example%2F"),
		))
		.await
		.expect("response");
	let json = json_body(res).await;
	assert_eq!(json["redirect"], json!(format!("/api/module/crm/lead/{}", pk)));
}

#[tokio::test]
async fn test_workflow_blocks_update_and_delete() {
	let t = create_test_app().await;
	let data = json!({});
	let pk = t
		.app
		.meta_adapter
		.create_module_object(
			&lead(),
			&CreateModuleObject { name: "ACME", state: Some("won"), data: &data },
		)
		.await
		.expect("object");
	let root = login_user(&t.app, "root", true, &[]).await;

	for action in ["update", "delete"] {
		let uri = format!("/api/module/crm/lead/{}/{}", pk, action);
		let res =
			t.router.clone().oneshot(request("GET", &uri, &root, true, None)).await.expect("response");
		assert_eq!(res.status(), StatusCode::FORBIDDEN, "{} of a won lead", action);
	}

	// cloning is not gated by the workflow
	let uri = format!("/api/module/crm/lead/{}/clone", pk);
	let res = t.router.clone().oneshot(request("GET", &uri, &root, true, None)).await.expect("response");
	assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_delete_and_clone() {
	let t = create_test_app().await;
	let data = json!({ "source": "fair" });
	let pk = t
		.app
		.meta_adapter
		.create_module_object(&lead(), &CreateModuleObject { name: "ACME", state: None, data: &data })
		.await
		.expect("object");
	let root = login_user(&t.app, "root", true, &[]).await;

	let uri = format!("/api/module/crm/lead/{}/clone", pk);
	let res = t
		.router
		.clone()
		.oneshot(request("POST", &uri, &root, true, Some("name=ACME+2")))
		.await
		.expect("response");
	let json = json_body(res).await;
	assert_eq!(json["status"], json!("valid"));
	let clone_pk = json["object_pk"].as_i64().expect("pk");
	assert_ne!(clone_pk, pk);

	let uri = format!("/api/module/crm/lead/{}/delete", pk);
	let res = t.router.clone().oneshot(request("POST", &uri, &root, true, Some(""))).await.expect("response");
	let json = json_body(res).await;
	assert_eq!(json["status"], json!("valid"));
	assert_eq!(json["redirect"], json!("/api/module/crm/lead"));

	assert!(t.app.meta_adapter.read_module_object(&lead(), pk).await.expect("read").is_none());
	assert!(t.app.meta_adapter.read_module_object(&lead(), clone_pk).await.expect("read").is_some());
}

// vim: ts=4
