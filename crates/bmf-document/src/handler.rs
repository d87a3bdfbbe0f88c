//! Document handlers
//!
//! Creating, changing and deleting documents is not supported yet. These
//! endpoints still resolve the document (404 if it is missing) and answer
//! with a fixed message without touching it.

use axum::{Json, extract::Path, response::Response};
use serde::Serialize;
use std::sync::Arc;

use bmf_core::BmfCtx;
use bmf_types::meta_adapter::{ContentLink, Document, ListDocumentOptions, ModuleObject};
use bmf_types::types::ApiResponse;

use crate::prelude::*;
use crate::send::download_response;

pub const NOT_IMPLEMENTED: &str = "Not implemented";

#[derive(Debug, Serialize)]
pub struct DocumentView {
	pub pk: Pk,
	pub name: Box<str>,
	/// Public URL of the file
	pub file: String,
	pub mimetype: Box<str>,
	pub size: u64,
	pub is_static: bool,
	pub content: Option<ContentLink>,
	pub created_at: Timestamp,
}

/// Loads a module object the user may view
async fn get_related_object(ctx: &BmfCtx, model: &ModelId, pk: Pk) -> ClResult<Arc<ModuleObject>> {
	if !ctx.can_view(model) {
		debug!(model = %model, pk, "No view permission on related object");
		return Err(Error::PermissionDenied);
	}
	ctx.get_module_object(model, pk).await
}

/// Loads a document together with the object owning it. A document whose
/// owner no longer exists is served without it.
async fn get_object(ctx: &BmfCtx, pk: Pk) -> ClResult<Arc<Document>> {
	let doc = ctx.get_document(pk).await?;
	if let Some(content) = &doc.content {
		match get_related_object(ctx, &content.model, content.object_pk).await {
			Ok(_) => {}
			Err(Error::NotFound) => {
				debug!(document = pk, owner = content.object_pk, "Document owner does not exist");
			}
			Err(Error::PermissionDenied) => return Err(Error::NotFound),
			Err(err) => return Err(err),
		}
	}
	Ok(doc)
}

fn not_implemented(pk: Option<Pk>) -> Json<ApiResponse<String>> {
	let message = match pk {
		Some(pk) => format!("{} {}", NOT_IMPLEMENTED, pk),
		None => NOT_IMPLEMENTED.to_string(),
	};
	Json(ApiResponse::new(message))
}

// Lists //
//*******//
/// GET /api/documents
///
/// Documents not attached to any object
pub async fn list_documents(ctx: Ctx) -> ClResult<Json<ApiResponse<Vec<Pk>>>> {
	let docs = ctx
		.app
		.meta_adapter
		.list_documents(&ListDocumentOptions { is_static: true, content: None })
		.await?;
	Ok(Json(ApiResponse::new(docs.iter().map(|d| d.pk).collect())))
}

/// GET /api/documents/{app}/{model}/{pk}
///
/// Documents attached to a module object
pub async fn list_object_documents(
	ctx: Ctx,
	Path((app_label, model_name, pk)): Path<(String, String, Pk)>,
) -> ClResult<Json<ApiResponse<Vec<Pk>>>> {
	let module = ctx.app.modules.get_by_name(&app_label, &model_name).ok_or(Error::NotFound)?;
	let object = get_related_object(&ctx, &module.model, pk).await?;

	let content = ContentLink { model: module.model.clone(), object_pk: object.pk };
	let docs = ctx
		.app
		.meta_adapter
		.list_documents(&ListDocumentOptions { is_static: false, content: Some(content) })
		.await?;
	Ok(Json(ApiResponse::new(docs.iter().map(|d| d.pk).collect())))
}

// Create //
//********//
/// POST /api/documents
pub async fn post_document(_ctx: Ctx) -> Json<ApiResponse<String>> {
	not_implemented(None)
}

/// POST /api/documents/{app}/{model}/{pk}
pub async fn post_object_document(_ctx: Ctx) -> Json<ApiResponse<String>> {
	not_implemented(None)
}

// Detail //
//********//
/// GET /api/documents/detail/{pk}
pub async fn get_document(ctx: Ctx, Path(pk): Path<Pk>) -> ClResult<Json<ApiResponse<DocumentView>>> {
	let doc = get_object(&ctx, pk).await?;
	let view = DocumentView {
		pk: doc.pk,
		name: doc.name.clone(),
		file: ctx.app.blob_adapter.blob_url(&doc.file)?,
		mimetype: doc.mimetype.clone(),
		size: doc.size,
		is_static: doc.is_static,
		content: doc.content.clone(),
		created_at: doc.created_at,
	};
	Ok(Json(ApiResponse::new(view)))
}

/// PUT /api/documents/detail/{pk}
pub async fn put_document(ctx: Ctx, Path(pk): Path<Pk>) -> ClResult<Json<ApiResponse<String>>> {
	let doc = get_object(&ctx, pk).await?;
	Ok(not_implemented(Some(doc.pk)))
}

/// POST /api/documents/detail/{pk}/file
pub async fn put_document_file(ctx: Ctx, Path(pk): Path<Pk>) -> ClResult<Json<ApiResponse<String>>> {
	let doc = get_object(&ctx, pk).await?;
	Ok(not_implemented(Some(doc.pk)))
}

/// DELETE /api/documents/detail/{pk}
pub async fn delete_document(ctx: Ctx, Path(pk): Path<Pk>) -> ClResult<Json<ApiResponse<String>>> {
	let doc = get_object(&ctx, pk).await?;
	Ok(not_implemented(Some(doc.pk)))
}

// Download //
//**********//
/// GET /api/documents/download/{pk}
pub async fn get_download(ctx: Ctx, Path(pk): Path<Pk>) -> ClResult<Response> {
	let doc = get_object(&ctx, pk).await?;
	let Some(size) = ctx.app.blob_adapter.stat_blob(&doc.file).await else {
		warn!(document = pk, file = %doc.file, "Document file is missing");
		return Err(Error::NotFound);
	};
	download_response(&ctx.app, &doc, size).await
}

// vim: ts=4
