//! Document CRUD HTTP handlers.
//!
//! ```text
//! GET    /api/v1/documents
//! POST   /api/v1/documents
//! GET    /api/v1/documents/{id}
//! PUT    /api/v1/documents/{id}
//! DELETE /api/v1/documents/{id}
//! ```
//!
//! Mutating handlers receive a [`ValidatedDocument`], so the field rules have
//! already run by the time the service is called.

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::error;

use crate::domain::Error;
use crate::domain::ports::DocumentRepositoryError;
use crate::inbound::http::ApiResult;
use crate::inbound::http::documents_dto::{DocumentRequestDto, DocumentResponseDto};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::ValidatedDocument;

/// Translate a repository failure into an API error.
///
/// Backend failures are logged here and reach the client only as a redacted
/// internal error.
pub fn map_repository_error(err: &DocumentRepositoryError) -> Error {
    match err {
        DocumentRepositoryError::InvalidId { .. } => Error::invalid_request(err.to_string()),
        DocumentRepositoryError::NotFound { .. } => Error::not_found(err.to_string()),
        DocumentRepositoryError::Connection { .. } | DocumentRepositoryError::Query { .. } => {
            error!(error = %err, "document repository failure");
            Error::internal(err.to_string())
        }
    }
}

/// List every stored document.
#[utoipa::path(
    get,
    path = "/api/v1/documents",
    responses(
        (status = 200, description = "All stored documents", body = [DocumentResponseDto]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "listDocuments"
)]
#[get("/documents")]
pub async fn list_documents(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<DocumentResponseDto>>> {
    let documents = state
        .documents
        .list()
        .await
        .map_err(|err| map_repository_error(&err))?;
    Ok(web::Json(
        documents.into_iter().map(DocumentResponseDto::from).collect(),
    ))
}

/// Create a document, generating its identifier when none is supplied.
#[utoipa::path(
    post,
    path = "/api/v1/documents",
    request_body = DocumentRequestDto,
    responses(
        (status = 201, description = "Document created", body = DocumentResponseDto),
        (status = 400, description = "Undecodable body", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "createDocument"
)]
#[post("/documents")]
pub async fn create_document(
    state: web::Data<HttpState>,
    payload: ValidatedDocument,
) -> ApiResult<HttpResponse> {
    let document = payload.into_inner().into_document(state.clock.utc());
    let created = state
        .documents
        .add(document)
        .await
        .map_err(|err| map_repository_error(&err))?;
    Ok(HttpResponse::Created().json(DocumentResponseDto::from(created)))
}

/// Fetch a single document.
#[utoipa::path(
    get,
    path = "/api/v1/documents/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "The document", body = DocumentResponseDto),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Document not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "getDocument"
)]
#[get("/documents/{id}")]
pub async fn get_document(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DocumentResponseDto>> {
    let id = path.into_inner();
    let document = state
        .documents
        .get(&id)
        .await
        .map_err(|err| map_repository_error(&err))?;
    Ok(web::Json(DocumentResponseDto::from(document)))
}

/// Replace a document's fields, keeping its identifier.
///
/// A body without `createdAt` keeps the stored creation time.
#[utoipa::path(
    put,
    path = "/api/v1/documents/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    request_body = DocumentRequestDto,
    responses(
        (status = 201, description = "Document updated"),
        (status = 400, description = "Malformed identifier or body", body = ErrorSchema),
        (status = 404, description = "Document not found", body = ErrorSchema),
        (status = 422, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "updateDocument"
)]
#[put("/documents/{id}")]
pub async fn update_document(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: ValidatedDocument,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let dto = payload.into_inner();
    let created_at = match dto.created_at {
        Some(created_at) => created_at,
        None => {
            state
                .documents
                .get(&id)
                .await
                .map_err(|err| map_repository_error(&err))?
                .created_at
        }
    };
    let document = DocumentRequestDto {
        created_at: Some(created_at),
        ..dto
    }
    .into_document(state.clock.utc())
    .with_id(id.as_str());
    state
        .documents
        .update(&id, document)
        .await
        .map_err(|err| map_repository_error(&err))?;
    Ok(HttpResponse::Created().finish())
}

/// Remove a document.
#[utoipa::path(
    delete,
    path = "/api/v1/documents/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document deleted"),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Document not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["documents"],
    operation_id = "deleteDocument"
)]
#[delete("/documents/{id}")]
pub async fn delete_document(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    state
        .documents
        .delete(&id)
        .await
        .map_err(|err| map_repository_error(&err))?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
#[path = "documents_tests.rs"]
mod tests;
