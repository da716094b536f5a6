//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the OpenAPI description of the REST API. It registers
//! the document and health endpoints from the inbound layer together with the
//! request, response and error schemas. Swagger UI serves it in debug builds.

use crate::inbound::http::documents_dto::{DocumentRequestDto, DocumentResponseDto};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "gitdoc API",
        description = "CRUD interface for documents with pluggable storage backends."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::documents::list_documents,
        crate::inbound::http::documents::create_document,
        crate::inbound::http::documents::get_document,
        crate::inbound::http::documents::update_document,
        crate::inbound::http::documents::delete_document,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DocumentRequestDto,
        DocumentResponseDto,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "documents", description = "Document CRUD operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn object_fields(schema: &RefOr<Schema>) -> Vec<String> {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn registers_every_document_path() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/api/v1/documents"));
        assert!(paths.contains_key("/api/v1/documents/{id}"));
        assert!(paths.contains_key("/health/ready"));
        assert!(paths.contains_key("/health/live"));
    }

    #[test]
    fn document_response_schema_uses_wire_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas
            .get("DocumentResponseDto")
            .expect("DocumentResponseDto schema");

        let fields = object_fields(schema);
        for field in ["id", "name", "content", "createdAt", "lastUpdatedAt", "lastUpdatedBy"] {
            assert!(fields.iter().any(|f| f == field), "missing field {field}");
        }
    }

    #[test]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let fields = schemas
            .iter()
            .find(|(name, _)| name.ends_with("Error"))
            .map(|(_, schema)| object_fields(schema))
            .expect("Error schema");

        assert!(fields.iter().any(|f| f == "code"));
        assert!(fields.iter().any(|f| f == "message"));
    }
}
