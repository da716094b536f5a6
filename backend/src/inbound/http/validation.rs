//! Request validation for document payloads.
//!
//! [`ValidatedDocument`] is an extractor: it decodes the JSON body and runs the
//! field rules before a handler is invoked. Undecodable bodies are rejected
//! with 400 and rule violations with 422, listing every failed field.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::domain::{DocumentId, Error};
use crate::inbound::http::documents_dto::DocumentRequestDto;

/// Maximum length of a document name, in characters.
pub const NAME_MAX_CHARS: usize = 256;

/// Maximum length of the last editor identifier, in characters.
pub const LAST_UPDATED_BY_MAX_CHARS: usize = 256;

/// Maximum size of the document content, in bytes.
pub const CONTENT_MAX_BYTES: usize = 1024 * 1024;

/// Rule codes reported for failed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCode {
    /// The field is required but blank.
    Required,
    /// The field exceeds its maximum length.
    TooLong,
    /// The identifier is malformed.
    InvalidId,
}

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Machine-readable rule code.
    pub code: RuleCode,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }
}

fn check_max_chars(
    violations: &mut Vec<FieldViolation>,
    field: &'static str,
    value: &str,
    max: usize,
) {
    if value.chars().count() > max {
        violations.push(FieldViolation::new(
            field,
            RuleCode::TooLong,
            format!("{field} must be at most {max} characters"),
        ));
    }
}

/// Run every field rule against `dto`, collecting all violations.
///
/// # Errors
/// Returns the non-empty list of violations when any rule fails.
pub fn validate_document(dto: &DocumentRequestDto) -> Result<(), Vec<FieldViolation>> {
    let mut violations = Vec::new();

    if dto.name.trim().is_empty() {
        violations.push(FieldViolation::new(
            "name",
            RuleCode::Required,
            "name is required",
        ));
    } else {
        check_max_chars(&mut violations, "name", &dto.name, NAME_MAX_CHARS);
    }

    if !dto.id.is_empty() {
        if let Err(err) = DocumentId::parse(dto.id.as_str()) {
            violations.push(FieldViolation::new("id", RuleCode::InvalidId, err.to_string()));
        }
    }

    check_max_chars(
        &mut violations,
        "lastUpdatedBy",
        &dto.last_updated_by,
        LAST_UPDATED_BY_MAX_CHARS,
    );

    if dto.content.len() > CONTENT_MAX_BYTES {
        violations.push(FieldViolation::new(
            "content",
            RuleCode::TooLong,
            format!("content must be at most {CONTENT_MAX_BYTES} bytes"),
        ));
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn violations_error(violations: &[FieldViolation]) -> Error {
    Error::validation_failed("document failed validation")
        .with_details(json!({ "errors": violations }))
}

/// Document payload that decoded and passed every field rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDocument(DocumentRequestDto);

impl ValidatedDocument {
    /// Unwrap the validated payload.
    #[must_use]
    pub fn into_inner(self) -> DocumentRequestDto {
        self.0
    }
}

impl FromRequest for ValidatedDocument {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Json::<DocumentRequestDto>::from_request(req, payload);
        Box::pin(async move {
            let dto = body
                .await
                .map_err(|err| {
                    debug!(error = %err, "rejected undecodable document body");
                    Error::invalid_request(format!("invalid document body: {err}"))
                })?
                .into_inner();
            validate_document(&dto).map_err(|violations| {
                debug!(count = violations.len(), "document failed validation");
                violations_error(&violations)
            })?;
            Ok(Self(dto))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::{fixture, rstest};

    use crate::domain::ErrorCode;

    #[fixture]
    fn valid_dto() -> DocumentRequestDto {
        DocumentRequestDto {
            name: "spec".to_owned(),
            ..DocumentRequestDto::default()
        }
    }

    fn fields(violations: &[FieldViolation]) -> Vec<&'static str> {
        violations.iter().map(|v| v.field).collect()
    }

    #[rstest]
    fn accepts_minimal_document(valid_dto: DocumentRequestDto) {
        assert_eq!(validate_document(&valid_dto), Ok(()));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn requires_a_name(mut valid_dto: DocumentRequestDto, #[case] name: &str) {
        valid_dto.name = name.to_owned();

        let violations = validate_document(&valid_dto).expect_err("blank name");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "name");
        assert_eq!(violations[0].code, RuleCode::Required);
    }

    #[rstest]
    fn counts_name_length_in_characters(mut valid_dto: DocumentRequestDto) {
        valid_dto.name = "é".repeat(NAME_MAX_CHARS);
        assert_eq!(validate_document(&valid_dto), Ok(()));

        valid_dto.name.push('é');
        let violations = validate_document(&valid_dto).expect_err("too long");
        assert_eq!(violations[0].code, RuleCode::TooLong);
    }

    #[rstest]
    fn rejects_malformed_supplied_id(mut valid_dto: DocumentRequestDto) {
        valid_dto.id = "not/valid".to_owned();

        let violations = validate_document(&valid_dto).expect_err("bad id");

        assert_eq!(fields(&violations), vec!["id"]);
        assert_eq!(violations[0].code, RuleCode::InvalidId);
    }

    #[rstest]
    fn reports_every_failed_field(mut valid_dto: DocumentRequestDto) {
        valid_dto.name = String::new();
        valid_dto.last_updated_by = "u".repeat(LAST_UPDATED_BY_MAX_CHARS + 1);
        valid_dto.content = "x".repeat(CONTENT_MAX_BYTES + 1);

        let violations = validate_document(&valid_dto).expect_err("several failures");

        assert_eq!(fields(&violations), vec!["name", "lastUpdatedBy", "content"]);
    }

    #[rstest]
    #[actix_web::test]
    async fn extractor_accepts_valid_body() {
        let (req, mut payload) = TestRequest::post()
            .set_json(json!({"name": "spec", "content": "body"}))
            .to_http_parts();

        let document = ValidatedDocument::from_request(&req, &mut payload)
            .await
            .expect("valid body");

        assert_eq!(document.into_inner().content, "body");
    }

    #[rstest]
    #[actix_web::test]
    async fn extractor_rejects_malformed_json_as_invalid_request() {
        let (req, mut payload) = TestRequest::post()
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_http_parts();

        let error = ValidatedDocument::from_request(&req, &mut payload)
            .await
            .expect_err("malformed body");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[actix_web::test]
    async fn extractor_lists_violations_in_details() {
        let (req, mut payload) = TestRequest::post()
            .set_json(json!({"content": "no name"}))
            .to_http_parts();

        let error = ValidatedDocument::from_request(&req, &mut payload)
            .await
            .expect_err("missing name");

        assert_eq!(error.code(), ErrorCode::ValidationFailed);
        let details = error.details().expect("details present");
        assert_eq!(details["errors"][0]["field"], "name");
        assert_eq!(details["errors"][0]["code"], "required");
    }
}
