//! End-to-end behaviour of the document REST API over the in-memory backend.
//!
//! The app is assembled the same way the server does it: trace middleware,
//! the `/api/v1` scope and the health endpoints, with real adapters throughout.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use gitdoc::Trace;
use gitdoc::domain::DocumentService;
use gitdoc::inbound::http::documents::{
    create_document, delete_document, get_document, list_documents, update_document,
};
use gitdoc::inbound::http::health::{HealthState, live, ready};
use gitdoc::inbound::http::state::HttpState;
use gitdoc::outbound::memory::InMemoryDocumentRepository;
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

async fn document_app()
-> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let store = Arc::new(InMemoryDocumentRepository::new());
    let health = HealthState::new(store.clone());
    health.mark_ready();
    let state = HttpState::new(DocumentService::new(store), Arc::new(DefaultClock));

    test::init_service(
        App::new()
            .app_data(web::Data::new(health))
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(
                web::scope("/api/v1")
                    .service(list_documents)
                    .service(create_document)
                    .service(get_document)
                    .service(update_document)
                    .service(delete_document),
            )
            .service(ready)
            .service(live),
    )
    .await
}

async fn list(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> Vec<Value> {
    let request = test::TestRequest::get().uri("/api/v1/documents").to_request();
    test::call_and_read_body_json(app, request).await
}

#[rstest]
#[actix_web::test]
async fn full_document_lifecycle() {
    let app = document_app().await;

    let created = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/documents")
            .set_json(json!({"name": "spec"}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(created.headers().contains_key("trace-id"));
    let created: Value = test::read_body_json(created).await;
    let id = created["id"].as_str().expect("generated id").to_owned();
    assert!(!id.is_empty());
    let uri = format!("/api/v1/documents/{id}");

    let fetched = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    let fetched: Value = test::read_body_json(fetched).await;
    assert_eq!(fetched["name"], "spec");

    let updated = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({"name": "spec2"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::CREATED);
    assert!(test::read_body(updated).await.is_empty());

    let fetched: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(fetched["name"], "spec2");
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["createdAt"], created["createdAt"]);

    let deleted = test::call_service(&app, test::TestRequest::delete().uri(&uri).to_request()).await;
    assert_eq!(deleted.status(), StatusCode::OK);

    let gone = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    let gone: Value = test::read_body_json(gone).await;
    assert_eq!(gone["code"], "not_found");
    assert!(gone["traceId"].is_string());
}

#[rstest]
#[case("/api/v1/documents/unknown-id", StatusCode::NOT_FOUND)]
#[case("/api/v1/documents/bad%20id", StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn reads_of_unknown_or_malformed_ids_fail(#[case] uri: &str, #[case] status: StatusCode) {
    let app = document_app().await;

    let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), status);
}

#[rstest]
#[actix_web::test]
async fn invalid_documents_are_rejected_and_not_stored() {
    let app = document_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/documents")
            .set_json(json!({"name": "", "id": "bad id"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(response).await;
    let errors = body["details"]["errors"].as_array().expect("error list");
    assert_eq!(errors.len(), 2);
    assert!(list(&app).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn client_supplied_ids_are_kept_and_listed_in_order() {
    let app = document_app().await;

    for id in ["beta", "alpha"] {
        let response = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/v1/documents")
                .set_json(json!({"id": id, "name": id}))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let ids: Vec<Value> = list(&app).await.into_iter().map(|doc| doc["id"].clone()).collect();
    assert_eq!(ids, vec![json!("alpha"), json!("beta")]);
}

#[rstest]
#[actix_web::test]
async fn updating_a_missing_document_is_not_found() {
    let app = document_app().await;

    let response = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/v1/documents/missing")
            .set_json(json!({"name": "spec"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/health/ready")]
#[case("/health/live")]
#[actix_web::test]
async fn health_endpoints_report_healthy(#[case] uri: &str) {
    let app = document_app().await;

    let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
}
