use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use composite_content::http::{router, ErrorBody};
use composite_content::lifecycle::ContentSystem;
use http_body_util::BodyExt;
use tower::ServiceExt;

const COMPOSE: &str = "version: '2'\nservices:\n  web:\n    image: nginx\n";

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn post(body: &str, content_type: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/resources/composite-templates")
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(query: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/resources/composite-templates{query}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_post_then_get() {
    let system = ContentSystem::new();
    let app = router(system.service.clone());

    let response = app
        .clone()
        .oneshot(post(COMPOSE, "application/yaml"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("Location header")
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("/resources/composite-descriptions/"));
    assert!(body_text(response).await.is_empty());

    let response = app
        .clone()
        .oneshot(get(&format!(
            "?selfLink={location}&format=Docker&disposition=inline"
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/yaml"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "inline; filename=\"template.yaml\""
    );
    let body = body_text(response).await;
    assert!(body.contains("nginx"));

    drop(app);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_error_responses() {
    let system = ContentSystem::new();
    let app = router(system.service.clone());

    let response = app.clone().oneshot(get("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(error.error_code.as_deref(), Some("compute.self-link.required"));

    let response = app.clone().oneshot(get("?selfLink=missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(post("", "application/yaml"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(error.error_code.as_deref(), Some("compute.body.required"));

    let response = app
        .clone()
        .oneshot(post("hello: world\n", "application/yaml"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(
        error.error_code.as_deref(),
        Some("compute.content.unknown.yaml.type")
    );

    // Creation failures are bad requests carrying the underlying detail
    let response = app
        .clone()
        .oneshot(post("services:\n  web:\n    restart: always\n", "application/yaml"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorBody = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(error.message.starts_with("Failed to create CompositeDescription: "));
    assert!(error.message.contains("image is required"));

    drop(app);
    system.shutdown().await.unwrap();
}
