use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use pagesmith::build_router;
use pagesmith::config::Config;
use pagesmith::state::AppState;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

fn test_app() -> (Router, TempDir) {
    let uploads = TempDir::new().unwrap();
    let mut config = Config::default();
    config.storage.upload_dir = uploads.path().to_path_buf();
    let state = AppState::new(config).unwrap();
    (build_router(state), uploads)
}

async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

fn sample_layout_request() -> Value {
    json!({
        "name": "landing page",
        "elements": [
            {
                "id": 1,
                "type": "header",
                "position": {"x": 10, "y": 20},
                "styles": {"color": "#ff0000"},
                "customText": "Hi"
            },
            {
                "id": 2,
                "type": "image",
                "position": {"x": 100, "y": 200},
                "imageUrl": "/images/logo.png"
            }
        ]
    })
}

#[tokio::test]
async fn health_check_responds() {
    let (app, _uploads) = test_app();
    let (status, body) = send_json(app, "GET", "/health", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["status"], "ok");
}

#[tokio::test]
async fn create_layout_returns_compiled_markup() {
    let (app, _uploads) = test_app();
    let (status, body) = send_json(app, "POST", "/api/v1/layouts", sample_layout_request()).await;

    assert_eq!(status, StatusCode::CREATED);
    let payload = json_body(&body);
    assert_eq!(payload["status"], "success");

    let html = payload["data"]["html"].as_str().unwrap();
    let css = payload["data"]["css"].as_str().unwrap();
    assert!(html.contains("<h1>Hi</h1>"));
    assert!(html.contains("id=\"header-1\""));
    assert!(html.contains("onerror="));
    assert!(css.contains("left: 10px;"));
    assert!(css.contains("top: 20px;"));
    assert!(css.contains("color: #ff0000;"));
}

#[tokio::test]
async fn missing_elements_is_a_bad_request() {
    let (app, _uploads) = test_app();
    let (status, body) =
        send_json(app.clone(), "POST", "/api/v1/layouts", json!({"name": "x"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json_body(&body)["message"]
            .as_str()
            .unwrap()
            .contains("Elements array is required")
    );

    let (status, _) = send_json(
        app,
        "POST",
        "/api/v1/layouts",
        json!({"elements": "not-an-array"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_elements_are_defaulted_not_fatal() {
    let (app, _uploads) = test_app();
    let (status, body) = send_json(
        app,
        "POST",
        "/api/v1/layouts",
        json!({"elements": [
            {"id": 1, "type": "text", "content": "fine"},
            {"id": 2, "styles": {"color": {"nested": "object"}}}
        ]}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let payload = json_body(&body);
    let css = payload["data"]["css"].as_str().unwrap();
    assert_eq!(css.matches("position: absolute;").count(), 2);
}

#[tokio::test]
async fn export_layout_streams_a_zip() {
    let (app, _uploads) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/layouts/export")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(sample_layout_request().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/zip"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("landing_page.zip"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[0..2], b"PK");
}

#[tokio::test]
async fn layouts_can_be_fetched_after_creation() {
    let (app, _uploads) = test_app();
    let (_, body) =
        send_json(app.clone(), "POST", "/api/v1/layouts", sample_layout_request()).await;
    let id = json_body(&body)["data"]["id"].as_str().unwrap().to_string();

    let (status, body) =
        send_json(app.clone(), "GET", &format!("/api/v1/layouts/{}", id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["data"]["name"], "landing page");

    let (status, _) = send_json(
        app,
        "GET",
        "/api/v1/layouts/00000000-0000-0000-0000-000000000000",
        json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn sample_article_request() -> Value {
    json!({
        "title": "My First Article",
        "content": "<p style='text-align:center'><b>Bold</b> plain</p>",
        "styles": {"fontSize": 14, "color": "#222222"}
    })
}

fn disposition_filename(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .split('"')
        .nth(1)
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn create_article_downloads_a_document() {
    let (app, _uploads) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/articles")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(sample_article_request().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("wordprocessingml")
    );
    assert_eq!(disposition_filename(&response), "my-first-article.docx");

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[0..2], b"PK");
}

#[tokio::test]
async fn duplicate_titles_get_suffixed_slugs() {
    let (app, _uploads) = test_app();

    let first = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/articles")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(sample_article_request().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let second = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/articles")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(sample_article_request().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let first_name = disposition_filename(&first);
    let second_name = disposition_filename(&second);
    assert_eq!(first_name, "my-first-article.docx");
    assert_ne!(first_name, second_name);
    assert!(second_name.starts_with("my-first-article-"));
}

#[tokio::test]
async fn article_requires_title_and_content() {
    let (app, _uploads) = test_app();
    let (status, body) = send_json(
        app,
        "POST",
        "/api/v1/articles",
        json!({"title": "No body"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json_body(&body)["message"]
            .as_str()
            .unwrap()
            .contains("Title and content")
    );
}

#[tokio::test]
async fn published_articles_are_listed_and_fetchable() {
    let (app, _uploads) = test_app();
    send_json(app.clone(), "POST", "/api/v1/articles", sample_article_request()).await;

    let (status, body) = send_json(app.clone(), "GET", "/api/v1/articles", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let payload = json_body(&body);
    assert_eq!(payload["results"], 1);
    assert_eq!(payload["data"][0]["slug"], "my-first-article");

    let (status, body) =
        send_json(app.clone(), "GET", "/api/v1/articles/my-first-article", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    let payload = json_body(&body);
    assert_eq!(payload["data"]["title"], "My First Article");
    // Stored content went through the sanitizer but kept its formatting.
    assert!(payload["data"]["content"].as_str().unwrap().contains("<b>Bold</b>"));

    let (status, _) = send_json(app, "GET", "/api/v1/articles/nope", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn multipart_request(content_type: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "XBOUNDARYX";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"image\"; \
             filename=\"test.png\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/v1/images")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn image_upload_stores_and_returns_a_url() {
    let (app, uploads) = test_app();
    let png_magic = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];

    let response = app
        .oneshot(multipart_request("image/png", &png_magic))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let payload: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["success"], true);
    let url = payload["imageUrl"].as_str().unwrap();
    assert!(url.starts_with("http://localhost:2000/images/"));

    let filename = payload["filename"].as_str().unwrap();
    assert!(uploads.path().join(filename).exists());
}

#[tokio::test]
async fn non_image_uploads_are_rejected() {
    let (app, _uploads) = test_app();
    let response = app
        .oneshot(multipart_request("text/plain", b"not an image"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
