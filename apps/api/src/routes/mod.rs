pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::handle_index))
        .route("/analyze", post(handlers::handle_analyze))
        .route("/health", get(health::health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        // No caching of analysis pages, plus baseline hardening on every response.
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store, no-cache, must-revalidate, max-age=0"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::PRAGMA,
            HeaderValue::from_static("no-cache"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::EXPIRES,
            HeaderValue::from_static("0"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::analysis::AnalysisHandler;
    use crate::config::Config;
    use crate::llm_client::tests::FakeModel;

    const BOUNDARY: &str = "XBOUNDARYX";

    fn test_state(model: Arc<FakeModel>) -> AppState {
        let config = Config::from_lookup(|k| match k {
            "GOOGLE_API_KEY" => Some("test-key".to_string()),
            "MAX_UPLOAD_MB" => Some("1".to_string()),
            _ => None,
        })
        .unwrap();
        AppState {
            analyzer: AnalysisHandler::new(model),
            config,
        }
    }

    fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> String {
        let mut body = String::new();
        for (name, filename, content) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match filename {
                Some(f) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                     Content-Type: text/plain\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(content);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn analyze_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn assert_hardening_headers(response: &axum::response::Response) {
        let headers = response.headers();
        assert_eq!(
            headers[header::CACHE_CONTROL],
            "no-store, no-cache, must-revalidate, max-age=0"
        );
        assert_eq!(headers[header::PRAGMA], "no-cache");
        assert_eq!(headers[header::EXPIRES], "0");
        assert_eq!(headers[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        assert_eq!(headers[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn test_index_renders_form_with_headers() {
        let app = build_router(test_state(Arc::new(FakeModel::replying("unused"))));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_hardening_headers(&response);
        let body = body_string(response).await;
        assert!(body.contains(r#"enctype="multipart/form-data""#));
    }

    #[tokio::test]
    async fn test_analyze_success_renders_fragment() {
        let model = Arc::new(FakeModel::replying("## Skill Gap Analysis\n* **Go:** missing"));
        let app = build_router(test_state(model.clone()));
        let body = multipart_body(&[
            ("resume", Some("resume.txt"), "Python developer, 3 years Flask experience"),
            ("jd", Some("jd.txt"), "Seeking Go developer with Kubernetes experience"),
            ("custom_prompt", None, "Keep it short"),
        ]);

        let response = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_hardening_headers(&response);
        let page = body_string(response).await;
        assert!(page.contains("<h2>Skill Gap Analysis</h2>"));
        assert!(page.contains("<li><strong>Go:</strong> missing</li>"));
        assert!(page.contains(">Keep it short</textarea>"));

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].ends_with("**Additional Instructions:**\nKeep it short"));
    }

    #[tokio::test]
    async fn test_analyze_without_jd_shows_error() {
        let model = Arc::new(FakeModel::replying("unused"));
        let app = build_router(test_state(model.clone()));
        let body = multipart_body(&[
            ("resume", Some("resume.txt"), "Python developer"),
            ("jd", Some(""), ""),
        ]);

        let response = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_string(response).await;
        assert!(page.contains("Please upload both a resume and a job description."));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_analyze_model_failure_shows_error() {
        let model = Arc::new(FakeModel::failing(429, "Quota exceeded"));
        let app = build_router(test_state(model));
        let body = multipart_body(&[
            ("resume", Some("resume.txt"), "Python developer"),
            ("jd", Some("jd.txt"), "Go developer"),
        ]);

        let response = app.oneshot(analyze_request(body)).await.unwrap();

        let page = body_string(response).await;
        assert!(page.contains("Quota exceeded"));
        assert!(!page.contains(r#"<section class="result">"#));
    }

    #[tokio::test]
    async fn test_analyze_rejects_non_multipart() {
        let app = build_router(test_state(Arc::new(FakeModel::replying("unused"))));
        let request = Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
        assert_hardening_headers(&response);
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_with_413() {
        let model = Arc::new(FakeModel::replying("unused"));
        let app = build_router(test_state(model.clone()));
        let resume = "Rust ".repeat(2 * 1024 * 1024 / 5);
        let body = multipart_body(&[
            ("resume", Some("resume.txt"), resume.as_str()),
            ("jd", Some("jd.txt"), "Go developer"),
        ]);

        let response = app.oneshot(analyze_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_hardening_headers(&response);
        let page = body_string(response).await;
        assert!(page.contains("Upload too large"));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_health_reports_model() {
        let app = build_router(test_state(Arc::new(FakeModel::replying("unused"))));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["provider"], "gemini");
        assert_eq!(body["model"], "fake-model");
    }
}
