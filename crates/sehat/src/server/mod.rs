//! Web UI: an upload form, a model dropdown, and a text output, backed by
//! [`sehat_core::Analyzer`].

mod handlers;
mod page;
mod types;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use sehat_core::{Analyzer, Config};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use handlers::AppState;

/// Multipart framing on top of the raw image bytes.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Most examples offered in the gallery.
pub const MAX_EXAMPLES: usize = 12;

pub fn router(state: AppState) -> Router {
    let body_limit = usize::try_from(state.max_upload_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(handlers::index))
        .route("/api/models", get(handlers::models))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/examples", get(handlers::examples))
        .route("/examples/:name", get(handlers::example_image))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = AppState {
        analyzer: Analyzer::from_config(&config),
        default_model: config.inference.default_model,
        examples_dir: config.examples_dir(),
        max_upload_bytes: config.max_upload_bytes(),
    };
    let app = router(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    info!("Serving Sehat on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use sehat_core::config::PreprocessConfig;
    use sehat_core::{
        CompletionOptions, EncodedPayload, ImageDecoder, ImagePreprocessor, InferenceClient,
        InferenceError, InferenceErrorKind, ModelId,
    };
    use serde_json::Value;
    use std::path::Path;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt; // for `oneshot`

    const BOUNDARY: &str = "sehat-test-boundary";

    /// Answers with the model and payload size it received, or a fixed failure.
    struct EchoClient {
        calls: Arc<AtomicU32>,
        fail: bool,
    }

    #[async_trait]
    impl InferenceClient for EchoClient {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            model: ModelId,
            payload: &EncodedPayload,
            _prompt: &str,
            _options: &CompletionOptions,
        ) -> Result<String, InferenceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(InferenceError::new(
                    InferenceErrorKind::Network,
                    "connection refused",
                ));
            }
            Ok(format!("{model} saw {}x{}", payload.width, payload.height))
        }
    }

    fn create_test_app(fail: bool, examples_dir: &Path) -> (Router, Arc<AtomicU32>) {
        create_test_app_with_limit(fail, examples_dir, 5 * 1024 * 1024)
    }

    fn create_test_app_with_limit(
        fail: bool,
        examples_dir: &Path,
        max_upload_bytes: u64,
    ) -> (Router, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let analyzer = Analyzer::new(
            ImageDecoder::new(max_upload_bytes),
            ImagePreprocessor::new(PreprocessConfig::default()),
            Arc::new(EchoClient {
                calls: calls.clone(),
                fail,
            }),
            CompletionOptions::default(),
        );
        let state = AppState {
            analyzer,
            default_model: ModelId::default(),
            examples_dir: examples_dir.to_path_buf(),
            max_upload_bytes,
        };
        (router(state), calls)
    }

    /// PNG filled with pseudo-random pixels so it does not compress.
    fn noisy_png(width: u32, height: u32) -> Vec<u8> {
        let mut seed: u32 = 0x2545_f491;
        let img = image::RgbImage::from_fn(width, height, |_, _| {
            let mut channel = || {
                seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                (seed >> 24) as u8
            };
            image::Rgb([channel(), channel(), channel()])
        });
        let mut buffer = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut buffer = std::io::Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(width, height)
            .write_to(&mut buffer, image::ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    fn multipart_body(image: Option<&[u8]>, model: &str) -> Vec<u8> {
        let mut body = Vec::new();
        if let Some(bytes) = image {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                     filename=\"label.png\"\r\nContent-Type: image/png\r\n\r\n"
                )
                .as_bytes(),
            );
            body.extend_from_slice(bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"model\"\r\n\r\n{model}\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    async fn post_analyze(app: &Router, body: Vec<u8>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let (status, bytes) = send(app, request).await;
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_index_page() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = create_test_app(false, dir.path());

        let (status, body) = send(&app, get("/")).await;

        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("Sehat GPT"));
        assert!(html.contains("/api/analyze"));
    }

    #[tokio::test]
    async fn test_models_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = create_test_app(false, dir.path());

        let (status, body) = send(&app, get("/api/models")).await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["models"].as_array().unwrap().len(), 4);
        assert_eq!(json["models"][0], "google/gemini-flash-1.5-exp");
        assert_eq!(json["default"], "google/gemini-flash-1.5-exp");
    }

    #[tokio::test]
    async fn test_analyze_upload() {
        let dir = tempfile::tempdir().unwrap();
        let (app, calls) = create_test_app(false, dir.path());

        let body = multipart_body(Some(&png(2048, 1024)), "qwen/qwen-2.5-72b-instruct");
        let (status, json) = post_analyze(&app, body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "analysis");
        assert_eq!(json["model"], "qwen/qwen-2.5-72b-instruct");
        assert_eq!(json["text"], "qwen/qwen-2.5-72b-instruct saw 1024x512");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_without_image_returns_guidance() {
        let dir = tempfile::tempdir().unwrap();
        let (app, calls) = create_test_app(false, dir.path());

        let (status, json) = post_analyze(&app, multipart_body(None, "")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "guidance");
        assert_eq!(json["text"], sehat_core::GUIDANCE_MESSAGE);
        assert_eq!(json["model"], "google/gemini-flash-1.5-exp");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_failure_is_display_text() {
        let dir = tempfile::tempdir().unwrap();
        let (app, calls) = create_test_app(true, dir.path());

        let body = multipart_body(Some(&png(64, 64)), "google/gemini-flash-1.5");
        let (status, json) = post_analyze(&app, body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "error");
        let text = json["text"].as_str().unwrap();
        assert!(text.starts_with(sehat_core::ERROR_PREFIX));
        assert!(text.contains("connection refused"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_analyze_rejects_unknown_model() {
        let dir = tempfile::tempdir().unwrap();
        let (app, calls) = create_test_app(false, dir.path());

        let body = multipart_body(Some(&png(8, 8)), "gpt-4o");
        let (status, json) = post_analyze(&app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].as_str().unwrap().contains("gpt-4o"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_analyze_oversized_upload_is_display_text() {
        let dir = tempfile::tempdir().unwrap();
        let (app, calls) = create_test_app_with_limit(false, dir.path(), 4096);

        let image = noisy_png(300, 300);
        assert!(image.len() > 4096 + 64 * 1024);
        let (status, json) = post_analyze(&app, multipart_body(Some(&image), "")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "error");
        assert_eq!(json["model"], ModelId::default().as_str());
        let text = json["text"].as_str().unwrap();
        assert!(text.starts_with(sehat_core::ERROR_PREFIX));
        assert!(text.contains("Image too large"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_examples_listing_and_serving() {
        let dir = tempfile::tempdir().unwrap();
        for i in 1..=13 {
            std::fs::write(dir.path().join(format!("images ({i:02}).png")), png(4, 4)).unwrap();
        }
        std::fs::write(dir.path().join("README.txt"), "not an image").unwrap();
        let (app, _) = create_test_app(false, dir.path());

        let (status, body) = send(&app, get("/api/examples")).await;
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(status, StatusCode::OK);
        let examples = json["examples"].as_array().unwrap();
        assert_eq!(examples.len(), MAX_EXAMPLES);
        assert_eq!(examples[0], "images (01).png");

        let response = app
            .clone()
            .oneshot(get("/examples/images%20(01).png"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["content-type"], "image/png");

        let (status, _) = send(&app, get("/examples/missing.png")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, get("/examples/README.txt")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_examples_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (app, _) = create_test_app(false, &dir.path().join("nope"));

        let (status, body) = send(&app, get("/api/examples")).await;
        let json: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::OK);
        assert!(json["examples"].as_array().unwrap().is_empty());
    }
}
