use super::page;
use super::types::{AnalyzeResponse, ErrorResponse, ExamplesResponse, ModelsResponse};
use super::MAX_EXAMPLES;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use sehat_core::{AnalysisError, AnalysisResult, Analyzer, EncodingError, ModelId};
use std::path::PathBuf;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub default_model: ModelId,
    pub examples_dir: PathBuf,
    pub max_upload_bytes: u64,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: String) -> ApiError {
    (status, Json(ErrorResponse { error }))
}

fn multipart_error(e: MultipartError) -> ApiError {
    api_error(e.status(), format!("Malformed upload: {}", e.body_text()))
}

pub async fn index() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

pub async fn models(State(state): State<AppState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: ModelId::ALL.iter().map(|m| m.to_string()).collect(),
        default: state.default_model.to_string(),
    })
}

/// Multipart fields: `image` (file, optional) and `model` (text, optional).
///
/// Every analysis outcome, including failures and uploads cut off at the
/// body limit, is a 200 with display text; only an unusable request is
/// rejected.
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let (image, model) = match read_form(multipart).await {
        Ok(form) => form,
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            let max_mb = state.max_upload_bytes / (1024 * 1024);
            warn!("Upload rejected at the {max_mb}MB body limit");
            let err = AnalysisError::from(EncodingError::UploadTooLarge { max_mb });
            return Ok(respond(AnalysisResult::from(err), state.default_model));
        }
        Err(e) => return Err(multipart_error(e)),
    };

    let model = match model {
        Some(value) => value
            .parse()
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("{e}")))?,
        None => state.default_model,
    };

    let result = state.analyzer.analyze_bytes(image, model).await;
    info!(status = result.status(), model = %model, "Handled analysis request");

    Ok(respond(result, model))
}

/// Collect the `image` bytes and a non-blank `model` value.
async fn read_form(
    mut multipart: Multipart,
) -> Result<(Option<Vec<u8>>, Option<String>), MultipartError> {
    let mut image = None;
    let mut model = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("image") => image = Some(field.bytes().await?.to_vec()),
            Some("model") => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    model = Some(value);
                }
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    Ok((image, model))
}

fn respond(result: AnalysisResult, model: ModelId) -> Json<AnalyzeResponse> {
    Json(AnalyzeResponse {
        status: result.status(),
        model: model.to_string(),
        text: result.text().to_string(),
    })
}

pub async fn examples(State(state): State<AppState>) -> Json<ExamplesResponse> {
    let mut examples = Vec::new();

    match tokio::fs::read_dir(&state.examples_dir).await {
        Ok(mut entries) => {
            while let Ok(Some(entry)) = entries.next_entry().await {
                let Ok(name) = entry.file_name().into_string() else {
                    continue;
                };
                if example_content_type(&name).is_some() && entry.path().is_file() {
                    examples.push(name);
                }
            }
        }
        Err(e) => debug!("No examples at {:?}: {e}", state.examples_dir),
    }

    examples.sort();
    examples.truncate(MAX_EXAMPLES);
    Json(ExamplesResponse { examples })
}

pub async fn example_image(State(state): State<AppState>, Path(name): Path<String>) -> Response {
    let Some(content_type) = example_content_type(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read(state.examples_dir.join(&name)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Content type of a servable example, or `None` for anything that is not a
/// plain image file name inside the examples directory.
fn example_content_type(name: &str) -> Option<&'static str> {
    if name.starts_with('.') || name.contains(['/', '\\']) {
        return None;
    }
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}
