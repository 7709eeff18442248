//! Axum route handlers for the analysis page.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Html,
};

use crate::errors::AppError;
use crate::extraction::UploadedDocument;
use crate::render::render_page;
use crate::state::AppState;

/// Fields of the upload form. File inputs left empty arrive with a blank filename
/// and are kept as `None`.
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub resume: Option<UploadedDocument>,
    pub jd: Option<UploadedDocument>,
    pub custom_prompt: Option<String>,
}

impl AnalyzeForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(multipart_error)?
        {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "resume" | "jd" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let content = field
                        .bytes()
                        .await
                        .map_err(multipart_error)?;
                    let document = (!filename.trim().is_empty())
                        .then(|| UploadedDocument::new(filename, content));
                    if name == "resume" {
                        form.resume = document;
                    } else {
                        form.jd = document;
                    }
                }
                "custom_prompt" => {
                    let text = field
                        .text()
                        .await
                        .map_err(multipart_error)?;
                    form.custom_prompt = Some(text);
                }
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Keeps the body-limit rejection distinct from a malformed form.
fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(e.body_text())
    }
}

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render_page(None, None))
}

/// POST /analyze
///
/// Always answers with the page; analysis failures are shown in the error panel.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let form = AnalyzeForm::from_multipart(&mut multipart).await?;
    let custom = form.custom_prompt.as_deref();

    let result = state.analyzer.handle(form.resume, form.jd, custom).await;

    Ok(Html(render_page(Some(&result), custom)))
}
