use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::extraction::ExtractError;
use crate::llm_client::LlmError;
use crate::render::render_error_page;

/// Application-level error type.
///
/// Analysis failures are turned into an `AnalysisResult::Failure` by the pipeline.
/// Request-level failures (bad multipart bodies) reach Axum through `IntoResponse`
/// and render the page with an error banner.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Please upload both a resume and a job description.")]
    MissingInput,

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("An error occurred: {0}")]
    ExternalService(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Upload too large. Please submit smaller files.")]
    PayloadTooLarge,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        AppError::ExternalService(e.to_string())
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            // Analysis failures: same 200 page as `AnalysisResult::Failure`.
            AppError::MissingInput | AppError::Extraction(_) | AppError::ExternalService(_) => {
                StatusCode::OK
            }
        }
    }

    /// The message shown on the page.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Html(render_error_page(&self.user_message()))).into_response()
    }
}
