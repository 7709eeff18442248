//! Skill gap analysis — orchestrates one request end to end.
//!
//! Flow: validate uploads → extract resume → extract JD → build prompt →
//!       single model call → markdown to HTML.
//!
//! Every step is terminal on failure; there are no partial results and no retries.

pub mod handlers;
pub mod prompts;

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::extraction::{extract_blocking, UploadedDocument};
use crate::llm_client::GenerativeModel;
use crate::render::markdown_to_html;

use self::prompts::build_prompt;

/// The extracted inputs for one analysis. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub job_description_text: String,
    pub custom_instruction: Option<String>,
}

impl AnalysisRequest {
    pub fn prompt(&self) -> String {
        build_prompt(
            &self.resume_text,
            &self.job_description_text,
            self.custom_instruction.as_deref(),
        )
    }
}

/// Outcome of one analysis: a rendered HTML fragment or a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    Success { html: String },
    Failure { message: String },
}

impl From<Result<String, AppError>> for AnalysisResult {
    fn from(result: Result<String, AppError>) -> Self {
        match result {
            Ok(html) => AnalysisResult::Success { html },
            Err(e) => AnalysisResult::Failure {
                message: e.user_message(),
            },
        }
    }
}

/// Runs analyses against a fixed model client, chosen at startup.
#[derive(Clone)]
pub struct AnalysisHandler {
    model: Arc<dyn GenerativeModel>,
}

impl AnalysisHandler {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub async fn handle(
        &self,
        resume: Option<UploadedDocument>,
        job_description: Option<UploadedDocument>,
        custom_instruction: Option<&str>,
    ) -> AnalysisResult {
        let result = self
            .run(resume, job_description, custom_instruction)
            .await;
        if let Err(e) = &result {
            warn!("Analysis failed: {e}");
        }
        result.into()
    }

    async fn run(
        &self,
        resume: Option<UploadedDocument>,
        job_description: Option<UploadedDocument>,
        custom_instruction: Option<&str>,
    ) -> Result<String, AppError> {
        let (resume, job_description) = match (resume, job_description) {
            (Some(r), Some(j)) if has_filename(&r) && has_filename(&j) => (r, j),
            _ => return Err(AppError::MissingInput),
        };

        info!(
            "Analyzing resume ({:?}, {} bytes) against JD ({:?}, {} bytes)",
            resume.kind(),
            resume.content.len(),
            job_description.kind(),
            job_description.content.len()
        );

        let request = AnalysisRequest {
            resume_text: extract_blocking(resume).await?,
            job_description_text: extract_blocking(job_description).await?,
            custom_instruction: custom_instruction.map(str::to_string),
        };

        let prompt = request.prompt();
        debug!("Prompt built: {} chars", prompt.len());

        let markdown = self.model.generate(&prompt).await?;

        let html = markdown_to_html(&markdown);
        info!("Analysis complete: {} chars of markdown", markdown.len());
        Ok(html)
    }
}

fn has_filename(document: &UploadedDocument) -> bool {
    !document.filename.trim().is_empty()
}
