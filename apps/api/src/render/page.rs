//! The single HTML page: upload form plus an optional result or error panel.

use crate::analysis::AnalysisResult;

const PAGE_TITLE: &str = "Skill Gap Analyzer";

const STYLES: &str = r#"
    body { font-family: system-ui, -apple-system, sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
    h1 { margin-bottom: 0.25rem; }
    .subtitle { color: #52606d; margin-top: 0; }
    form { display: grid; gap: 1rem; padding: 1.25rem; border: 1px solid #d9e2ec; border-radius: 8px; background: #f8fafc; }
    label { font-weight: 600; display: block; margin-bottom: 0.25rem; }
    textarea { width: 100%; min-height: 4rem; font: inherit; }
    button { justify-self: start; padding: 0.5rem 1.5rem; font: inherit; cursor: pointer; }
    .error { margin-top: 1.5rem; padding: 1rem; border-left: 4px solid #d64545; background: #fdecea; }
    .result { margin-top: 1.5rem; }
    .result table { border-collapse: collapse; }
    .result th, .result td { border: 1px solid #d9e2ec; padding: 0.35rem 0.6rem; text-align: left; }
"#;

/// Escapes text for use in HTML body or attribute context.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Renders the page. `custom_instruction` is echoed back into the textarea.
pub fn render_page(result: Option<&AnalysisResult>, custom_instruction: Option<&str>) -> String {
    let panel = match result {
        None => String::new(),
        Some(AnalysisResult::Success { html }) => {
            format!(r#"<section class="result">{html}</section>"#)
        }
        Some(AnalysisResult::Failure { message }) => error_panel(message),
    };

    layout(&panel, custom_instruction.unwrap_or_default())
}

/// Page with only an error banner; used for request-level failures.
pub fn render_error_page(message: &str) -> String {
    layout(&error_panel(message), "")
}

fn error_panel(message: &str) -> String {
    format!(
        r#"<div class="error" role="alert">{}</div>"#,
        html_escape(message)
    )
}

fn layout(panel: &str, custom_instruction: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{styles}</style>
</head>
<body>
    <h1>{title}</h1>
    <p class="subtitle">Upload a resume and a job description (.pdf, .docx or .txt) to see which skills are missing and how to learn them.</p>
    <form action="/analyze" method="post" enctype="multipart/form-data">
        <div>
            <label for="resume">Resume</label>
            <input type="file" id="resume" name="resume" accept=".pdf,.docx,.txt" required>
        </div>
        <div>
            <label for="jd">Job description</label>
            <input type="file" id="jd" name="jd" accept=".pdf,.docx,.txt" required>
        </div>
        <div>
            <label for="custom_prompt">Additional instructions (optional)</label>
            <textarea id="custom_prompt" name="custom_prompt" placeholder="e.g. Focus on cloud certifications">{custom}</textarea>
        </div>
        <button type="submit">Analyze</button>
    </form>
    {panel}
</body>
</html>
"#,
        title = PAGE_TITLE,
        styles = STYLES,
        custom = html_escape(custom_instruction),
        panel = panel,
    )
}
