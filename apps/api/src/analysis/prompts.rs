// Skill-gap analysis prompt template.
// The two documents are spliced in between the sentinel markers in a single pass,
// so text inside an uploaded document is never treated as a placeholder.

/// Role, task and output rules sent ahead of the documents.
pub const ANALYSIS_INSTRUCTIONS: &str = r#"**Your Role:** You are an expert career coach and professional technical recruiter. Your goal is to provide a highly detailed and actionable analysis for a job applicant.

**Your Task:** Meticulously compare the provided Resume against the Job Description. Your analysis must be direct, honest, and encouraging.

**Instructions:**
1.  **Required Skills:** List the key skills, technologies, and qualifications mentioned in the job description.
2.  **Candidate's Skills:** List the relevant skills and experiences from the candidate's resume.
3.  **Skill Gap Analysis:** First, create a markdown table that checks the job requirements one by one. The first column holds the requirement; the second states whether the resume meets it (✅ met, ❌ not met, ⚠️ unclear). Then list the skills and qualifications required by the job description that are missing or not clearly supported in the resume, and briefly explain why each matters for the role.
4.  **Summary:** Give a brief summary of how well the candidate matches the role.
5.  **Learning Path:** For each gap, give a concrete, step-by-step learning plan with a timeline (e.g., Week 1-2, Month 2-3) and specific, actionable recommendations.
6.  **Suggested Project:** Recommend one portfolio project the candidate could build to demonstrate several missing skills at once.

**Output Formatting Rules:**
*   Use Markdown for all formatting.
*   The main sections must be: `## Skill Gap Analysis` and `## Personalized Learning Path`.
*   Use bold text (`**Skill:**`) to highlight each skill gap.
*   Use bullet points (`*`) for all lists and learning steps.
*   Do not write a generic introduction or conclusion. Be direct and get straight to the analysis."#;

pub const RESUME_BEGIN: &str = "**[BEGIN RESUME TEXT]**";
pub const RESUME_END: &str = "**[END RESUME TEXT]**";
pub const JD_BEGIN: &str = "**[BEGIN JOB DESCRIPTION TEXT]**";
pub const JD_END: &str = "**[END JOB DESCRIPTION TEXT]**";

const SECTION_RULE: &str = "---";

/// Heading for the user's free-form instruction, appended after the documents.
pub const ADDITIONAL_INSTRUCTIONS_HEADING: &str = "**Additional Instructions:**";

/// Assembles the analysis prompt.
///
/// A custom instruction that is empty after trimming is treated as absent.
pub fn build_prompt(
    resume_text: &str,
    job_description_text: &str,
    custom_instruction: Option<&str>,
) -> String {
    let custom = custom_instruction
        .map(str::trim)
        .filter(|c| !c.is_empty());

    let mut prompt = String::with_capacity(
        ANALYSIS_INSTRUCTIONS.len()
            + resume_text.len()
            + job_description_text.len()
            + custom.map_or(0, str::len)
            + 256,
    );

    prompt.push_str(ANALYSIS_INSTRUCTIONS);
    prompt.push_str("\n\n");

    for (begin, text, end) in [
        (RESUME_BEGIN, resume_text, RESUME_END),
        (JD_BEGIN, job_description_text, JD_END),
    ] {
        prompt.push_str(SECTION_RULE);
        prompt.push('\n');
        prompt.push_str(begin);
        prompt.push('\n');
        prompt.push_str(text);
        prompt.push('\n');
        prompt.push_str(end);
        prompt.push('\n');
    }
    prompt.push_str(SECTION_RULE);
    prompt.push('\n');

    if let Some(custom) = custom {
        prompt.push('\n');
        prompt.push('\n');
        prompt.push_str(ADDITIONAL_INSTRUCTIONS_HEADING);
        prompt.push('\n');
        prompt.push_str(custom);
    }

    prompt
}
